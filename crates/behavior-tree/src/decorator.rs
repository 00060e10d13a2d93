//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic) and [`AlwaysSucceed`] (error suppression).
//! Both pass a `Running` child result through unchanged.

use crate::{Behavior, NodeId, NodeResult, Status, TreeError};

/// Holder for the single child of a decorator.
struct Slot<C, O> {
    owner: NodeId,
    child: Vec<Box<dyn Behavior<C, O>>>,
}

impl<C, O> Slot<C, O> {
    fn new(owner: NodeId, child: Option<Box<dyn Behavior<C, O>>>) -> Self {
        Self {
            owner,
            child: child.into_iter().collect(),
        }
    }

    fn attach(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        if !self.child.is_empty() {
            return Err(TreeError::DuplicateChild { node: self.owner });
        }
        self.child.push(child);
        Ok(())
    }

    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError> {
        match self.child.first_mut() {
            Some(child) => child.tick(ctx),
            None => Err(TreeError::MissingChild { node: self.owner }),
        }
    }

    fn reset(&mut self) {
        self.child.iter_mut().for_each(|child| child.reset());
    }
}

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - If the child returns `Running`, the result is passed through
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C, O> {
    id: NodeId,
    slot: Slot<C, O>,
}

impl<C, O> Inverter<C, O> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Box<dyn Behavior<C, O>>) -> Self {
        let id = NodeId::next();
        Self {
            id,
            slot: Slot::new(id, Some(child)),
        }
    }

    /// Creates an inverter whose child is attached later.
    pub fn empty() -> Self {
        let id = NodeId::next();
        Self {
            id,
            slot: Slot::new(id, None),
        }
    }
}

impl<C, O> Behavior<C, O> for Inverter<C, O> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError> {
        let result = self.slot.tick(ctx)?;
        Ok(match result.status {
            Status::Running => result,
            status => NodeResult::from_condition(self.id, status.invert().is_success()),
        })
    }

    fn reset(&mut self) {
        self.slot.reset();
    }

    fn add_child(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        self.slot.attach(child)
    }

    fn children(&self) -> &[Box<dyn Behavior<C, O>>] {
        &self.slot.child
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Behavior<C, O>>] {
        &mut self.slot.child
    }
}

/// Returns `Success` whenever its child finishes, regardless of how.
///
/// # Semantics
///
/// - If the child returns `Success`, returns `Success`
/// - If the child returns `Failure`, **still returns `Success`**
/// - If the child returns `Running`, the result is passed through
///
/// This is useful for optional behaviors that shouldn't cause a sequence to fail.
pub struct AlwaysSucceed<C, O> {
    id: NodeId,
    slot: Slot<C, O>,
}

impl<C, O> AlwaysSucceed<C, O> {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C, O>>) -> Self {
        let id = NodeId::next();
        Self {
            id,
            slot: Slot::new(id, Some(child)),
        }
    }

    /// Creates a wrapper whose child is attached later.
    pub fn empty() -> Self {
        let id = NodeId::next();
        Self {
            id,
            slot: Slot::new(id, None),
        }
    }
}

impl<C, O> Behavior<C, O> for AlwaysSucceed<C, O> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError> {
        let result = self.slot.tick(ctx)?;
        Ok(match result.status {
            Status::Running => result,
            _ => NodeResult::success(self.id),
        })
    }

    fn reset(&mut self) {
        self.slot.reset();
    }

    fn add_child(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        self.slot.attach(child)
    }

    fn children(&self) -> &[Box<dyn Behavior<C, O>>] {
        &self.slot.child
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Behavior<C, O>>] {
        &mut self.slot.child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IsPositive {
        id: NodeId,
        value: i32,
    }

    impl IsPositive {
        fn boxed(value: i32) -> Box<dyn Behavior<(), ()>> {
            Box::new(Self {
                id: NodeId::next(),
                value,
            })
        }
    }

    impl Behavior<(), ()> for IsPositive {
        fn id(&self) -> NodeId {
            self.id
        }

        fn tick(&mut self, _ctx: &()) -> Result<NodeResult<()>, TreeError> {
            Ok(NodeResult::from_condition(self.id, self.value > 0))
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn inverter_inverts_success() {
        let mut inverter = Inverter::new(IsPositive::boxed(10));
        assert_eq!(inverter.tick(&()).unwrap().status, Status::Failure);
    }

    #[test]
    fn inverter_inverts_failure() {
        let mut inverter = Inverter::new(IsPositive::boxed(-10));
        assert_eq!(inverter.tick(&()).unwrap().status, Status::Success);
    }

    #[test]
    fn always_succeed_on_failure() {
        let mut always = AlwaysSucceed::new(IsPositive::boxed(-1));
        assert_eq!(always.tick(&()).unwrap().status, Status::Success);
    }

    #[test]
    fn decorators_take_exactly_one_child() {
        let mut inverter: Inverter<(), ()> = Inverter::empty();
        let id = inverter.id();
        assert_eq!(
            inverter.tick(&()).unwrap_err(),
            TreeError::MissingChild { node: id }
        );

        inverter.add_child(IsPositive::boxed(1)).unwrap();
        assert_eq!(
            inverter.add_child(IsPositive::boxed(2)).unwrap_err(),
            TreeError::DuplicateChild { node: id }
        );
        assert_eq!(inverter.tick(&()).unwrap().status, Status::Failure);
    }

    #[test]
    fn leaves_reject_children() {
        let mut leaf = IsPositive::boxed(1);
        let id = leaf.id();
        assert_eq!(
            leaf.add_child(IsPositive::boxed(2)).unwrap_err(),
            TreeError::ChildNotAccepted { node: id }
        );
    }
}
