//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic) and [`Selector`] (OR logic).

use crate::{Behavior, NodeId, NodeResult, Status, TreeError};

/// Executes child behaviors in sequence until one fails.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Running`, the sequence **stops immediately** and passes the result up
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation, where
/// a guard followed by an action only runs the action when the guard holds.
pub struct Sequence<C, O> {
    id: NodeId,
    children: Vec<Box<dyn Behavior<C, O>>>,
}

impl<C, O> Sequence<C, O> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// An empty sequence is allowed here so that children can be attached
    /// later with [`Behavior::add_child`]; ticking it while still empty is a
    /// [`TreeError::MissingChild`].
    pub fn new(children: Vec<Box<dyn Behavior<C, O>>>) -> Self {
        Self {
            id: NodeId::next(),
            children,
        }
    }
}

impl<C, O> Behavior<C, O> for Sequence<C, O> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError> {
        if self.children.is_empty() {
            return Err(TreeError::MissingChild { node: self.id });
        }
        // Execute children in order until one does not succeed
        for child in &mut self.children {
            let result = child.tick(ctx)?;
            match result.status {
                Status::Success => continue,                          // Move to next child
                Status::Failure => return Ok(NodeResult::failure(self.id)), // Short-circuit
                Status::Running => return Ok(result),
            }
        }
        // All children succeeded
        Ok(NodeResult::success(self.id))
    }

    fn reset(&mut self) {
        self.children.iter_mut().for_each(|child| child.reset());
    }

    fn add_child(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        self.children.push(child);
        Ok(())
    }

    fn children(&self) -> &[Box<dyn Behavior<C, O>>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Behavior<C, O>>] {
        &mut self.children
    }
}

/// Executes child behaviors in order until one succeeds or is running.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops immediately** and passes the result up
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation. Earlier
/// children therefore have higher priority than later ones.
pub struct Selector<C, O> {
    id: NodeId,
    children: Vec<Box<dyn Behavior<C, O>>>,
}

impl<C, O> Selector<C, O> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// As with [`Sequence::new`], ticking an empty selector is a
    /// [`TreeError::MissingChild`].
    pub fn new(children: Vec<Box<dyn Behavior<C, O>>>) -> Self {
        Self {
            id: NodeId::next(),
            children,
        }
    }
}

impl<C, O> Behavior<C, O> for Selector<C, O> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError> {
        if self.children.is_empty() {
            return Err(TreeError::MissingChild { node: self.id });
        }
        // Try children in order until one does not fail
        for child in &mut self.children {
            let result = child.tick(ctx)?;
            match result.status {
                Status::Failure => continue, // Try next child
                Status::Success | Status::Running => return Ok(result),
            }
        }
        // All children failed
        Ok(NodeResult::failure(self.id))
    }

    fn reset(&mut self) {
        self.children.iter_mut().for_each(|child| child.reset());
    }

    fn add_child(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        self.children.push(child);
        Ok(())
    }

    fn children(&self) -> &[Box<dyn Behavior<C, O>>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Behavior<C, O>>] {
        &mut self.children
    }
}
