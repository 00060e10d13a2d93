//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C` (the read-only per-tick snapshot) and an output type `O`
//! (what a running action produces).

use crate::{NodeId, NodeResult, TreeError};

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C, O>: Send {
    /// Identity of this node, stable for its whole lifetime.
    fn id(&self) -> NodeId;

    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The snapshot for the current tick. Nodes must not keep it
    ///   around for later ticks.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingChild`] if a node that needs a child was
    /// never given one.
    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError>;

    /// Clears timers, plans and other internal state.
    ///
    /// Idempotent and always safe to call, even on a node that never ran.
    /// Composite nodes reset their children as well.
    fn reset(&mut self);

    /// Attaches a child node.
    ///
    /// Leaves reject children with [`TreeError::ChildNotAccepted`];
    /// single-child nodes reject a second child with
    /// [`TreeError::DuplicateChild`].
    fn add_child(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        drop(child);
        Err(TreeError::ChildNotAccepted { node: self.id() })
    }

    /// Direct children, in evaluation order.
    fn children(&self) -> &[Box<dyn Behavior<C, O>>] {
        &[]
    }

    /// Direct children, mutably.
    fn children_mut(&mut self) -> &mut [Box<dyn Behavior<C, O>>] {
        &mut []
    }

    /// The textual signature this node was created from, if it is a leaf.
    fn label(&self) -> Option<&str> {
        None
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C, O>>` to also implement `Behavior<C, O>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C, O> Behavior<C, O> for Box<dyn Behavior<C, O>> {
    #[inline]
    fn id(&self) -> NodeId {
        (**self).id()
    }

    #[inline]
    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError> {
        (**self).tick(ctx)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn add_child(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        (**self).add_child(child)
    }

    #[inline]
    fn children(&self) -> &[Box<dyn Behavior<C, O>>] {
        (**self).children()
    }

    #[inline]
    fn children_mut(&mut self) -> &mut [Box<dyn Behavior<C, O>>] {
        (**self).children_mut()
    }

    #[inline]
    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

/// Finds the node with the given id in the subtree rooted at `node`.
pub fn find_node<'a, C, O>(
    node: &'a (dyn Behavior<C, O> + 'static),
    id: NodeId,
) -> Option<&'a (dyn Behavior<C, O> + 'static)> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| find_node(child.as_ref(), id))
}

/// Finds the node with the given id in the subtree rooted at `node`, mutably.
pub fn find_node_mut<'a, C, O>(
    node: &'a mut (dyn Behavior<C, O> + 'static),
    id: NodeId,
) -> Option<&'a mut (dyn Behavior<C, O> + 'static)> {
    if node.id() == id {
        return Some(node);
    }
    for child in node.children_mut() {
        if let Some(found) = find_node_mut(child.as_mut(), id) {
            return Some(found);
        }
    }
    None
}
