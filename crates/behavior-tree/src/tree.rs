//! The per-tick scheduler.
//!
//! [`BehaviorTree`] owns the root node and the result it produced on the
//! previous tick. Each call to [`BehaviorTree::run`]:
//!
//! 1. fails with [`TreeError::MissingRoot`] if no root was configured
//! 2. re-invokes the previous creator directly if its result was high-priority,
//!    otherwise ticks the root
//! 3. resets the previous creator if the new result is not a running action
//!    or comes from a different node
//! 4. replaces an unusable result with a neutral running one attributed to the
//!    tree itself
//! 5. stores the result as the new "last result"

use core::fmt;

use crate::{Behavior, NodeId, NodeResult, TreeError, find_node, find_node_mut};

/// What the tree is currently doing, for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity<'a> {
    /// The tree has not produced a result yet.
    Initializing,
    /// A leaf is in control; holds the leaf's textual signature.
    Leaf(&'a str),
    /// Control sits somewhere without a settled leaf attribution.
    Thinking,
}

impl fmt::Display for Activity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Initializing => f.write_str("Initializing..."),
            Activity::Leaf(signature) => f.write_str(signature),
            Activity::Thinking => f.write_str("Thinking..."),
        }
    }
}

/// Scheduler that evaluates a node graph once per tick.
///
/// The only state kept between ticks is the last produced result. Each node
/// keeps its own private state; the tree never reads it.
pub struct BehaviorTree<C, O> {
    id: NodeId,
    root: Option<Box<dyn Behavior<C, O>>>,
    last: Option<NodeResult<O>>,
}

impl<C: 'static, O: Default + Clone + Send + 'static> BehaviorTree<C, O> {
    /// Creates a tree without a root node. Attach one with [`Behavior::add_child`].
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            root: None,
            last: None,
        }
    }

    /// Creates a tree with the given root node.
    pub fn with_root(root: Box<dyn Behavior<C, O>>) -> Self {
        Self {
            root: Some(root),
            ..Self::new()
        }
    }

    /// Runs one scheduling step and returns the stored result.
    ///
    /// The returned result is always `Running` with an output.
    ///
    /// # Errors
    ///
    /// [`TreeError::MissingRoot`] if no root node is configured, or any
    /// configuration error raised by a node while ticking.
    pub fn run(&mut self, ctx: &C) -> Result<&NodeResult<O>, TreeError> {
        let root = self.root.as_mut().ok_or(TreeError::MissingRoot)?;

        let held = self
            .last
            .as_ref()
            .filter(|last| last.high_priority)
            .map(|last| last.creator);

        let fresh = match held.and_then(|creator| find_node_mut(root.as_mut(), creator)) {
            Some(holder) => {
                tracing::trace!(node = %holder.id(), "re-invoking high-priority leaf");
                holder.tick(ctx)?
            }
            None => root.tick(ctx)?,
        };

        let valid = fresh.has_valid_output();

        if let Some(last) = &self.last
            && (!valid || fresh.creator != last.creator)
            && let Some(previous) = find_node_mut(root.as_mut(), last.creator)
        {
            tracing::debug!(
                previous = %last.creator,
                next = %fresh.creator,
                "control moved away, resetting previous leaf"
            );
            previous.reset();
        }

        let result = if valid {
            fresh
        } else {
            tracing::debug!(
                creator = %fresh.creator,
                status = ?fresh.status,
                "no running action this tick, substituting neutral output"
            );
            NodeResult::running(self.id, O::default())
        };

        Ok(self.last.insert(result))
    }

    /// Runs one scheduling step and returns only the produced output.
    pub fn evaluate(&mut self, ctx: &C) -> Result<O, TreeError> {
        let result = self.run(ctx)?;
        Ok(result.output.clone().unwrap_or_default())
    }

    /// The result stored by the most recent [`run`](Self::run), if any.
    pub fn last_result(&self) -> Option<&NodeResult<O>> {
        self.last.as_ref()
    }

    /// Describes what the tree is doing, based on the last result.
    pub fn activity(&self) -> Activity<'_> {
        let Some(last) = &self.last else {
            return Activity::Initializing;
        };
        self.root
            .as_deref()
            .and_then(|root| find_node(root, last.creator))
            .and_then(|node| node.label())
            .map_or(Activity::Thinking, Activity::Leaf)
    }
}

impl<C: 'static, O: Default + Clone + Send + 'static> Default for BehaviorTree<C, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static, O: Default + Clone + Send + 'static> Behavior<C, O> for BehaviorTree<C, O> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn tick(&mut self, ctx: &C) -> Result<NodeResult<O>, TreeError> {
        self.run(ctx).cloned()
    }

    /// Forgets the last result. Node state is left to the scheduler's own resets.
    fn reset(&mut self) {
        self.last = None;
    }

    /// Sets the root node. A tree accepts exactly one root.
    fn add_child(&mut self, child: Box<dyn Behavior<C, O>>) -> Result<(), TreeError> {
        if self.root.is_some() {
            return Err(TreeError::DuplicateChild { node: self.id });
        }
        self.root = Some(child);
        Ok(())
    }
}
