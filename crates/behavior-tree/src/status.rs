//! Status and results returned by behavior nodes.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// The result of evaluating a behavior node.
///
/// # Real-time Semantics
///
/// A node is evaluated once per tick:
/// - Conditions evaluate immediately and never report `Running`
/// - Actions report `Running` for as long as they produce output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior is in progress and produced an output this tick.
    Running,

    /// The behavior completed successfully.
    ///
    /// For conditions: The condition was met.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The action was interrupted or could not be started.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Swaps Success and Failure. `Running` is left untouched.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Running => Status::Running,
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

/// Opaque identity of a node inside a tree.
///
/// Ids are handed out from a process-wide counter, so two nodes never share
/// one. A [`NodeResult`] carries the id of the node that produced it; the
/// scheduler only compares ids and looks nodes up by id; it never follows
/// them as pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocates a fresh, never before used id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node reports after one tick.
///
/// `output` is only meaningful while `status` is [`Status::Running`].
/// `creator` identifies the node that produced the result and is used by the
/// scheduler for continuity checks. `high_priority` asks the scheduler to
/// re-invoke the creator directly on the next tick.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeResult<O> {
    pub status: Status,
    pub output: Option<O>,
    pub creator: NodeId,
    pub high_priority: bool,
}

impl<O> NodeResult<O> {
    /// A running result carrying `output`.
    pub fn running(creator: NodeId, output: O) -> Self {
        Self {
            status: Status::Running,
            output: Some(output),
            creator,
            high_priority: false,
        }
    }

    pub fn success(creator: NodeId) -> Self {
        Self {
            status: Status::Success,
            output: None,
            creator,
            high_priority: false,
        }
    }

    pub fn failure(creator: NodeId) -> Self {
        Self {
            status: Status::Failure,
            output: None,
            creator,
            high_priority: false,
        }
    }

    /// Builds a Success or Failure result from a predicate.
    pub fn from_condition(creator: NodeId, holds: bool) -> Self {
        if holds {
            Self::success(creator)
        } else {
            Self::failure(creator)
        }
    }

    /// Sets the high-priority flag (builder pattern).
    #[must_use]
    pub fn with_high_priority(mut self, high_priority: bool) -> Self {
        self.high_priority = high_priority;
        self
    }

    /// Returns `true` if this result is a running action with an output.
    #[inline]
    pub fn has_valid_output(&self) -> bool {
        self.status.is_running() && self.output.is_some()
    }
}
