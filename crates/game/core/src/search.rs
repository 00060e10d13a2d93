//! Discrete best-first search over simulated control sequences.
//!
//! # Semantics
//!
//! Starting from a snapshot, every node is expanded by simulating each of the
//! configured control choices for one step. Nodes are ordered by elapsed
//! time plus the weighted remaining-cost estimate of the goal. Snapshots
//! whose car lands in an already expanded bucket of position, heading and
//! speed are skipped.
//!
//! The search never fails for lack of a solution: when the expansion budget
//! runs out it returns the sequence leading to the node closest to the goal.
//! The resulting plan is meant to be followed until it runs out and then
//! recomputed from the live snapshot, never extrapolated.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use ordered_float::OrderedFloat;

use crate::config::SearchConfig;
use crate::error::PhysicsError;
use crate::simulation::simulate;
use crate::state::{Body, Car, ControlIntent, Situation};
use crate::timeline::SteppedTimeline;

/// Bucket sizes for duplicate detection.
const POSITION_BUCKET: f64 = 40.0;
const YAW_BUCKET: f64 = 0.1;
const SPEED_BUCKET: f64 = 100.0;

/// A goal the search can plan towards.
pub trait IntentionFunction {
    /// Estimated seconds still needed to fulfil the goal from `situation`.
    fn remaining_cost(&self, situation: &Situation) -> f64;

    fn is_fulfilled(&self, situation: &Situation) -> bool;
}

/// Output of [`find_sequence`].
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    /// Intents keyed by seconds since planning started, ended by an end marker.
    pub timeline: SteppedTimeline<ControlIntent>,
    /// Whether the last step fulfils the goal.
    pub fulfilled: bool,
    /// Nodes expanded while searching.
    pub expansions: usize,
}

impl Plan {
    /// Whether the plan contains no action at all.
    pub fn is_empty(&self) -> bool {
        self.timeline.values().next().is_none()
    }

    /// Seconds until the plan runs out.
    pub fn duration(&self) -> f64 {
        self.timeline.last_time().unwrap_or(0.0)
    }
}

struct SearchNode {
    situation: Situation,
    parent: Option<usize>,
    intent: ControlIntent,
    depth: usize,
    remaining: f64,
}

type Bucket = (i64, i64, i64, i64);

fn bucket(car: &Car) -> Bucket {
    let position = car.position();
    (
        (position.x / POSITION_BUCKET).floor() as i64,
        (position.y / POSITION_BUCKET).floor() as i64,
        (car.rotation().yaw / YAW_BUCKET).floor() as i64,
        (car.velocity().length() / SPEED_BUCKET).floor() as i64,
    )
}

/// Searches for a control sequence that takes `start` to a state fulfilling `goal`.
///
/// # Errors
///
/// [`PhysicsError::NonPositiveStepSize`] if the configuration has an invalid
/// step size. An unreachable goal is not an error; see [`Plan::fulfilled`].
pub fn find_sequence<F: IntentionFunction + ?Sized>(
    start: &Situation,
    goal: &F,
    config: &SearchConfig,
) -> Result<Plan, PhysicsError> {
    config.validate()?;
    let step = config.step_size;

    let mut nodes = vec![SearchNode {
        situation: start.clone(),
        parent: None,
        intent: ControlIntent::NEUTRAL,
        depth: 0,
        remaining: goal.remaining_cost(start),
    }];
    if goal.is_fulfilled(start) {
        return Ok(reconstruct(&nodes, 0, step, true, 0));
    }

    let mut frontier = BinaryHeap::new();
    let mut sequence: u64 = 0;
    frontier.push(Reverse((OrderedFloat(config.heuristic_weight * nodes[0].remaining), sequence, 0)));

    let mut closed: HashSet<Bucket> = HashSet::new();
    let mut best = 0;
    let mut expansions = 0;

    while let Some(Reverse((_, _, index))) = frontier.pop() {
        if expansions >= config.max_expansions {
            break;
        }
        let node = &nodes[index];
        if node.depth >= config.max_depth || !closed.insert(bucket(node.situation.my_car())) {
            continue;
        }
        expansions += 1;

        let depth = node.depth + 1;
        let successors = config
            .choices
            .iter()
            .map(|choice| simulate(&node.situation, choice, step).map(|next| (*choice, next)))
            .collect::<Result<Vec<_>, _>>()?;

        for (intent, situation) in successors {
            let fulfilled = goal.is_fulfilled(&situation);
            let remaining = if fulfilled {
                0.0
            } else {
                goal.remaining_cost(&situation)
            };
            nodes.push(SearchNode {
                situation,
                parent: Some(index),
                intent,
                depth,
                remaining,
            });
            let child = nodes.len() - 1;

            if fulfilled {
                tracing::debug!(expansions, depth, "search reached goal");
                return Ok(reconstruct(&nodes, child, step, true, expansions));
            }
            if remaining < nodes[best].remaining {
                best = child;
            }

            sequence += 1;
            let score = depth as f64 * step + config.heuristic_weight * remaining;
            frontier.push(Reverse((OrderedFloat(score), sequence, child)));
        }
    }

    tracing::warn!(
        expansions,
        depth = nodes[best].depth,
        remaining = nodes[best].remaining,
        "search budget exhausted, using closest partial plan"
    );
    Ok(reconstruct(&nodes, best, step, false, expansions))
}

fn reconstruct(nodes: &[SearchNode], last: usize, step: f64, fulfilled: bool, expansions: usize) -> Plan {
    let mut intents = Vec::with_capacity(nodes[last].depth);
    let mut cursor = Some(last);
    while let Some(index) = cursor {
        let node = &nodes[index];
        if node.parent.is_some() {
            intents.push(node.intent);
        }
        cursor = node.parent;
    }
    intents.reverse();

    Plan {
        timeline: SteppedTimeline::evenly_spaced(step, intents),
        fulfilled,
        expansions,
    }
}
