//! Per-agent configuration.
use std::env;
use std::sync::Arc;

use game_core::SearchConfig;

use crate::clock::{Clock, SystemClock};

/// Settings shared by every node of one agent's tree.
///
/// Built once per agent and handed to the [`LeafFactory`](crate::LeafFactory)
/// that creates its leaves.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Sequence search used by intention leaves.
    pub search: SearchConfig,
    /// Time source for timed leaves.
    pub clock: Arc<dyn Clock>,
    /// How far a planned-for target may drift before an intention replans.
    pub replan_distance: f64,
}

impl AgentConfig {
    pub const DEFAULT_REPLAN_DISTANCE: f64 = 250.0;

    pub fn new(search: SearchConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            search,
            clock,
            replan_distance: Self::DEFAULT_REPLAN_DISTANCE,
        }
    }

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AGENT_STEP_SIZE` - Planner step in seconds (default: 0.05)
    /// - `AGENT_MAX_EXPANSIONS` - Planner node budget per search (default: 150)
    /// - `AGENT_MAX_DEPTH` - Longest plan in steps (default: 60)
    /// - `AGENT_REPLAN_DISTANCE` - Target drift that interrupts a plan (default: 250)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(step) = read_env::<f64>("AGENT_STEP_SIZE")
            && step > 0.0
        {
            config.search.step_size = step;
        }
        if let Some(expansions) = read_env::<usize>("AGENT_MAX_EXPANSIONS") {
            config.search.max_expansions = expansions.max(1);
        }
        if let Some(depth) = read_env::<usize>("AGENT_MAX_DEPTH") {
            config.search.max_depth = depth.max(1);
        }
        if let Some(distance) = read_env::<f64>("AGENT_REPLAN_DISTANCE") {
            config.replan_distance = distance.max(0.0);
        }

        config
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(SearchConfig::default(), Arc::new(SystemClock::new()))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
