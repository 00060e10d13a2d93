use crate::error::PhysicsError;
use crate::state::ControlIntent;

/// Tunables of the sequence search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Simulated seconds per action in a plan.
    pub step_size: f64,
    /// Nodes expanded before the search settles for its best partial plan.
    pub max_expansions: usize,
    /// Longest plan, in steps.
    pub max_depth: usize,
    /// Multiplier on the remaining-cost estimate. Values above 1 favour
    /// deeper plans over exhaustive ones.
    pub heuristic_weight: f64,
    /// Discrete control choices tried from every node.
    pub choices: Vec<ControlIntent>,
}

impl SearchConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STEP_SIZE: f64 = 0.05;
    pub const DEFAULT_MAX_EXPANSIONS: usize = 150;
    pub const DEFAULT_MAX_DEPTH: usize = 60;
    pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 2.0;

    pub fn new() -> Self {
        Self {
            step_size: Self::DEFAULT_STEP_SIZE,
            max_expansions: Self::DEFAULT_MAX_EXPANSIONS,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            heuristic_weight: Self::DEFAULT_HEURISTIC_WEIGHT,
            choices: Self::default_choices(),
        }
    }

    /// Full throttle with and without boost for each of left, straight and
    /// right, plus coasting straight.
    pub fn default_choices() -> Vec<ControlIntent> {
        let mut choices = Vec::with_capacity(7);
        for steer in [-1.0, 0.0, 1.0] {
            let drive = ControlIntent::new().with_throttle(1.0).with_steer(steer);
            choices.push(drive);
            choices.push(drive.with_boost(true));
        }
        choices.push(ControlIntent::NEUTRAL);
        choices
    }

    #[must_use]
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_heuristic_weight(mut self, heuristic_weight: f64) -> Self {
        self.heuristic_weight = heuristic_weight;
        self
    }

    #[must_use]
    pub fn with_choices(mut self, choices: Vec<ControlIntent>) -> Self {
        self.choices = choices;
        self
    }

    /// Rejects a configuration the search cannot run with.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        PhysicsError::check_step(self.step_size)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
