use std::time::Duration;

use crate::{ConfigError, LookaheadConfig, Rollout};

/// How the final move is picked from the searched root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalSelection {
    /// Highest win rate among visited children.
    WinRate,
    MostVisits,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_duration: Duration,
    pub max_iterations: u64,

    /// Weight of the exploration term of UCB during tree traversal.
    pub exploration_factor: f64,

    pub rollout: Rollout,
    pub final_selection: FinalSelection,

    pub threads: usize,
    /// Seeds each worker's RNG with `seed + worker index` when set.
    pub seed: Option<u64>,
}

impl SearchConfig {
    pub const DEFAULT_EXPLORATION_FACTOR: f64 = 2.0;

    /// Plain UCB search with uniformly random rollouts.
    pub fn vanilla() -> Self {
        Self {
            max_duration: Duration::from_secs(60),
            max_iterations: 100,

            exploration_factor: Self::DEFAULT_EXPLORATION_FACTOR,

            rollout: Rollout::Random,
            final_selection: FinalSelection::WinRate,

            threads: num_cpus::get(),
            seed: None,
        }
    }

    /// More iterations, and rollouts that look ahead before committing to a move.
    pub fn modified() -> Self {
        Self {
            max_iterations: 750,
            rollout: Rollout::Lookahead(LookaheadConfig::default()),
            ..Self::vanilla()
        }
    }

    pub fn with_iterations(self, max_iterations: u64) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn with_threads(self, threads: usize) -> Self {
        Self { threads, ..self }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }

        if self.threads == 0 {
            return Err(ConfigError::NoThreads);
        }

        if !self.exploration_factor.is_finite() || self.exploration_factor < 0.0 {
            return Err(ConfigError::InvalidExplorationFactor(self.exploration_factor));
        }

        if let Rollout::Lookahead(lookahead) = &self.rollout {
            let factor = lookahead.exploration_factor;
            if !(0.0..=1.0).contains(&factor) {
                return Err(ConfigError::InvalidRolloutExploration(factor));
            }
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::vanilla()
    }
}
