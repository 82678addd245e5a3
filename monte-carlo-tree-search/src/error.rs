use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_iterations must be at least 1")]
    NoIterations,

    #[error("threads must be at least 1")]
    NoThreads,

    #[error("exploration factor must be finite and non-negative, got {0}")]
    InvalidExplorationFactor(f64),

    #[error("rollout exploration factor must be within [0, 1], got {0}")]
    InvalidRolloutExploration(f64),
}
