mod error;
mod node_metadata;
mod rollout;
mod search_config;
mod search_tree;

pub use self::error::ConfigError;
pub use self::node_metadata::NodeMetadata;
pub use self::rollout::{LookaheadConfig, Rollout};
pub use self::search_config::{FinalSelection, SearchConfig};
pub use self::search_tree::{SearchSummary, SearchTree};
