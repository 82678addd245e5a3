mod error;
mod game_tree_node;
mod player;

pub mod games;

pub use self::error::MoveError;
pub use self::game_tree_node::{GameTreeNode, NodeState, Outcome};
pub use self::player::Player;
