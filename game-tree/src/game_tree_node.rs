use std::hash::Hash;

use crate::Player;

/// Final result of a finished game.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// Score in half-points: 2 for a win, 1 for a draw, 0 for a loss.
    pub fn score_for(self, player: Player) -> u32 {
        match self {
            Outcome::Win(winner) if winner == player => 2,
            Outcome::Win(_) => 0,
            Outcome::Draw => 1,
        }
    }

    pub fn is_win_for(self, player: Player) -> bool {
        self == Outcome::Win(player)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NodeState<N> {
    Finished(Outcome),
    HasChildren(Vec<N>),
}

pub trait GameTreeNode: Hash + Clone + Send + Sync + 'static {
    type Node;

    /// All states reachable in a single move. Empty once the game is finished.
    fn children(&self) -> Vec<Self::Node>;

    /// The player to move. Still defined for finished states, where it is the
    /// player who would have moved next.
    fn current_player(&self) -> Player;

    /// `None` while the game is still in progress.
    fn outcome(&self) -> Option<Outcome>;

    fn calculate_state(&self) -> NodeState<Self::Node> {
        match self.outcome() {
            Some(outcome) => NodeState::Finished(outcome),
            None => NodeState::HasChildren(self.children()),
        }
    }

    fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}
