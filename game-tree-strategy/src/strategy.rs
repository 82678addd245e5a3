use game_tree::GameTreeNode;
use std::fmt;

/// Picks which move to play. `children` holds every state reachable from
/// `parent` in one move and is never empty.
pub trait Strategy<N: GameTreeNode<Node = N>>: fmt::Display {
    fn select_child(&mut self, parent: &N, children: Vec<N>) -> N;
}
