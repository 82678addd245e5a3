use game_tree::GameTreeNode;
use game_tree_strategy::strategies::search_tree::SearchTreeStrategy;
use game_tree_strategy::Strategy;
use log::warn;
use monte_carlo_tree_search::{SearchConfig, SearchTree};
use std::fmt;

use crate::StrategyIterator;

/// Grows one search tree from `root` in fixed steps, yielding a strategy that
/// plays from the tree after every step.
pub struct SearchTreeIterationIterator<N> {
    tree: SearchTree,
    root: N,
    config: SearchConfig,

    step_iterations: u64,
    move_iterations: u64,
    total_steps: usize,

    current_step: usize,
}

impl<N> SearchTreeIterationIterator<N> {
    pub fn new(
        root: N,
        config: SearchConfig,
        step_iterations: u64,
        move_iterations: u64,
        total_steps: usize,
    ) -> Self {
        Self {
            tree: SearchTree::new(),
            root,
            config,

            step_iterations,
            move_iterations,
            total_steps,

            current_step: 0,
        }
    }
}

impl<N: GameTreeNode<Node = N>> fmt::Display for SearchTreeIterationIterator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MCSearchTree(explore_f={}, iters={}, fully={})",
            self.config.exploration_factor,
            self.current_step as u64 * self.step_iterations,
            self.tree.number_of_fully_expanded_nodes(self.root.clone())
        )
    }
}

impl<N: GameTreeNode<Node = N>> Iterator for SearchTreeIterationIterator<N> {
    type Item = Box<dyn Strategy<N>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_step >= self.total_steps {
            return None;
        }

        self.current_step += 1;

        let step_config = self.config.clone().with_iterations(self.step_iterations);
        if let Err(err) = self.tree.search(self.root.clone(), &step_config) {
            warn!("stopping sweep of {}: {}", self, err);
            return None;
        }

        let move_config = self.config.clone().with_iterations(self.move_iterations);
        match SearchTreeStrategy::learning(self.tree.clone(), move_config) {
            Ok(strategy) => Some(Box::new(strategy)),
            Err(err) => {
                warn!("stopping sweep of {}: {}", self, err);
                None
            }
        }
    }
}

impl<N: GameTreeNode<Node = N>> StrategyIterator<N> for SearchTreeIterationIterator<N> {}
