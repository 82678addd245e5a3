use game_tree::GameTreeNode;
use log::{debug, warn};
use monte_carlo_tree_search::{ConfigError, Rollout, SearchConfig, SearchTree};
use rand::seq::IteratorRandom;
use std::fmt;

use crate::Strategy;

/// Runs a Monte Carlo tree search before every move.
pub struct SearchTreeStrategy {
    tree: SearchTree,
    config: SearchConfig,

    /// Keep statistics between moves instead of starting every search afresh.
    learning: bool,
}

impl SearchTreeStrategy {
    /// Searches from scratch on every move.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree: SearchTree::new(),
            config,
            learning: false,
        })
    }

    /// Shares `tree` and keeps growing it across moves and games.
    pub fn learning(tree: SearchTree, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree,
            config,
            learning: true,
        })
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl fmt::Display for SearchTreeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rollout = match &self.config.rollout {
            Rollout::Random => "random".to_string(),
            Rollout::Lookahead(lookahead) => format!(
                "lookahead(p={}, depth={})",
                lookahead.exploration_factor, lookahead.max_depth
            ),
        };
        write!(
            f,
            "MCSearchTree(explore_f={}, iters={}, rollout={})",
            self.config.exploration_factor, self.config.max_iterations, rollout
        )
    }
}

impl<N: GameTreeNode<Node = N>> Strategy<N> for SearchTreeStrategy {
    fn select_child(&mut self, parent: &N, children: Vec<N>) -> N {
        if !self.learning {
            self.tree.clear();
        }

        match self.tree.search(parent.clone(), &self.config) {
            Ok(summary) => debug!(
                "{} ran {} iterations in {:?}",
                self, summary.iterations, summary.elapsed
            ),
            Err(err) => warn!("{} could not search: {}", self, err),
        }

        if let Some(best) = self.tree.best_child(&children, self.config.final_selection) {
            return best.clone();
        }

        warn!("{} has no statistics for any move, playing randomly", self);
        children
            .into_iter()
            .choose(&mut rand::thread_rng())
            .expect("array is not empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_tree::games::tic_tac_toe::TicTacToeState;

    fn config() -> SearchConfig {
        SearchConfig::vanilla()
            .with_iterations(300)
            .with_threads(1)
            .with_seed(17)
    }

    #[test]
    fn rejects_invalid_config() {
        let result = SearchTreeStrategy::new(config().with_iterations(0));
        assert!(matches!(result, Err(ConfigError::NoIterations)));
    }

    #[test]
    fn fresh_strategy_clears_tree_between_moves() {
        let mut strategy = SearchTreeStrategy::new(config()).expect("valid config");
        let parent = TicTacToeState::from_moves(&[0, 3, 1, 4]).expect("legal moves");

        let chosen = strategy.select_child(&parent, parent.children());
        assert_eq!(chosen, parent.place(2).expect("open slot"));

        let root_visits = strategy
            .tree()
            .metadata(&parent)
            .map(|meta| meta.number_of_visits());
        assert_eq!(root_visits, Some(300));

        strategy.select_child(&parent, parent.children());
        let root_visits = strategy
            .tree()
            .metadata(&parent)
            .map(|meta| meta.number_of_visits());
        assert_eq!(root_visits, Some(300));
    }

    #[test]
    fn learning_strategy_keeps_statistics() {
        let tree = SearchTree::new();
        let mut strategy = SearchTreeStrategy::learning(tree.clone(), config()).expect("valid config");
        let parent = TicTacToeState::new();

        strategy.select_child(&parent, parent.children());
        strategy.select_child(&parent, parent.children());

        let root_visits = tree.metadata(&parent).map(|meta| meta.number_of_visits());
        assert_eq!(root_visits, Some(600));
    }

    #[test]
    fn display_names_the_rollout() {
        let strategy = SearchTreeStrategy::new(SearchConfig::modified()).expect("valid config");
        assert_eq!(
            strategy.to_string(),
            "MCSearchTree(explore_f=2, iters=750, rollout=lookahead(p=0.8, depth=19))"
        );
    }
}
