use game_tree::GameTreeNode;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use std::fmt;

use crate::Strategy;

pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RandomStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Random")
    }
}

impl<N: GameTreeNode<Node = N>> Strategy<N> for RandomStrategy {
    fn select_child(&mut self, _parent: &N, children: Vec<N>) -> N {
        children
            .into_iter()
            .choose(&mut self.rng)
            .expect("array is not empty")
    }
}
