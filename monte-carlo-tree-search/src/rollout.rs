use game_tree::{GameTreeNode, NodeState, Outcome, Player};
use rand::seq::IteratorRandom;
use rand::Rng;

/// How a game is played out from a freshly expanded node.
#[derive(Debug, Clone, PartialEq)]
pub enum Rollout {
    /// Uniformly random moves until the game is finished.
    Random,
    Lookahead(LookaheadConfig),
}

/// Rollout that mixes random moves with moves picked by probing each
/// candidate with a short random play-out.
#[derive(Debug, Clone, PartialEq)]
pub struct LookaheadConfig {
    /// Probability of playing a random move instead of the best probed one.
    pub exploration_factor: f64,
    /// Probes stop after this many plies past the candidate move.
    pub max_depth: u32,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            exploration_factor: 0.8,
            max_depth: 19,
        }
    }
}

impl Rollout {
    pub fn play_out<N, R>(&self, node: N, rng: &mut R) -> Outcome
    where
        N: GameTreeNode<Node = N>,
        R: Rng,
    {
        match self {
            Rollout::Random => random_play_out(node, rng),
            Rollout::Lookahead(lookahead) => lookahead.play_out(node, rng),
        }
    }
}

fn random_play_out<N, R>(node: N, rng: &mut R) -> Outcome
where
    N: GameTreeNode<Node = N>,
    R: Rng,
{
    let mut current = node;
    loop {
        match current.calculate_state() {
            NodeState::Finished(outcome) => return outcome,
            NodeState::HasChildren(children) => {
                current = children
                    .into_iter()
                    .choose(rng)
                    .expect("unfinished node has children");
            }
        }
    }
}

impl LookaheadConfig {
    fn play_out<N, R>(&self, node: N, rng: &mut R) -> Outcome
    where
        N: GameTreeNode<Node = N>,
        R: Rng,
    {
        let mut current = node;
        loop {
            let children = match current.calculate_state() {
                NodeState::Finished(outcome) => return outcome,
                NodeState::HasChildren(children) => children,
            };

            // Any move that ends the game is played right away.
            if let Some(outcome) = children.iter().find_map(|c| c.outcome()) {
                return outcome;
            }

            let chooser = current.current_player();
            current = if rng.gen_bool(self.exploration_factor) {
                children
                    .into_iter()
                    .choose(rng)
                    .expect("unfinished node has children")
            } else {
                children
                    .into_iter()
                    .min_by_key(|c| self.probe(c, chooser, rng))
                    .expect("unfinished node has children")
            };
        }
    }

    /// Plays randomly from `candidate` until the game ends or the depth cap is
    /// passed. Lower is better for `chooser`: a win scores the negated depth,
    /// anything else scores the depth.
    pub(crate) fn probe<N, R>(&self, candidate: &N, chooser: Player, rng: &mut R) -> i64
    where
        N: GameTreeNode<Node = N>,
        R: Rng,
    {
        let max_depth = i64::from(self.max_depth);
        let mut state = candidate.clone();
        let mut depth = 0;
        loop {
            if let Some(outcome) = state.outcome() {
                return if outcome.is_win_for(chooser) {
                    -depth
                } else {
                    depth
                };
            }

            if depth > max_depth {
                return depth;
            }

            state = state
                .children()
                .into_iter()
                .choose(rng)
                .expect("unfinished node has children");
            depth += 1;
        }
    }
}
