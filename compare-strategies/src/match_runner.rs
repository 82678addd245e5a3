use game_tree::{GameTreeNode, NodeState, Outcome, Player};
use game_tree_strategy::Strategy;
use log::info;
use std::fmt;

/// Tally of a series of games between two strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub names: [String; 2],
    pub wins: [u32; 2],
    pub draws: u32,
}

impl MatchReport {
    pub fn games(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.draws
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} won {}, {} won {}, {} draws over {} games",
            self.names[0],
            self.wins[0],
            self.names[1],
            self.wins[1],
            self.draws,
            self.games()
        )
    }
}

/// Plays a single game from `root` until it is finished.
pub fn play_game<'a, N: GameTreeNode<Node = N>>(
    root: &N,
    x: &'a mut dyn Strategy<N>,
    o: &'a mut dyn Strategy<N>,
) -> Outcome {
    let mut current = root.clone();
    loop {
        match current.calculate_state() {
            NodeState::Finished(outcome) => return outcome,
            NodeState::HasChildren(children) => {
                let strategy = match current.current_player() {
                    Player::X => &mut *x,
                    Player::O => &mut *o,
                };
                current = strategy.select_child(&current, children);
            }
        }
    }
}

/// Plays `games` games, alternating which strategy moves first.
pub fn play_match<N: GameTreeNode<Node = N>>(
    root: &N,
    strategies: &mut [Box<dyn Strategy<N>>; 2],
    games: u32,
) -> MatchReport {
    let mut report = MatchReport {
        names: [strategies[0].to_string(), strategies[1].to_string()],
        wins: [0, 0],
        draws: 0,
    };

    for game in 0..games {
        let (a, b) = strategies.split_at_mut(1);
        let (first, second) = (&mut *a[0], &mut *b[0]);

        let first_index = (game % 2) as usize;
        let outcome = if first_index == 0 {
            play_game(root, first, second)
        } else {
            play_game(root, second, first)
        };

        let result = match outcome {
            Outcome::Win(Player::X) => {
                report.wins[first_index] += 1;
                format!("{} won", report.names[first_index])
            }
            Outcome::Win(Player::O) => {
                report.wins[1 - first_index] += 1;
                format!("{} won", report.names[1 - first_index])
            }
            Outcome::Draw => {
                report.draws += 1;
                "draw".to_string()
            }
        };
        info!(
            "game {} ({} moved first): {}",
            game + 1,
            report.names[first_index],
            result
        );
    }

    report
}
