use game_tree::{Outcome, Player};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Search statistics of a single game state, shared between worker threads.
///
/// Scores are kept in half-points from the perspective of the player who
/// moved into the state, so a parent can compare its children directly.
pub struct NodeMetadata {
    total_score: AtomicU64,
    number_of_visits: AtomicU32,

    visited: AtomicBool,
    fully_expanded: AtomicBool,
}

impl NodeMetadata {
    pub fn new() -> Self {
        Self {
            total_score: AtomicU64::new(0),
            number_of_visits: AtomicU32::new(0),

            visited: AtomicBool::new(false),
            fully_expanded: AtomicBool::new(false),
        }
    }

    pub fn record_result(&self, outcome: Outcome, mover: Player) {
        self.number_of_visits.fetch_add(1, Ordering::SeqCst);
        self.total_score
            .fetch_add(u64::from(outcome.score_for(mover)), Ordering::SeqCst);

        self.visited.store(true, Ordering::SeqCst);
    }

    pub fn number_of_visits(&self) -> u32 {
        self.number_of_visits.load(Ordering::SeqCst)
    }

    /// Fraction of the points won by the player who moved into this state.
    pub fn win_rate(&self) -> Option<f64> {
        let number_of_visits = self.number_of_visits();
        if number_of_visits == 0 {
            return None;
        }

        let total_score = self.total_score.load(Ordering::SeqCst) as f64;
        Some(total_score / (2.0 * f64::from(number_of_visits)))
    }

    pub fn uct(&self, parent_number_of_visits: u32, exploration_factor: f64) -> f64 {
        // Potentially inaccurate due to the non-atomic loading of all of these values
        // But IMO not harmful to the guarantees of the search.
        let win_rate = match self.win_rate() {
            Some(win_rate) => win_rate,
            None => return f64::INFINITY,
        };

        let number_of_visits = f64::from(self.number_of_visits());
        let parent_number_of_visits = f64::from(parent_number_of_visits.max(1));
        let exploration_component =
            exploration_factor * (parent_number_of_visits.ln() / number_of_visits).sqrt();

        win_rate + exploration_component
    }

    pub fn is_visited(&self) -> bool {
        self.visited.load(Ordering::SeqCst)
    }

    pub fn set_fully_expanded(&self) {
        self.fully_expanded.store(true, Ordering::SeqCst);
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.fully_expanded.load(Ordering::SeqCst)
    }
}

impl Default for NodeMetadata {
    fn default() -> Self {
        Self::new()
    }
}
