use std::fmt;

/// One of the two players of a game. `X` always moves first.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Player {
    X = 0,
    O = 1,
}

impl Player {
    pub fn next(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}
