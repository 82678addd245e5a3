use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("could not parse move from {0:?}, expected four numbers \"R C r c\"")]
    Unparseable(String),

    #[error("coordinate {0} is outside of 0..3")]
    OutOfRange(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("box ({0}, {1}) is already closed")]
    ClosedBox(usize, usize),

    #[error("must play in box ({0}, {1})")]
    WrongBox(usize, usize),

    #[error("cell is already occupied")]
    Occupied,
}
