use std::fmt;

use crate::{GameTreeNode, Outcome, Player};

const WIN_INDICES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [6, 4, 2],
];

/// The player owning three slots in a line, if any.
pub(crate) fn line_winner(slots: &[Option<Player>; 9]) -> Option<Player> {
    WIN_INDICES.iter().find_map(|&[a, b, c]| match slots[a] {
        Some(player) if slots[b] == Some(player) && slots[c] == Some(player) => Some(player),
        _ => None,
    })
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct TicTacToeState {
    /// The state of a game of tic-tac-toe can be
    /// represented as an length-9 array of slot states.
    board: [Option<Player>; 9],

    /// The player whose turn it is.
    current_player: Player,
}

impl TicTacToeState {
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current_player: Player::X,
        }
    }

    /// The owner of `index`, `None` if it is empty or off the board.
    pub fn slot(&self, index: usize) -> Option<Player> {
        self.board.get(index).copied().flatten()
    }

    /// Marks `index` for the current player. `None` if the slot is taken, out
    /// of range, or the game is over.
    pub fn place(&self, index: usize) -> Option<Self> {
        if index >= 9 || self.board[index].is_some() || self.outcome().is_some() {
            return None;
        }

        let mut board = self.board;
        board[index] = Some(self.current_player);
        Some(Self {
            board,
            current_player: self.current_player.next(),
        })
    }

    /// Plays `indices` in order from an empty board.
    pub fn from_moves(indices: &[usize]) -> Option<Self> {
        indices
            .iter()
            .try_fold(Self::new(), |state, &index| state.place(index))
    }

    fn winner(&self) -> Option<Player> {
        line_winner(&self.board)
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTreeNode for TicTacToeState {
    type Node = TicTacToeState;

    fn children(&self) -> Vec<Self::Node> {
        // No possible child states if there is a winner.
        if self.winner().is_some() {
            return vec![];
        }

        let mut child_nodes = vec![];

        for (i, slot) in self.board.iter().enumerate() {
            // Cannot play any actions if the slot is occupied.
            if slot.is_some() {
                continue;
            }

            let mut new_board = self.board;
            new_board[i] = Some(self.current_player);
            child_nodes.push(TicTacToeState {
                board: new_board,
                current_player: self.current_player.next(),
            });
        }

        child_nodes
    }

    fn current_player(&self) -> Player {
        self.current_player
    }

    fn outcome(&self) -> Option<Outcome> {
        if let Some(winner) = self.winner() {
            return Some(Outcome::Win(winner));
        }

        if self.board.iter().all(Option::is_some) {
            return Some(Outcome::Draw);
        }

        None
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board.chunks(3) {
            for slot in row {
                match slot {
                    Some(player) => write!(f, "{}", player)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
