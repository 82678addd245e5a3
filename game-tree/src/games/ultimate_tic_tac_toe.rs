//! Ultimate tic-tac-toe: nine tic-tac-toe boxes laid out on a 3x3 grid.
//!
//! The cell a player picks inside a box sends the opponent to the box at the
//! same position on the big grid. Winning a box claims it, and claiming three
//! boxes in a line wins the game. Boxes that are claimed or full are closed;
//! being sent to a closed box lets the player move in any open box. Running
//! out of open boxes without a winner is a draw.

use std::fmt;
use std::str::FromStr;

use crate::games::tic_tac_toe::line_winner;
use crate::{GameTreeNode, MoveError, Outcome, Player};

/// A cell on the big board, addressed as `(box_row, box_col)` on the big grid
/// and `(row, col)` inside that box. Every coordinate is within `0..3`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    box_row: usize,
    box_col: usize,
    row: usize,
    col: usize,
}

impl Move {
    pub fn new(box_row: usize, box_col: usize, row: usize, col: usize) -> Result<Self, MoveError> {
        for &coordinate in &[box_row, box_col, row, col] {
            if coordinate >= 3 {
                return Err(MoveError::OutOfRange(coordinate));
            }
        }

        Ok(Self {
            box_row,
            box_col,
            row,
            col,
        })
    }

    pub fn box_row(&self) -> usize {
        self.box_row
    }

    pub fn box_col(&self) -> usize {
        self.box_col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    fn from_indices(box_index: usize, cell_index: usize) -> Self {
        Self {
            box_row: box_index / 3,
            box_col: box_index % 3,
            row: cell_index / 3,
            col: cell_index % 3,
        }
    }

    fn box_index(&self) -> usize {
        self.box_row * 3 + self.box_col
    }

    fn cell_index(&self) -> usize {
        self.row * 3 + self.col
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coordinates = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| MoveError::Unparseable(s.to_string()))?;

        match coordinates.as_slice() {
            &[box_row, box_col, row, col] => Move::new(box_row, box_col, row, col),
            _ => Err(MoveError::Unparseable(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.box_row, self.box_col, self.row, self.col)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct UltimateTicTacToeState {
    /// Cells of each box, both indexed row-major.
    cells: [[Option<Player>; 9]; 9],

    /// Owner of each box once somebody has three in a line inside it.
    owners: [Option<Player>; 9],

    /// Decides which box the current player is sent to.
    last_move: Option<Move>,

    current_player: Player,
}

impl UltimateTicTacToeState {
    pub fn new() -> Self {
        Self {
            cells: [[None; 9]; 9],
            owners: [None; 9],
            last_move: None,
            current_player: Player::X,
        }
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn cell(&self, mv: Move) -> Option<Player> {
        self.cells[mv.box_index()][mv.cell_index()]
    }

    pub fn box_owner(&self, box_row: usize, box_col: usize) -> Result<Option<Player>, MoveError> {
        for &coordinate in &[box_row, box_col] {
            if coordinate >= 3 {
                return Err(MoveError::OutOfRange(coordinate));
            }
        }
        Ok(self.owners[box_row * 3 + box_col])
    }

    fn is_box_closed(&self, box_index: usize) -> bool {
        self.owners[box_index].is_some() || self.cells[box_index].iter().all(Option::is_some)
    }

    /// The box the current player must play in, if the previous move
    /// restricts them to one.
    pub fn target_box(&self) -> Option<(usize, usize)> {
        let target = self.last_move?.cell_index();
        if self.is_box_closed(target) {
            return None;
        }
        Some((target / 3, target % 3))
    }

    fn winner(&self) -> Option<Player> {
        line_winner(&self.owners)
    }

    /// Legal moves ordered by box, then by cell.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.winner().is_some() {
            return vec![];
        }

        let boxes = match self.target_box() {
            Some((box_row, box_col)) => vec![box_row * 3 + box_col],
            None => (0..9).filter(|&b| !self.is_box_closed(b)).collect(),
        };

        let mut moves = vec![];
        for box_index in boxes {
            for (cell_index, cell) in self.cells[box_index].iter().enumerate() {
                if cell.is_none() {
                    moves.push(Move::from_indices(box_index, cell_index));
                }
            }
        }
        moves
    }

    pub fn play(&self, mv: Move) -> Result<Self, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameOver);
        }

        match self.target_box() {
            Some((box_row, box_col)) => {
                if (box_row, box_col) != (mv.box_row, mv.box_col) {
                    return Err(MoveError::WrongBox(box_row, box_col));
                }
            }
            None => {
                if self.is_box_closed(mv.box_index()) {
                    return Err(MoveError::ClosedBox(mv.box_row, mv.box_col));
                }
            }
        }

        if self.cell(mv).is_some() {
            return Err(MoveError::Occupied);
        }

        Ok(self.apply(mv))
    }

    fn apply(&self, mv: Move) -> Self {
        let mut next = self.clone();
        let box_index = mv.box_index();
        next.cells[box_index][mv.cell_index()] = Some(self.current_player);
        if let Some(owner) = line_winner(&next.cells[box_index]) {
            next.owners[box_index] = Some(owner);
        }
        next.last_move = Some(mv);
        next.current_player = self.current_player.next();
        next
    }
}

impl Default for UltimateTicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTreeNode for UltimateTicTacToeState {
    type Node = UltimateTicTacToeState;

    fn children(&self) -> Vec<Self::Node> {
        self.legal_moves()
            .into_iter()
            .map(|mv| self.apply(mv))
            .collect()
    }

    fn current_player(&self) -> Player {
        self.current_player
    }

    fn outcome(&self) -> Option<Outcome> {
        if let Some(winner) = self.winner() {
            return Some(Outcome::Win(winner));
        }

        if (0..9).all(|b| self.is_box_closed(b)) {
            return Some(Outcome::Draw);
        }

        None
    }
}

impl fmt::Display for UltimateTicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for big_row in 0..3 {
            if big_row > 0 {
                writeln!(f, "------+-------+------")?;
            }
            for row in 0..3 {
                for big_col in 0..3 {
                    if big_col > 0 {
                        write!(f, "| ")?;
                    }
                    for col in 0..3 {
                        let mv = Move::from_indices(big_row * 3 + big_col, row * 3 + col);
                        match self.cell(mv) {
                            Some(player) => write!(f, "{} ", player)?,
                            None => write!(f, ". ")?,
                        }
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(box_row: usize, box_col: usize, row: usize, col: usize) -> Move {
        Move::new(box_row, box_col, row, col).expect("valid coordinates")
    }

    fn play_all(moves: &[Move]) -> UltimateTicTacToeState {
        moves
            .iter()
            .fold(UltimateTicTacToeState::new(), |state, &m| {
                state.play(m).expect("legal move")
            })
    }

    #[test]
    fn first_move_can_be_anywhere() {
        let state = UltimateTicTacToeState::new();
        assert_eq!(state.legal_moves().len(), 81);
        assert_eq!(state.target_box(), None);
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn move_sends_opponent_to_matching_box() {
        let state = play_all(&[mv(1, 1, 0, 2)]);

        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.target_box(), Some((0, 2)));

        let moves = state.legal_moves();
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|m| (m.box_row, m.box_col) == (0, 2)));

        assert_eq!(state.play(mv(2, 2, 0, 0)), Err(MoveError::WrongBox(0, 2)));
    }

    #[test]
    fn occupied_cell_is_rejected() {
        // X plays the center of the center box, O is sent back there.
        let state = play_all(&[mv(1, 1, 1, 1)]);
        assert_eq!(state.play(mv(1, 1, 1, 1)), Err(MoveError::Occupied));
    }

    #[test]
    fn three_in_a_line_claims_box_and_closes_it() {
        #[rustfmt::skip]
        let state = play_all(&[
            mv(0, 0, 0, 0), mv(0, 0, 1, 1),
            mv(1, 1, 0, 0), mv(0, 0, 2, 2),
            mv(2, 2, 0, 0), mv(0, 0, 0, 1),
            mv(0, 1, 0, 0), mv(0, 0, 1, 0),
            mv(1, 0, 0, 0), mv(0, 0, 1, 2),
        ]);

        // O holds the middle row of the top-left box.
        assert_eq!(state.box_owner(0, 0), Ok(Some(Player::O)));

        // X is sent to box (1, 2), which is still open.
        assert_eq!(state.target_box(), Some((1, 2)));
        assert_eq!(state.play(mv(0, 0, 2, 0)), Err(MoveError::WrongBox(1, 2)));
    }

    #[test]
    fn sent_to_closed_box_plays_anywhere_open() {
        #[rustfmt::skip]
        let state = play_all(&[
            mv(0, 0, 0, 0), mv(0, 0, 1, 1),
            mv(1, 1, 0, 0), mv(0, 0, 2, 2),
            mv(2, 2, 0, 0), mv(0, 0, 0, 1),
            mv(0, 1, 0, 0), mv(0, 0, 1, 0),
            mv(1, 0, 0, 0), mv(0, 0, 1, 2),
            // X is sent to (1, 2) and plays its top-left cell, sending O to (0, 0).
            mv(1, 2, 0, 0),
        ]);

        assert_eq!(state.target_box(), None);
        let moves = state.legal_moves();
        assert!(moves.iter().all(|m| (m.box_row, m.box_col) != (0, 0)));
        assert_eq!(state.play(mv(0, 0, 2, 0)), Err(MoveError::ClosedBox(0, 0)));
        assert!(state.play(mv(2, 1, 1, 1)).is_ok());
    }

    #[test]
    fn three_boxes_in_a_line_wins_the_game() {
        let mut state = UltimateTicTacToeState::new();
        state.owners[0] = Some(Player::X);
        state.owners[4] = Some(Player::X);
        state.owners[8] = Some(Player::X);

        assert_eq!(state.outcome(), Some(Outcome::Win(Player::X)));
        assert!(state.legal_moves().is_empty());
        assert!(state.children().is_empty());
        assert_eq!(state.play(mv(0, 1, 0, 0)), Err(MoveError::GameOver));
    }

    #[test]
    fn all_boxes_closed_without_line_is_a_draw() {
        let mut state = UltimateTicTacToeState::new();
        #[rustfmt::skip]
        let owners = [
            Some(Player::X), Some(Player::O), Some(Player::X),
            Some(Player::X), Some(Player::O), Some(Player::O),
            Some(Player::O), Some(Player::X), Some(Player::X),
        ];
        state.owners = owners;

        assert_eq!(state.outcome(), Some(Outcome::Draw));
        assert!(state.children().is_empty());
    }

    #[test]
    fn children_follow_legal_moves() {
        let state = play_all(&[mv(2, 0, 1, 2)]);
        let children = state.children();
        let moves = state.legal_moves();

        assert_eq!(children.len(), moves.len());
        for (child, m) in children.iter().zip(moves) {
            assert_eq!(child.last_move(), Some(m));
            assert_eq!(child.cell(m), Some(Player::O));
            assert_eq!(child.current_player(), Player::X);
        }
    }

    #[test]
    fn coordinates_outside_the_board_are_rejected() {
        assert_eq!(Move::new(0, 0, 3, 0), Err(MoveError::OutOfRange(3)));
        assert_eq!(Move::new(5, 0, 0, 0), Err(MoveError::OutOfRange(5)));

        let m = mv(2, 1, 0, 2);
        assert_eq!((m.box_row(), m.box_col(), m.row(), m.col()), (2, 1, 0, 2));

        let state = UltimateTicTacToeState::new();
        assert_eq!(state.box_owner(0, 5), Err(MoveError::OutOfRange(5)));
        assert_eq!(state.box_owner(3, 0), Err(MoveError::OutOfRange(3)));
        assert_eq!(state.box_owner(1, 2), Ok(None));
    }

    #[test]
    fn parses_moves_from_text() {
        assert_eq!("1 2 0 1".parse::<Move>(), Ok(mv(1, 2, 0, 1)));
        assert_eq!("0,0, 2,2".parse::<Move>(), Ok(mv(0, 0, 2, 2)));
        assert_eq!("0 0 3 1".parse::<Move>(), Err(MoveError::OutOfRange(3)));
        assert_eq!(
            "0 1 2".parse::<Move>(),
            Err(MoveError::Unparseable("0 1 2".to_string()))
        );
        assert!("a b c d".parse::<Move>().is_err());
    }

    #[test]
    fn displays_moves_and_board() {
        let state = play_all(&[mv(0, 0, 0, 0)]);
        assert_eq!(mv(0, 0, 0, 0).to_string(), "0 0 0 0");

        let rendered = state.to_string();
        assert!(rendered.starts_with("X . . | . . . | . . ."));
        assert_eq!(rendered.lines().count(), 11);
    }
}
