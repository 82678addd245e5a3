use anyhow::{bail, Context, Result};
use game_tree::games::ultimate_tic_tac_toe::{Move, UltimateTicTacToeState};
use game_tree::{GameTreeNode, NodeState, Outcome, Player};
use game_tree_strategy::Strategy;
use std::io::{BufRead, Write};

/// Plays ultimate tic-tac-toe between a person typing moves on `input` and
/// `bot`, rendering the board to `output` after every move.
pub fn play_interactive<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    bot: &mut dyn Strategy<UltimateTicTacToeState>,
    human: Player,
) -> Result<Outcome> {
    let mut state = UltimateTicTacToeState::new();
    loop {
        writeln!(output, "{}", state)?;

        let children = match state.calculate_state() {
            NodeState::Finished(outcome) => {
                match outcome {
                    Outcome::Win(winner) if winner == human => writeln!(output, "You win!")?,
                    Outcome::Win(_) => writeln!(output, "{} wins.", bot)?,
                    Outcome::Draw => writeln!(output, "Draw.")?,
                }
                return Ok(outcome);
            }
            NodeState::HasChildren(children) => children,
        };

        if state.current_player() == human {
            state = read_move(&mut input, &mut output, &state)?;
        } else {
            state = bot.select_child(&state, children);
            if let Some(mv) = state.last_move() {
                writeln!(output, "{} plays {}", bot, mv)?;
            }
        }
    }
}

fn read_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    state: &UltimateTicTacToeState,
) -> Result<UltimateTicTacToeState> {
    loop {
        match state.target_box() {
            Some((box_row, box_col)) => write!(
                output,
                "{} to move in box {} {}, enter \"R C r c\": ",
                state.current_player(),
                box_row,
                box_col
            )?,
            None => write!(
                output,
                "{} to move anywhere, enter \"R C r c\": ",
                state.current_player()
            )?,
        }
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("failed to read move")?;
        if read == 0 {
            bail!("input closed before the game finished");
        }

        match line.trim().parse::<Move>().and_then(|mv| state.play(mv)) {
            Ok(next) => return Ok(next),
            Err(err) => writeln!(output, "Invalid move: {}", err)?,
        }
    }
}
