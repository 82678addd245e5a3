pub mod tic_tac_toe;
pub mod ultimate_tic_tac_toe;
