mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{Board, BoardParseError, CELL_COUNT, SIDE};
pub use bot_controller::{
    MoveScore, MoveSelectionError, best_score, minimax, score_moves, select_move,
};
pub use game_state::{GameError, GameState};
pub use types::{DEFAULT_COMPUTER_MARK, DEFAULT_HUMAN_MARK, Mark, Outcome, WinningLine};
pub use win_detector::{LINES, evaluate, outcome, winner, winning_line};
