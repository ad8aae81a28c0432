use std::fmt;
use std::time::Instant;

use crate::log_debug;
use super::board::{Board, CELL_COUNT};
use super::types::Mark;
use super::win_detector::evaluate;

const WIN_SCORE: i32 = 10;

/// Root score of placing the bot's mark at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveScore {
    pub index: usize,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSelectionError {
    NoLegalMove,
    GameAlreadyWon(Mark),
    InvalidBotMark,
    DepthOutOfRange(u32),
}

impl fmt::Display for MoveSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveSelectionError::NoLegalMove => write!(f, "No legal move: the board is full"),
            MoveSelectionError::GameAlreadyWon(mark) => {
                write!(f, "No move to select: {} has already won", mark)
            }
            MoveSelectionError::InvalidBotMark => write!(f, "Bot mark must be X or O"),
            MoveSelectionError::DepthOutOfRange(depth) => {
                write!(f, "Search depth {} exceeds {} plies", depth, CELL_COUNT)
            }
        }
    }
}

impl std::error::Error for MoveSelectionError {}

/// Picks the cell with the highest minimax score for `bot_mark`.
///
/// Ties go to the lowest index. The board is only read; the search runs on a
/// private copy.
pub fn select_move(board: &Board, bot_mark: Mark) -> Result<usize, MoveSelectionError> {
    let started = Instant::now();
    let scores = score_moves(board, bot_mark)?;
    let best = best_score(&scores).ok_or(MoveSelectionError::NoLegalMove)?;

    log_debug!(
        "{} plays {} (score {}) on {} after {:?}",
        bot_mark,
        best.index,
        best.score,
        board.to_compact_string(),
        started.elapsed()
    );
    Ok(best.index)
}

/// First entry with the strictly greatest score.
pub fn best_score(scores: &[MoveScore]) -> Option<MoveScore> {
    let mut best: Option<MoveScore> = None;
    for &candidate in scores {
        if best.is_none_or(|current| candidate.score > current.score) {
            best = Some(candidate);
        }
    }
    best
}

/// Scores every empty cell in ascending index order.
pub fn score_moves(board: &Board, bot_mark: Mark) -> Result<Vec<MoveScore>, MoveSelectionError> {
    let opponent_mark = bot_mark
        .opponent()
        .ok_or(MoveSelectionError::InvalidBotMark)?;

    for mark in [bot_mark, opponent_mark] {
        if evaluate(board, mark) {
            return Err(MoveSelectionError::GameAlreadyWon(mark));
        }
    }

    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return Err(MoveSelectionError::NoLegalMove);
    }

    let mut scratch = *board;
    let mut scores = Vec::with_capacity(available_moves.len());

    for index in available_moves {
        scratch.set(index, bot_mark);
        let score = search(&mut scratch, 0, false, bot_mark, opponent_mark);
        scratch.set(index, Mark::Empty);

        scores.push(MoveScore { index, score });
    }

    Ok(scores)
}

/// Optimal-play value of `board` from the bot's point of view.
///
/// `maximizing` is true when the bot is the side to move. Wins score
/// `10 - depth`, losses `depth - 10`, draws `0`. `depth` counts plies already
/// played and cannot exceed the number of cells.
pub fn minimax(
    board: &Board,
    depth: u32,
    maximizing: bool,
    bot_mark: Mark,
) -> Result<i32, MoveSelectionError> {
    let opponent_mark = bot_mark
        .opponent()
        .ok_or(MoveSelectionError::InvalidBotMark)?;
    if usize::try_from(depth).ok().is_none_or(|plies| plies > CELL_COUNT) {
        return Err(MoveSelectionError::DepthOutOfRange(depth));
    }
    let start_depth =
        i32::try_from(depth).map_err(|_| MoveSelectionError::DepthOutOfRange(depth))?;

    let mut scratch = *board;
    Ok(search(&mut scratch, start_depth, maximizing, bot_mark, opponent_mark))
}

fn search(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
) -> i32 {
    if evaluate(board, bot_mark) {
        return WIN_SCORE - depth;
    }
    if evaluate(board, opponent_mark) {
        return depth - WIN_SCORE;
    }
    if board.is_full() {
        return 0;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }
            board.set(index, bot_mark);
            let eval = search(board, depth + 1, false, bot_mark, opponent_mark);
            board.set(index, Mark::Empty);

            max_eval = max_eval.max(eval);
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in 0..CELL_COUNT {
            if !board.is_empty_at(index) {
                continue;
            }
            board.set(index, opponent_mark);
            let eval = search(board, depth + 1, true, bot_mark, opponent_mark);
            board.set(index, Mark::Empty);

            min_eval = min_eval.min(eval);
        }
        min_eval
    }
}
