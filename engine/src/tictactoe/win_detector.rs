use super::board::Board;
use super::types::{Mark, Outcome, WinningLine};

/// Rows, columns, then the two diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// True iff `mark` owns all three cells of some line.
pub fn evaluate(board: &Board, mark: Mark) -> bool {
    let cells = board.cells();
    LINES
        .iter()
        .any(|&[a, b, c]| cells[a] == mark && cells[b] == mark && cells[c] == mark)
}

pub fn winning_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let mark = cells[a];
        if mark != Mark::Empty && cells[b] == mark && cells[c] == mark {
            Some(WinningLine::new(mark, line))
        } else {
            None
        }
    })
}

pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|line| line.mark)
}

pub fn outcome(board: &Board) -> Outcome {
    if let Some(mark) = winner(board) {
        return Outcome::Win(mark);
    }
    if board.is_full() {
        return Outcome::Draw;
    }
    Outcome::InProgress
}
