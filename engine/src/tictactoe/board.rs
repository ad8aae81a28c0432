use std::fmt;
use std::str::FromStr;

use super::types::Mark;

pub const SIDE: usize = 3;
pub const CELL_COUNT: usize = SIDE * SIDE;

/// Row-major 3x3 grid, `index = row * 3 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn index_of(row: usize, col: usize) -> Option<usize> {
        if row >= SIDE || col >= SIDE {
            return None;
        }
        Some(row * SIDE + col)
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// Nine symbols on one line, readable back with `str::parse`.
    pub fn to_compact_string(&self) -> String {
        self.cells.iter().map(Mark::symbol).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let cells: Vec<String> = (0..SIDE)
                .map(|col| {
                    let index = row * SIDE + col;
                    match self.cells[index] {
                        Mark::Empty => format!(" {} ", index),
                        mark => format!(" {} ", mark),
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    InvalidSymbol { symbol: char, position: usize },
    WrongCellCount(usize),
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::InvalidSymbol { symbol, position } => {
                write!(f, "Invalid cell symbol '{}' at position {}", symbol, position)
            }
            BoardParseError::WrongCellCount(count) => {
                write!(f, "Board must have {} cells, got {}", CELL_COUNT, count)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut marks = Vec::with_capacity(CELL_COUNT);
        for (position, symbol) in s.chars().enumerate() {
            if symbol.is_whitespace() || matches!(symbol, '|' | ',' | '/') {
                continue;
            }
            let mark = Mark::from_symbol(symbol)
                .ok_or(BoardParseError::InvalidSymbol { symbol, position })?;
            marks.push(mark);
        }
        Board::try_from(marks.as_slice())
    }
}

impl TryFrom<&[Mark]> for Board {
    type Error = BoardParseError;

    fn try_from(marks: &[Mark]) -> Result<Self, Self::Error> {
        let cells: [Mark; CELL_COUNT] = marks
            .try_into()
            .map_err(|_| BoardParseError::WrongCellCount(marks.len()))?;
        Ok(Board::from_cells(cells))
    }
}

impl From<[Mark; CELL_COUNT]> for Board {
    fn from(cells: [Mark; CELL_COUNT]) -> Self {
        Board::from_cells(cells)
    }
}
