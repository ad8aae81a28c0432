use std::fmt;

use serde::{Deserialize, Serialize};

/// Mark the human plays unless configured otherwise.
pub const DEFAULT_HUMAN_MARK: Mark = Mark::X;
/// Mark the computer plays unless configured otherwise.
pub const DEFAULT_COMPUTER_MARK: Mark = Mark::O;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Mark> {
        match symbol {
            'x' | 'X' => Some(Mark::X),
            'o' | 'O' => Some(Mark::O),
            '.' | '-' | '_' => Some(Mark::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Mark),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// A completed line: the mark that owns it and its three cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_swaps_players() {
        assert_eq!(Mark::X.opponent(), Some(Mark::O));
        assert_eq!(Mark::O.opponent(), Some(Mark::X));
        assert_eq!(Mark::Empty.opponent(), None);
    }

    #[test]
    fn test_symbol_parsing_accepts_both_cases() {
        assert_eq!(Mark::from_symbol('x'), Some(Mark::X));
        assert_eq!(Mark::from_symbol('O'), Some(Mark::O));
        assert_eq!(Mark::from_symbol('_'), Some(Mark::Empty));
        assert_eq!(Mark::from_symbol('7'), None);
    }

    #[test]
    fn test_only_in_progress_is_not_terminal() {
        assert!(!Outcome::InProgress.is_terminal());
        assert!(Outcome::Draw.is_terminal());
        assert!(Outcome::Win(Mark::O).is_terminal());
    }
}
