use std::fmt;

use super::board::{Board, CELL_COUNT};
use super::bot_controller::{MoveSelectionError, select_move};
use super::types::{Mark, Outcome, WinningLine};
use super::win_detector::{outcome, winning_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    GameOver,
    NotYourTurn(Mark),
    OutOfBounds(usize),
    CellOccupied(usize),
    Bot(MoveSelectionError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "Game is already over"),
            GameError::NotYourTurn(mark) => write!(f, "It is not {}'s turn", mark),
            GameError::OutOfBounds(index) => {
                write!(f, "Cell {} is out of bounds (0-{})", index, CELL_COUNT - 1)
            }
            GameError::CellOccupied(index) => write!(f, "Cell {} is already marked", index),
            GameError::Bot(e) => write!(f, "Computer could not move: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Bot(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveSelectionError> for GameError {
    fn from(e: MoveSelectionError) -> Self {
        GameError::Bot(e)
    }
}

/// One human-versus-computer game. X always moves first.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    human_mark: Mark,
    computer_mark: Mark,
    current_mark: Mark,
    status: Outcome,
    last_move: Option<usize>,
}

impl GameState {
    /// Falls back to X for the human if `human_mark` is `Empty`.
    pub fn new(human_mark: Mark) -> Self {
        let computer_mark = human_mark.opponent().unwrap_or(Mark::O);
        let human_mark = computer_mark.opponent().unwrap_or(Mark::X);

        Self {
            board: Board::new(),
            human_mark,
            computer_mark,
            current_mark: Mark::X,
            status: Outcome::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> Outcome {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.is_over() && self.current_mark == self.computer_mark
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        winning_line(&self.board)
    }

    pub fn place_mark(&mut self, index: usize, mark: Mark) -> Result<Outcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        if mark != self.current_mark {
            return Err(GameError::NotYourTurn(mark));
        }

        if index >= CELL_COUNT {
            return Err(GameError::OutOfBounds(index));
        }

        if !self.board.is_empty_at(index) {
            return Err(GameError::CellOccupied(index));
        }

        self.board.set(index, mark);
        self.last_move = Some(index);
        self.status = outcome(&self.board);

        if self.status == Outcome::InProgress {
            self.switch_turn();
        }

        Ok(self.status)
    }

    pub fn play_human(&mut self, index: usize) -> Result<Outcome, GameError> {
        self.place_mark(index, self.human_mark)
    }

    /// Lets the engine choose and place the computer's mark.
    pub fn play_computer(&mut self) -> Result<(usize, Outcome), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.current_mark != self.computer_mark {
            return Err(GameError::NotYourTurn(self.computer_mark));
        }

        let index = select_move(&self.board, self.computer_mark)?;
        let status = self.place_mark(index, self.computer_mark)?;
        Ok((index, status))
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_mark = Mark::X;
        self.status = Outcome::InProgress;
        self.last_move = None;
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            _ => Mark::X,
        };
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(super::types::DEFAULT_HUMAN_MARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_x_moves_first() {
        let mut game = GameState::new(Mark::X);
        assert!(!game.is_computer_turn());
        assert_eq!(game.play_human(4), Ok(Outcome::InProgress));
        assert!(game.is_computer_turn());
        assert_eq!(game.last_move(), Some(4));
    }

    #[test]
    fn test_computer_x_moves_first() {
        let mut game = GameState::new(Mark::O);
        assert_eq!(game.computer_mark(), Mark::X);
        assert!(game.is_computer_turn());
        assert_eq!(game.play_human(0), Err(GameError::NotYourTurn(Mark::O)));

        let (index, status) = game.play_computer().unwrap();
        assert_eq!(index, 0);
        assert_eq!(status, Outcome::InProgress);
        assert_eq!(game.board().get(0), Some(Mark::X));
    }

    #[test]
    fn test_empty_human_mark_defaults_to_x() {
        let game = GameState::new(Mark::Empty);
        assert_eq!(game.human_mark(), Mark::X);
        assert_eq!(game.computer_mark(), Mark::O);
    }

    #[test]
    fn test_rejects_occupied_and_out_of_range_cells() {
        let mut game = GameState::default();
        game.play_human(4).unwrap();
        game.play_computer().unwrap();

        assert_eq!(game.play_human(4), Err(GameError::CellOccupied(4)));
        assert_eq!(game.play_human(9), Err(GameError::OutOfBounds(9)));
        assert_eq!(game.current_mark(), Mark::X);
    }

    #[test]
    fn test_computer_refuses_out_of_turn() {
        let mut game = GameState::default();
        assert_eq!(game.play_computer(), Err(GameError::NotYourTurn(Mark::O)));
    }

    #[test]
    fn test_computer_blocks_and_game_ends_in_draw() {
        let mut game = GameState::default();
        game.play_human(0).unwrap();
        let (reply, _) = game.play_computer().unwrap();
        assert_eq!(reply, 4);

        game.play_human(1).unwrap();
        let (block, _) = game.play_computer().unwrap();
        assert_eq!(block, 2);

        while !game.is_over() {
            let index = game.board().available_moves()[0];
            game.play_human(index).unwrap();
            if !game.is_over() {
                game.play_computer().unwrap();
            }
        }
        assert_ne!(game.status(), Outcome::Win(Mark::X));
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = GameState::new(Mark::O);
        for (index, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O)] {
            game.place_mark(index, mark).unwrap();
        }
        assert_eq!(game.place_mark(2, Mark::X), Ok(Outcome::Win(Mark::X)));
        assert!(game.is_over());
        assert!(!game.is_computer_turn());
        assert_eq!(game.winning_line().map(|line| line.cells), Some([0, 1, 2]));
        assert_eq!(game.place_mark(5, Mark::O), Err(GameError::GameOver));
        assert_eq!(game.play_computer(), Err(GameError::GameOver));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = GameState::default();
        game.play_human(4).unwrap();
        game.play_computer().unwrap();

        game.reset();
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.current_mark(), Mark::X);
        assert_eq!(game.status(), Outcome::InProgress);
        assert_eq!(game.last_move(), None);
    }
}
