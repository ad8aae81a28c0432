use std::error::Error;
use std::io::Write;

use tictactoe_engine::tictactoe::{GameState, Outcome};
use tictactoe_engine::{log, log_debug, log_error};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Duration, sleep};

use crate::config::GameConfig;

#[derive(Debug, PartialEq, Eq)]
pub enum PlayerInput {
    Cell(usize),
    Reset,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> PlayerInput {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => PlayerInput::Quit,
        "r" | "reset" => PlayerInput::Reset,
        other => match other.parse::<usize>() {
            Ok(index) => PlayerInput::Cell(index),
            Err(_) => PlayerInput::Unknown(trimmed.to_string()),
        },
    }
}

pub fn status_message(game: &GameState) -> Option<String> {
    match game.status() {
        Outcome::InProgress => None,
        Outcome::Win(mark) if mark == game.human_mark() => Some(format!("{} won! You beat the computer.", mark)),
        Outcome::Win(mark) => Some(format!("{} won!", mark)),
        Outcome::Draw => Some("Pulled out a draw!".to_string()),
    }
}

fn render(game: &GameState) -> String {
    let mut out = game.board().to_string();
    if let Some(line) = game.winning_line() {
        let cells: Vec<String> = line.cells.iter().map(|c| c.to_string()).collect();
        out.push_str(&format!("Winning line: {}\n", cells.join("-")));
    }
    out
}

/// Interactive game on stdin/stdout until the player quits or input ends.
pub async fn run_game(cfg: &GameConfig) -> Result<(), Box<dyn Error>> {
    let input = BufReader::new(tokio::io::stdin());
    run_session(cfg, input, &mut std::io::stdout()).await
}

pub async fn run_session<R, W>(cfg: &GameConfig, input: R, out: &mut W) -> Result<(), Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut game = GameState::new(cfg.human_mark);
    let delay = Duration::from_millis(cfg.computer_move_delay_ms);
    let mut lines = input.lines();

    log!(
        "New game: human plays {}, computer plays {}",
        game.human_mark(),
        game.computer_mark()
    );
    writeln!(
        out,
        "You are {}. Enter a cell number (0-8), r to reset, q to quit.",
        game.human_mark()
    )?;

    loop {
        if game.is_computer_turn() {
            sleep(delay).await;
            match game.play_computer() {
                Ok((index, _)) => writeln!(out, "Computer plays {}", index)?,
                Err(e) => {
                    log_error!("Computer move failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        writeln!(out, "{}", render(&game))?;
        match status_message(&game) {
            Some(message) => {
                log!("Game over: {:?}", game.status());
                writeln!(out, "{}\nEnter r to play again or q to quit.", message)?;
            }
            None => writeln!(out, "Your move ({}):", game.human_mark())?,
        }
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            PlayerInput::Quit => break,
            PlayerInput::Reset => {
                game.reset();
                log_debug!("Board reset");
            }
            PlayerInput::Cell(_) if game.is_over() => {
                writeln!(out, "The game is over. Enter r to play again or q to quit.")?;
            }
            PlayerInput::Cell(index) => {
                if let Err(e) = game.play_human(index) {
                    writeln!(out, "Invalid move: {}", e)?;
                }
            }
            PlayerInput::Unknown(text) => writeln!(out, "Unrecognised input '{}'", text)?,
        }
    }

    log!("Leaving game");
    Ok(())
}
