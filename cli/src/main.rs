mod commands;
mod config;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe_engine::log_error;
use tictactoe_engine::logger::{self, LogLevel};
use tictactoe_engine::tictactoe::{Board, DEFAULT_COMPUTER_MARK, Mark};

use config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a perfect-play computer")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[arg(long)]
    use_log_prefix: bool,

    /// Log every engine decision.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive game (default).
    Play,
    /// Print the cell the computer would play, e.g. `xx..o....`.
    BestMove {
        board: Board,
        #[arg(long, value_enum)]
        bot_mark: Option<BotMark>,
    },
    /// Show the minimax score of every legal move.
    Analyze {
        board: Board,
        #[arg(long, value_enum)]
        bot_mark: Option<BotMark>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BotMark {
    X,
    O,
}

impl From<BotMark> for Mark {
    fn from(mark: BotMark) -> Self {
        match mark {
            BotMark::X => Mark::X,
            BotMark::O => Mark::O,
        }
    }
}

fn bot_mark_or_default(bot_mark: Option<BotMark>) -> Mark {
    bot_mark.map(Mark::from).unwrap_or(DEFAULT_COMPUTER_MARK)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Play);

    // Only the interactive game needs a valid config; queries fall back to defaults.
    let (config, config_error) = match command {
        Command::Play => (config::get_config_manager(&args.config).get_config()?, None),
        _ => config::load_or_default(&args.config),
    };

    let prefix = if args.use_log_prefix || config.log.use_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    let level = if args.verbose { LogLevel::Debug } else { config.log.level };
    logger::init_logger(prefix, level);

    if let Some(e) = config_error {
        log_error!("Ignoring config {}: {}", args.config.display(), e);
    }

    match command {
        Command::Play => runner::run_game(&config.game).await?,
        Command::BestMove { board, bot_mark } => {
            commands::best_move(&board, bot_mark_or_default(bot_mark))?;
        }
        Command::Analyze { board, bot_mark } => {
            commands::analyze(&board, bot_mark_or_default(bot_mark))?;
        }
    }

    Ok(())
}
