//! Command-line interface for parlor.

use clap::{Parser, Subcommand, ValueEnum};
use parlor::GameKind;

/// Parlor - persisted turn-based games driven by text commands
#[derive(Parser, Debug)]
#[command(name = "parlor")]
#[command(about = "Play persisted tic-tac-toe and hangman from the shell", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "parlor.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which game a command addresses
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum GameArg {
    /// 3x3 grid game
    Tictactoe,
    /// Word-guessing game
    Hangman,
}

impl From<GameArg> for GameKind {
    fn from(game: GameArg) -> Self {
        match game {
            GameArg::Tictactoe => GameKind::Tictactoe,
            GameArg::Hangman => GameKind::Hangman,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new game, or show the unfinished one
    Start {
        /// Game to start
        #[arg(value_enum)]
        game: GameArg,

        /// Your user ID
        #[arg(long)]
        user: String,
    },

    /// Show the current game without moving
    Status {
        /// Game to show
        #[arg(value_enum)]
        game: GameArg,

        /// Your user ID
        #[arg(long)]
        user: String,
    },

    /// Claim a tic-tac-toe cell (1-9, left to right, top to bottom)
    Move {
        /// Your user ID
        #[arg(long)]
        user: String,

        /// Cell number
        cell: u32,
    },

    /// Guess a hangman letter
    Guess {
        /// Your user ID
        #[arg(long)]
        user: String,

        /// The letter (a-z)
        letter: char,
    },

    /// Send a raw command string, the way the webhook transport would
    Send {
        /// Game the command addresses
        #[arg(value_enum)]
        game: GameArg,

        /// Your user ID
        #[arg(long)]
        user: String,

        /// Command text, e.g. "move 5" or "guess e"
        text: String,
    },

    /// Print the board behind a snapshot token
    Board {
        /// The snapshot token (session ID)
        token: String,
    },

    /// Check the service is alive
    Ping,
}
