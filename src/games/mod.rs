//! Game implementations and the board codec shared between them.

pub mod hangman;
pub mod tictactoe;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

pub use hangman::WordBoard;
pub use tictactoe::{Cell, GridBoard, Mark};

/// Which game a session belongs to.
///
/// The lowercase string form is used both as the store key and as the
/// path segment in snapshot references.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// 3x3 grid game.
    Tictactoe,
    /// Word-guessing game.
    Hangman,
}

/// Error decoding a stored board state.
///
/// Encoding is total; only `decode` can fail, and only on strings that
/// no encoder produced.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CodecError {
    /// Grid state with the wrong number of cells.
    #[display("grid state must be 9 symbols, got {len}")]
    GridLength {
        /// Number of symbols found.
        len: usize,
    },
    /// Grid state containing a symbol outside `0`/`1`/`2`.
    #[display("invalid cell symbol '{symbol}' at index {index}")]
    GridSymbol {
        /// The offending symbol.
        symbol: char,
        /// Row-major cell index.
        index: usize,
    },
    /// Word state without the three `word:guesses:remaining` fields.
    #[display("word state must have 3 colon-separated fields")]
    WordShape,
    /// Word state containing a letter outside lowercase `a`-`z`.
    #[display("invalid letter '{letter}' in word state")]
    WordLetter {
        /// The offending letter.
        letter: char,
    },
    /// Word state whose attempts counter is not a small integer.
    #[display("invalid attempts counter '{raw}'")]
    WordAttempts {
        /// The raw counter field.
        raw: String,
    },
}

/// A decoded logical board, either game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameBoard {
    /// Tic-tac-toe grid.
    Grid(GridBoard),
    /// Hangman word state.
    Word(WordBoard),
}

impl GameBoard {
    /// Returns the game this board belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            GameBoard::Grid(_) => GameKind::Tictactoe,
            GameBoard::Word(_) => GameKind::Hangman,
        }
    }

    /// Encodes the board into its compact stored form.
    pub fn encode(&self) -> String {
        match self {
            GameBoard::Grid(board) => tictactoe::encode(board),
            GameBoard::Word(board) => hangman::encode(board),
        }
    }

    /// Decodes a stored board state for the given game.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the string was not produced by [`encode`](Self::encode)
    /// for the same game kind.
    pub fn decode(kind: GameKind, state: &str) -> Result<Self, CodecError> {
        match kind {
            GameKind::Tictactoe => tictactoe::decode(state).map(GameBoard::Grid),
            GameKind::Hangman => hangman::decode(state).map(GameBoard::Word),
        }
    }

    /// Formats the board as human-readable text for replies.
    pub fn display(&self) -> String {
        match self {
            GameBoard::Grid(board) => board.display(),
            GameBoard::Word(board) => board.display(),
        }
    }
}
