//! Word-guessing game: word state, stored-form codec, win/loss rules,
//! and target-word selection.

mod codec;
mod rules;
mod types;
mod words;

pub use codec::{decode, encode};
pub use rules::{is_exhausted, is_revealed};
pub use types::{STARTING_ATTEMPTS, WordBoard};
pub use words::random_word;
