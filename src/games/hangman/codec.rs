//! Stored-form codec for the word board.
//!
//! A board is three colon-separated fields: the target word, the guessed
//! letters in order, and the remaining-attempts counter, e.g. `cat:ca:5`.

use super::types::WordBoard;
use crate::games::CodecError;
use tracing::instrument;

/// Encodes a board into its `word:guesses:remaining` stored form.
#[instrument(skip(board))]
pub fn encode(board: &WordBoard) -> String {
    let guesses: String = board.guesses().iter().collect();
    format!("{}:{}:{}", board.word(), guesses, board.remaining())
}

/// Decodes a `word:guesses:remaining` stored form back into a board.
///
/// # Errors
///
/// Returns [`CodecError`] if the field layout is wrong, a letter falls
/// outside lowercase `a`-`z`, or the counter is not a small integer.
#[instrument]
pub fn decode(state: &str) -> Result<WordBoard, CodecError> {
    let fields: Vec<&str> = state.split(':').collect();
    let [word, guesses, remaining] = fields.as_slice() else {
        return Err(CodecError::WordShape);
    };

    if word.is_empty() {
        return Err(CodecError::WordShape);
    }
    if let Some(letter) = word.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(CodecError::WordLetter { letter });
    }
    if let Some(letter) = guesses.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(CodecError::WordLetter { letter });
    }

    let remaining: u8 = remaining.parse().map_err(|_| CodecError::WordAttempts {
        raw: remaining.to_string(),
    })?;

    Ok(WordBoard::from_parts(
        word.to_string(),
        guesses.chars().collect(),
        remaining,
    ))
}
