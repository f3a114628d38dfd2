//! Win and loss detection for the word game.

use super::types::WordBoard;
use tracing::instrument;

/// Checks if every letter of the target word has been guessed.
#[instrument(skip(board))]
pub fn is_revealed(board: &WordBoard) -> bool {
    board.word().chars().all(|letter| board.is_guessed(letter))
}

/// Checks if the game is lost: attempts exhausted with letters still
/// hidden.
#[instrument(skip(board))]
pub fn is_exhausted(board: &WordBoard) -> bool {
    board.remaining() == 0 && !is_revealed(board)
}
