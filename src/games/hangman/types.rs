//! Core domain types for the word game.

use serde::{Deserialize, Serialize};

/// Attempts a fresh game starts with.
pub const STARTING_ATTEMPTS: u8 = 6;

/// Word-guess state: the target word, the ordered guesses made so far,
/// and the remaining wrong guesses before the game is lost.
///
/// The word and every guess are lowercase `a`-`z`; guesses never repeat.
/// Both invariants are enforced by the rule engine before a guess is
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBoard {
    word: String,
    guesses: Vec<char>,
    remaining: u8,
}

impl WordBoard {
    /// Creates a fresh board for the given target word.
    pub fn new(word: String) -> Self {
        Self {
            word,
            guesses: Vec::new(),
            remaining: STARTING_ATTEMPTS,
        }
    }

    /// Rebuilds a board from its stored parts.
    pub(super) fn from_parts(word: String, guesses: Vec<char>, remaining: u8) -> Self {
        Self {
            word,
            guesses,
            remaining,
        }
    }

    /// The target word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Guesses made so far, in order.
    pub fn guesses(&self) -> &[char] {
        &self.guesses
    }

    /// Wrong guesses left before the game is lost.
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Checks if the letter has already been guessed.
    pub fn is_guessed(&self, letter: char) -> bool {
        self.guesses.contains(&letter)
    }

    /// Records a guess. A miss costs one attempt.
    ///
    /// The caller must have validated the letter: lowercase, not yet
    /// guessed, attempts remaining.
    pub(crate) fn record_guess(&mut self, letter: char) {
        self.guesses.push(letter);
        if !self.word.contains(letter) {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    /// The word with unguessed letters hidden, e.g. `c _ t`.
    pub fn masked_word(&self) -> String {
        let mut parts = Vec::with_capacity(self.word.len());
        for letter in self.word.chars() {
            if self.is_guessed(letter) {
                parts.push(letter.to_string());
            } else {
                parts.push("_".to_string());
            }
        }
        parts.join(" ")
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let guessed: String = self
            .guesses
            .iter()
            .map(|letter| letter.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Word: {}\nGuessed: [{}]\nAttempts left: {}",
            self.masked_word(),
            guessed,
            self.remaining
        )
    }
}
