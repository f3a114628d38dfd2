//! Target-word selection for new games.

use rand::seq::SliceRandom;
use tracing::instrument;

/// Embedded word list. All lowercase `a`-`z`, 3 to 9 letters.
const WORDS: &[&str] = &[
    "anchor", "banana", "bridge", "cactus", "candle", "canyon", "carpet",
    "castle", "cherry", "circle", "copper", "cricket", "dolphin", "dragon",
    "fabric", "falcon", "garden", "guitar", "hammer", "harbor", "island",
    "jungle", "lantern", "magnet", "marble", "meadow", "mirror", "monkey",
    "mountain", "needle", "orange", "pepper", "planet", "pocket", "rabbit",
    "rocket", "saddle", "silver", "spider", "stream", "temple", "thunder",
    "tunnel", "velvet", "violin", "walnut", "window", "winter", "wizard",
    "yellow",
];

/// Picks a random target word for a new game.
#[instrument]
pub fn random_word() -> String {
    let mut rng = rand::thread_rng();
    WORDS
        .choose(&mut rng)
        .copied()
        .unwrap_or("lantern")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_words_are_lowercase_ascii() {
        for word in WORDS {
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "word '{word}' has a non a-z letter"
            );
            assert!(word.len() >= 3, "word '{word}' too short");
        }
    }

    #[test]
    fn test_random_word_comes_from_list() {
        for _ in 0..10 {
            let word = random_word();
            assert!(WORDS.contains(&word.as_str()));
        }
    }
}
