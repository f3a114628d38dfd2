//! 3x3 grid game: board types, stored-form codec, and win/draw rules.

mod codec;
mod rules;
mod types;

pub use codec::{decode, encode};
pub use rules::{check_winner, is_draw, is_full};
pub use types::{Cell, GridBoard, Mark};
