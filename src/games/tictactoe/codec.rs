//! Stored-form codec for the grid board.
//!
//! A board is exactly nine symbols, one per cell in row-major order:
//! `0` empty, `1` first participant, `2` second participant.

use super::types::{Cell, GridBoard, Mark};
use crate::games::CodecError;
use tracing::instrument;

/// Encodes a board into its 9-character stored form.
#[instrument(skip(board))]
pub fn encode(board: &GridBoard) -> String {
    board
        .cells()
        .iter()
        .map(|cell| match cell {
            Cell::Empty => '0',
            Cell::Taken(Mark::First) => '1',
            Cell::Taken(Mark::Second) => '2',
        })
        .collect()
}

/// Decodes a 9-character stored form back into a board.
///
/// # Errors
///
/// Returns [`CodecError`] if the string is not exactly nine symbols or
/// contains a symbol outside `0`/`1`/`2`.
#[instrument]
pub fn decode(state: &str) -> Result<GridBoard, CodecError> {
    let symbols: Vec<char> = state.chars().collect();
    if symbols.len() != 9 {
        return Err(CodecError::GridLength {
            len: symbols.len(),
        });
    }

    let mut board = GridBoard::new();
    for (index, symbol) in symbols.into_iter().enumerate() {
        let cell = match symbol {
            '0' => Cell::Empty,
            '1' => Cell::Taken(Mark::First),
            '2' => Cell::Taken(Mark::Second),
            _ => return Err(CodecError::GridSymbol { symbol, index }),
        };
        board.set(index, cell);
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_encodes_to_zeros() {
        assert_eq!(encode(&GridBoard::new()), "000000000");
    }

    #[test]
    fn test_round_trip_mixed_board() {
        let mut board = GridBoard::new();
        board.set(0, Cell::Taken(Mark::First));
        board.set(4, Cell::Taken(Mark::Second));
        board.set(8, Cell::Taken(Mark::First));

        let state = encode(&board);
        assert_eq!(state, "100020001");
        assert_eq!(decode(&state).expect("Decode failed"), board);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            decode("0000"),
            Err(CodecError::GridLength { len: 4 })
        );
        assert_eq!(
            decode("0000000000"),
            Err(CodecError::GridLength { len: 10 })
        );
    }

    #[test]
    fn test_decode_rejects_bad_symbol() {
        assert_eq!(
            decode("00000x000"),
            Err(CodecError::GridSymbol {
                symbol: 'x',
                index: 5
            })
        );
    }
}
