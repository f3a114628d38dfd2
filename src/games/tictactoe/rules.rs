//! Win and draw detection for the grid game.
//!
//! Pure functions over the board, separated from board storage so the
//! rule engine can evaluate any decoded state.

use super::types::{Cell, GridBoard, Mark};
use tracing::instrument;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals, as row-major
/// cell indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` for the side owning the first fully-occupied
/// line, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &GridBoard) -> Option<Mark> {
    for [a, b, c] in LINES {
        let cell = board.get(a);
        if let Some(Cell::Taken(mark)) = cell {
            if cell == board.get(b) && cell == board.get(c) {
                return Some(mark);
            }
        }
    }
    None
}

/// Checks if every cell is occupied.
pub fn is_full(board: &GridBoard) -> bool {
    board.cells().iter().all(|cell| *cell != Cell::Empty)
}

/// Checks for a draw: full board with no winning line.
#[instrument(skip(board))]
pub fn is_draw(board: &GridBoard) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(state: &str) -> GridBoard {
        super::super::codec::decode(state).expect("Decode failed")
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&GridBoard::new()), None);
    }

    #[test]
    fn test_winner_every_line() {
        for line in LINES {
            let mut board = GridBoard::new();
            for index in line {
                board.set(index, Cell::Taken(Mark::First));
            }
            assert_eq!(check_winner(&board), Some(Mark::First), "line {line:?}");
        }
    }

    #[test]
    fn test_winner_second_side() {
        let board = board_from("222110010");
        assert_eq!(check_winner(&board), Some(Mark::Second));
    }

    #[test]
    fn test_no_winner_incomplete_line() {
        let board = board_from("110000000");
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_draw_full_board_no_line() {
        // 1|2|1
        // 1|2|2
        // 2|1|1
        let board = board_from("121122211");
        assert_eq!(check_winner(&board), None);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_when_winner_exists() {
        let board = board_from("111221212");
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
