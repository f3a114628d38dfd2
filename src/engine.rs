//! Rule engine: move validation, application, and terminal detection.
//!
//! Every function here is a pure function of the session value passed
//! in. Persistence is the controller's job; nothing in this module does
//! I/O.

use crate::games::{Cell, GameBoard, Mark, hangman, tictactoe};
use crate::session::{Mode, Participant, Session};
use derive_more::{Display, Error};
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

/// A proposed move, already translated to the internal convention:
/// cell indices are 0-based, letters lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    /// Claim the grid cell at the given row-major index (0-8).
    Place(usize),
    /// Guess a letter of the target word.
    Guess(char),
}

/// Why a proposed move was rejected.
///
/// The display text is surfaced to the player verbatim, so each message
/// reads as a complete sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejection {
    /// Actor is not the turn holder.
    #[display("It's not your turn to move")]
    NotYourTurn,
    /// Session mode is terminal.
    #[display("The game is already finished, start a new one")]
    GameFinished,
    /// Target cell is occupied.
    #[display("That cell is already taken, pick an empty one")]
    CellTaken,
    /// Cell number outside 1-9 (0-8 internally).
    #[display("The move number must be between 1 and 9")]
    CellOutOfRange,
    /// Letter was guessed before.
    #[display("You already guessed that letter")]
    LetterRepeated,
    /// Guess is not a lowercase letter.
    #[display("A guess must be a single letter from a to z")]
    LetterOutOfRange,
    /// Move kind does not belong to the session's game.
    #[display("That move does not belong to this game")]
    WrongGame,
}

/// Validates a proposed move against the current session state.
///
/// # Errors
///
/// Returns the first applicable [`MoveRejection`]; terminal mode is
/// checked before anything else, so finished sessions reject every
/// actor and move.
#[instrument(skip(session), fields(session_id = %session.session_id(), mode = %session.mode()))]
pub fn validate(
    session: &Session,
    actor: &Participant,
    player_move: &PlayerMove,
) -> Result<(), MoveRejection> {
    if session.mode().is_terminal() {
        debug!("Rejected: session is terminal");
        return Err(MoveRejection::GameFinished);
    }
    if actor != session.turn_holder() {
        debug!(%actor, turn_holder = %session.turn_holder(), "Rejected: not the turn holder");
        return Err(MoveRejection::NotYourTurn);
    }

    match (session.board(), player_move) {
        (GameBoard::Grid(board), PlayerMove::Place(index)) => {
            if *index > 8 {
                return Err(MoveRejection::CellOutOfRange);
            }
            if !board.is_empty(*index) {
                return Err(MoveRejection::CellTaken);
            }
            Ok(())
        }
        (GameBoard::Word(board), PlayerMove::Guess(letter)) => {
            if !letter.is_ascii_lowercase() {
                return Err(MoveRejection::LetterOutOfRange);
            }
            if board.is_guessed(*letter) {
                return Err(MoveRejection::LetterRepeated);
            }
            Ok(())
        }
        _ => Err(MoveRejection::WrongGame),
    }
}

/// Applies a validated move, returning the successor session.
///
/// A grid move claims the cell for the turn holder's side and flips the
/// turn; a word guess records the letter, costs an attempt on a miss,
/// and leaves the turn holder unchanged. The mode is recomputed after
/// every application.
#[instrument(skip(session), fields(session_id = %session.session_id()))]
pub fn apply(session: &Session, player_move: &PlayerMove) -> Session {
    let mut next = session.clone();
    let actor = session.turn_holder().clone();

    match (session.board(), player_move) {
        (GameBoard::Grid(board), PlayerMove::Place(index)) => {
            // Sides are positional, so the turn holder's mark is total.
            let mark = if actor == *session.first_participant() {
                Mark::First
            } else {
                Mark::Second
            };
            let mut board = board.clone();
            board.set(*index, Cell::Taken(mark));

            let board = GameBoard::Grid(board);
            let mode = next_mode(&board);
            let turn_holder = match session.opponent_of(&actor) {
                Some(opponent) => opponent.clone(),
                None => actor,
            };
            next.advance(board, turn_holder, mode);
        }
        (GameBoard::Word(board), PlayerMove::Guess(letter)) => {
            let mut board = board.clone();
            board.record_guess(*letter);

            let board = GameBoard::Word(board);
            let mode = next_mode(&board);
            next.advance(board, actor, mode);
        }
        _ => {
            // Unreachable after validate; leave the session untouched
            // rather than corrupt it.
            warn!("apply called with a move for the wrong game");
        }
    }

    next
}

/// Validates and applies a move, then resolves any bot reply.
///
/// When the successor session is non-terminal with the bot holding the
/// turn, the bot's move runs through the same [`apply`] path, it is
/// just another actor.
///
/// # Errors
///
/// Returns [`MoveRejection`] from validation; nothing is applied on
/// rejection.
#[instrument(skip(session), fields(session_id = %session.session_id()))]
pub fn play(
    session: &Session,
    actor: &Participant,
    player_move: &PlayerMove,
) -> Result<Session, MoveRejection> {
    validate(session, actor, player_move)?;
    let mut next = apply(session, player_move);

    while *next.turn_holder() == Participant::Bot && !next.mode().is_terminal() {
        let Some(reply) = bot_reply(&next) else {
            break;
        };
        debug!(?reply, "Resolving bot reply");
        next = apply(&next, &reply);
    }

    Ok(next)
}

/// Picks the bot's reply move: a random empty cell. The word game's bot
/// never holds the turn, so only grid boards produce a reply.
#[instrument(skip(session), fields(session_id = %session.session_id()))]
fn bot_reply(session: &Session) -> Option<PlayerMove> {
    match session.board() {
        GameBoard::Grid(board) => {
            let empty = board.empty_cells();
            let mut rng = rand::thread_rng();
            empty.choose(&mut rng).map(|index| PlayerMove::Place(*index))
        }
        GameBoard::Word(_) => None,
    }
}

/// Recomputes the mode for a board that just received a move.
fn next_mode(board: &GameBoard) -> Mode {
    match board {
        GameBoard::Grid(board) => {
            if tictactoe::check_winner(board).is_some() {
                Mode::WinState
            } else if tictactoe::is_full(board) {
                Mode::DrawState
            } else {
                Mode::InProgress
            }
        }
        GameBoard::Word(board) => {
            if hangman::is_revealed(board) {
                Mode::WinState
            } else if hangman::is_exhausted(board) {
                Mode::GameOverState
            } else {
                Mode::InProgress
            }
        }
    }
}
