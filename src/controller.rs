//! Session lifecycle controller.
//!
//! Orchestrates start / status / move / guess by combining the store
//! with the rule engine. Validation and lookup misses become ordinary
//! replies; only persistence failures surface as errors.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::db::{SessionStore, StoreError};
use crate::engine::{self, MoveRejection, PlayerMove};
use crate::games::{GameBoard, GameKind, hangman};
use crate::session::{Mode, Participant, Session};
use crate::snapshot::{self, SnapshotError, SnapshotRef};

/// Textual reply to a game command, with a reference to the session's
/// rendered snapshot when one applies.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct GameReply {
    text: String,
    snapshot: Option<SnapshotRef>,
}

impl GameReply {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            snapshot: None,
        }
    }

    fn with_snapshot(text: impl Into<String>, snapshot: SnapshotRef) -> Self {
        Self {
            text: text.into(),
            snapshot: Some(snapshot),
        }
    }
}

/// Per-`(game, participant)` locks serializing the load-mutate-store
/// sequence. Two near-simultaneous commands for the same participant
/// must not both read the same pre-move state; commands for different
/// participants proceed in parallel.
#[derive(Debug, Default)]
struct SessionLocks {
    inner: Mutex<HashMap<(GameKind, String), Arc<Mutex<()>>>>,
}

impl SessionLocks {
    fn acquire(&self, kind: GameKind, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.inner.lock().unwrap();
        locks
            .entry((kind, user_id.to_string()))
            .or_default()
            .clone()
    }
}

/// Orchestrates game commands over the store and rule engine.
#[derive(Debug)]
pub struct GameService {
    store: SessionStore,
    base_url: String,
    locks: SessionLocks,
}

impl GameService {
    /// Creates a service over the given store. `base_url` prefixes every
    /// snapshot reference.
    #[instrument(skip(store, base_url))]
    pub fn new(store: SessionStore, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            locks: SessionLocks::default(),
        }
    }

    /// Starts a game, or returns the unfinished one.
    ///
    /// A new session is created only when the participant has none or
    /// the latest is terminal; an unfinished session is returned
    /// unchanged with a message to finish it first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the session cannot be persisted.
    #[instrument(skip(self))]
    pub fn start(&self, kind: GameKind, user_id: &str) -> Result<GameReply, StoreError> {
        let lock = self.locks.acquire(kind, user_id);
        let _guard = lock.lock().unwrap();

        let participant = Participant::human(user_id);
        match self.store.get_latest(kind, &participant)? {
            None => {
                let session = self.fresh_session(kind, user_id);
                self.store.create(&session)?;
                info!(session_id = %session.session_id(), "Started first session");
                Ok(self.reply(&session, "Created a new clean game state"))
            }
            Some(previous) if previous.mode().is_terminal() => {
                let session = self.fresh_session(kind, user_id);
                self.store.create(&session)?;
                info!(
                    session_id = %session.session_id(),
                    previous_id = %previous.session_id(),
                    "Started replacement session"
                );
                Ok(self.reply(&session, "Created a new clean game state, last one is over"))
            }
            Some(active) => {
                debug!(session_id = %active.session_id(), "Unfinished session exists");
                Ok(self.reply(
                    &active,
                    "There's already existing a game, you have to finish it before starting a new",
                ))
            }
        }
    }

    /// Returns the latest session's summary without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database failure.
    #[instrument(skip(self))]
    pub fn status(&self, kind: GameKind, user_id: &str) -> Result<GameReply, StoreError> {
        let participant = Participant::human(user_id);
        match self.store.get_latest(kind, &participant)? {
            Some(session) => Ok(self.summary_reply(&session)),
            None => Ok(Self::no_game_reply(kind)),
        }
    }

    /// Plays a grid move. `cell_number` is the user-facing 1-based cell;
    /// it is translated to the 0-based internal index here, and any
    /// value outside 1-9 is a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting the accepted move fails.
    #[instrument(skip(self))]
    pub fn place(&self, user_id: &str, cell_number: u32) -> Result<GameReply, StoreError> {
        let player_move = cell_number
            .checked_sub(1)
            .filter(|index| *index < 9)
            .map(|index| PlayerMove::Place(index as usize))
            .ok_or(MoveRejection::CellOutOfRange);
        self.submit(GameKind::Tictactoe, user_id, player_move)
    }

    /// Plays a word guess.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting the accepted guess fails.
    #[instrument(skip(self))]
    pub fn guess(&self, user_id: &str, letter: char) -> Result<GameReply, StoreError> {
        self.submit(GameKind::Hangman, user_id, Ok(PlayerMove::Guess(letter)))
    }

    /// Runs one move through validate-apply-persist under the
    /// participant's lock. A rejection returns the reason verbatim and
    /// persists nothing.
    fn submit(
        &self,
        kind: GameKind,
        user_id: &str,
        player_move: Result<PlayerMove, MoveRejection>,
    ) -> Result<GameReply, StoreError> {
        let lock = self.locks.acquire(kind, user_id);
        let _guard = lock.lock().unwrap();

        let participant = Participant::human(user_id);
        let Some(session) = self.store.get_latest(kind, &participant)? else {
            return Ok(Self::no_game_reply(kind));
        };

        let player_move = match player_move {
            Ok(player_move) => player_move,
            Err(rejection) => {
                debug!(%rejection, "Move argument rejected before the engine");
                return Ok(self.reply(&session, rejection.to_string()));
            }
        };

        match engine::play(&session, &participant, &player_move) {
            Ok(next) => {
                self.store.update(&next)?;
                info!(session_id = %next.session_id(), mode = %next.mode(), "Move persisted");
                Ok(self.summary_reply(&next))
            }
            Err(rejection) => {
                warn!(session_id = %session.session_id(), %rejection, "Move rejected");
                Ok(self.reply(&session, rejection.to_string()))
            }
        }
    }

    /// Resolves a snapshot token to the board that produced it.
    ///
    /// Malformed tokens fail before the store is queried, with the same
    /// Not-Found-class error an unknown token gets.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] for malformed tokens, unknown sessions,
    /// or store failures.
    #[instrument(skip(self))]
    pub fn board_for_token(&self, token: &str) -> Result<GameBoard, SnapshotError> {
        let session_id = snapshot::parse_token(token)?;
        match self.store.get_by_id(&session_id)? {
            Some(session) => Ok(session.board().clone()),
            None => Err(SnapshotError::NotFound),
        }
    }

    /// Dispatches a raw command string the way the webhook transport
    /// would: `start`, `status`/`current`, `ping`, `help`, and the
    /// per-game move grammar (`move <n>` / `guess <letter>`). Anything
    /// else gets the help text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] from the underlying operation.
    #[instrument(skip(self))]
    pub fn dispatch(
        &self,
        kind: GameKind,
        user_id: &str,
        text: &str,
    ) -> Result<GameReply, StoreError> {
        match text.trim() {
            "start" => self.start(kind, user_id),
            "status" | "current" => self.status(kind, user_id),
            "ping" => Ok(Self::ping()),
            "help" => Ok(Self::help(kind)),
            other => {
                if kind == GameKind::Tictactoe {
                    if let Some(number) = other.strip_prefix("move ") {
                        if let Ok(cell_number) = number.trim().parse::<u32>() {
                            return self.place(user_id, cell_number);
                        }
                    }
                }
                if kind == GameKind::Hangman {
                    if let Some(letter) = other.strip_prefix("guess ") {
                        let mut chars = letter.trim().chars();
                        if let (Some(letter), None) = (chars.next(), chars.next()) {
                            return self.guess(user_id, letter);
                        }
                    }
                }
                debug!(command = other, "Unknown command, sending help");
                Ok(Self::help(kind))
            }
        }
    }

    /// Static liveness reply.
    pub fn ping() -> GameReply {
        GameReply::text_only("You lucky found the ping page")
    }

    /// Static usage text for a game.
    pub fn help(kind: GameKind) -> GameReply {
        let text = match kind {
            GameKind::Tictactoe => {
                "Tic-tac-toe commands:\n\
                 start - begin a new game against the bot\n\
                 move <1-9> - claim a cell, numbered left to right, top to bottom\n\
                 status - show the current game\n\
                 help - this message"
            }
            GameKind::Hangman => {
                "Hangman commands:\n\
                 start - begin a new game\n\
                 guess <a-z> - guess a letter\n\
                 status - show the current game\n\
                 help - this message"
            }
        };
        GameReply::text_only(text)
    }

    fn fresh_session(&self, kind: GameKind, user_id: &str) -> Session {
        match kind {
            GameKind::Tictactoe => Session::new_tictactoe(user_id),
            GameKind::Hangman => Session::new_hangman(user_id, hangman::random_word()),
        }
    }

    fn no_game_reply(kind: GameKind) -> GameReply {
        GameReply::text_only(format!(
            "You don't have a {kind} game yet, send 'start' to begin one"
        ))
    }

    fn snapshot_ref(&self, session: &Session) -> SnapshotRef {
        SnapshotRef::new(&self.base_url, session.kind(), *session.session_id())
    }

    /// A reply with a fixed message followed by the board text.
    fn reply(&self, session: &Session, message: impl Into<String>) -> GameReply {
        let text = format!("{}\n{}", message.into(), session.board().display());
        GameReply::with_snapshot(text, self.snapshot_ref(session))
    }

    /// The session's textual summary, worded by mode.
    fn summary_reply(&self, session: &Session) -> GameReply {
        let text = match (session.mode(), session.board()) {
            (Mode::WinState, GameBoard::Word(board)) => {
                format!("You guessed the word '{}'!", board.word())
            }
            (Mode::GameOverState, GameBoard::Word(board)) => format!(
                "Out of attempts, the word was '{}'\n{}",
                board.word(),
                board.display()
            ),
            (Mode::WinState, GameBoard::Grid(board)) => {
                let winner = match session.winner() {
                    Some(Participant::Bot) => "The bot won the game".to_string(),
                    Some(winner) => format!("{winner} won the game"),
                    None => "The game is won".to_string(),
                };
                format!("{}\n{}", winner, board.display())
            }
            (Mode::DrawState, board) => {
                format!("Game over, it's a draw\n{}", board.display())
            }
            (_, GameBoard::Word(board)) => {
                format!("{}\nGuess a letter", board.display())
            }
            (_, board) => {
                format!("{}\n{} to move", board.display(), session.turn_holder())
            }
        };
        GameReply::with_snapshot(text, self.snapshot_ref(session))
    }
}
