//! Session domain model: one persisted game instance.

use crate::games::{GameBoard, GameKind, GridBoard, Mark, WordBoard, tictactoe};
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

/// Unique identifier for a game session, used externally to address the
/// rendered snapshot.
pub type SessionId = Uuid;

/// Coarse lifecycle stage of a session.
///
/// The string form of each variant is stored in the database and compared
/// directly by the game-over check, so the five names are load-bearing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Mode {
    /// Created, no move accepted yet.
    Start,
    /// At least one move accepted, no terminal condition reached.
    InProgress,
    /// A side completed a winning condition.
    WinState,
    /// Grid filled with no winning line.
    DrawState,
    /// Attempts exhausted before the word was revealed.
    GameOverState,
}

impl Mode {
    /// Checks if no further moves are accepted from this mode.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Mode::WinState | Mode::DrawState | Mode::GameOverState)
    }
}

/// One side of a session.
///
/// The bot is a dedicated variant rather than a reserved identifier so
/// turn-ownership checks stay total; the sentinel string only appears in
/// the stored row form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    /// A human, identified by an opaque external user ID.
    Human(String),
    /// The built-in opponent for single-player sessions.
    Bot,
}

/// Stored identifier for the bot side, kept for row compatibility with
/// the original data set.
pub const BOT_SENTINEL: &str = "U000000000";

impl Participant {
    /// Creates a human participant.
    pub fn human(user_id: impl Into<String>) -> Self {
        Participant::Human(user_id.into())
    }

    /// The identifier stored in the database for this participant.
    pub fn storage_id(&self) -> &str {
        match self {
            Participant::Human(user_id) => user_id,
            Participant::Bot => BOT_SENTINEL,
        }
    }

    /// Rebuilds a participant from its stored identifier.
    pub fn from_storage_id(id: &str) -> Self {
        if id == BOT_SENTINEL {
            Participant::Bot
        } else {
            Participant::Human(id.to_string())
        }
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Participant::Human(user_id) => write!(f, "{user_id}"),
            Participant::Bot => write!(f, "the bot"),
        }
    }
}

/// One active or completed game instance.
///
/// `session_id`, the participants, and `created_at` are fixed at
/// creation; the board, turn holder, and mode advance through the rule
/// engine. A terminal session is never reopened, a new game means a new
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Session {
    session_id: SessionId,
    board: GameBoard,
    turn_holder: Participant,
    mode: Mode,
    first_participant: Participant,
    second_participant: Participant,
    created_at: NaiveDateTime,
}

impl Session {
    /// Creates a session with a fresh ID in `Start` mode.
    #[instrument(skip(board, first_participant, second_participant, turn_holder))]
    pub fn new(
        board: GameBoard,
        first_participant: Participant,
        second_participant: Participant,
        turn_holder: Participant,
    ) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, kind = %board.kind(), "Creating new session");
        Self {
            session_id,
            board,
            turn_holder,
            mode: Mode::Start,
            first_participant,
            second_participant,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Creates a single-player grid session against the bot.
    ///
    /// The bot owns the first side and the human the second, with the
    /// human to move, matching the row layout of the original data set.
    #[instrument]
    pub fn new_tictactoe(user_id: &str) -> Self {
        let human = Participant::human(user_id);
        Self::new(
            GameBoard::Grid(GridBoard::new()),
            Participant::Bot,
            human.clone(),
            human,
        )
    }

    /// Creates a single-player word session for the given target word.
    #[instrument(skip(word))]
    pub fn new_hangman(user_id: &str, word: String) -> Self {
        let human = Participant::human(user_id);
        Self::new(
            GameBoard::Word(WordBoard::new(word)),
            human.clone(),
            Participant::Bot,
            human,
        )
    }

    /// Rebuilds a session from stored parts. Used by the store layer.
    pub(crate) fn from_parts(
        session_id: SessionId,
        board: GameBoard,
        turn_holder: Participant,
        mode: Mode,
        first_participant: Participant,
        second_participant: Participant,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            session_id,
            board,
            turn_holder,
            mode,
            first_participant,
            second_participant,
            created_at,
        }
    }

    /// Returns the game this session plays.
    pub fn kind(&self) -> GameKind {
        self.board.kind()
    }

    /// The participant owning the given grid side.
    pub fn participant_for(&self, mark: Mark) -> &Participant {
        match mark {
            Mark::First => &self.first_participant,
            Mark::Second => &self.second_participant,
        }
    }

    /// The grid side owned by the given participant, if they are in this
    /// session.
    pub fn mark_of(&self, participant: &Participant) -> Option<Mark> {
        if *participant == self.first_participant {
            Some(Mark::First)
        } else if *participant == self.second_participant {
            Some(Mark::Second)
        } else {
            None
        }
    }

    /// The opposing participant, if the given one is in this session.
    pub fn opponent_of(&self, participant: &Participant) -> Option<&Participant> {
        if *participant == self.first_participant {
            Some(&self.second_participant)
        } else if *participant == self.second_participant {
            Some(&self.first_participant)
        } else {
            None
        }
    }

    /// The winner of a `WinState` session, `None` otherwise.
    pub fn winner(&self) -> Option<&Participant> {
        if self.mode != Mode::WinState {
            return None;
        }
        match &self.board {
            GameBoard::Grid(board) => {
                tictactoe::check_winner(board).map(|mark| self.participant_for(mark))
            }
            // The word game is single-player; a win belongs to the human.
            GameBoard::Word(_) => Some(&self.first_participant),
        }
    }

    /// Advances the session to its successor state. Only the rule engine
    /// calls this.
    pub(crate) fn advance(&mut self, board: GameBoard, turn_holder: Participant, mode: Mode) {
        self.board = board;
        self.turn_holder = turn_holder;
        self.mode = mode;
    }
}
