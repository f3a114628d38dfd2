//! Database row model for sessions and its domain conversions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use tracing::instrument;
use uuid::Uuid;

use crate::db::{StoreError, schema};
use crate::games::{GameBoard, GameKind};
use crate::session::{Mode, Participant, Session};

/// Stored form of a [`Session`]: every field flattened to text via the
/// board codec and the fixed enum string forms.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::sessions)]
pub struct SessionRow {
    session_id: String,
    game_kind: String,
    board_state: String,
    turn_holder: String,
    mode: String,
    first_participant: String,
    second_participant: String,
    created_at: NaiveDateTime,
}

impl SessionRow {
    /// Encodes a domain session into its row form.
    #[instrument(skip(session), fields(session_id = %session.session_id()))]
    pub fn from_domain(session: &Session) -> Self {
        Self {
            session_id: session.session_id().to_string(),
            game_kind: session.kind().to_string(),
            board_state: session.board().encode(),
            turn_holder: session.turn_holder().storage_id().to_string(),
            mode: session.mode().to_string(),
            first_participant: session.first_participant().storage_id().to_string(),
            second_participant: session.second_participant().storage_id().to_string(),
            created_at: *session.created_at(),
        }
    }

    /// Decodes a row back into a domain session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if any stored field fails to decode; a row
    /// this crate wrote always decodes.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn into_domain(self) -> Result<Session, StoreError> {
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| StoreError::new(format!("Invalid session id: {}", e)))?;
        let kind: GameKind = self
            .game_kind
            .parse()
            .map_err(|_| StoreError::new(format!("Unknown game kind '{}'", self.game_kind)))?;
        let board = GameBoard::decode(kind, &self.board_state)
            .map_err(|e| StoreError::new(format!("Corrupt board state: {}", e)))?;
        let mode: Mode = self
            .mode
            .parse()
            .map_err(|_| StoreError::new(format!("Unknown mode '{}'", self.mode)))?;

        Ok(Session::from_parts(
            session_id,
            board,
            Participant::from_storage_id(&self.turn_holder),
            mode,
            Participant::from_storage_id(&self.first_participant),
            Participant::from_storage_id(&self.second_participant),
            self.created_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_round_trip_tictactoe() {
        let session = Session::new_tictactoe("U123");
        let row = SessionRow::from_domain(&session);
        let restored = row.into_domain().expect("Decode failed");
        assert_eq!(restored, session);
    }

    #[test]
    fn test_row_round_trip_hangman() {
        let session = Session::new_hangman("U456", "lantern".to_string());
        let row = SessionRow::from_domain(&session);
        let restored = row.into_domain().expect("Decode failed");
        assert_eq!(restored, session);
    }

    #[test]
    fn test_fresh_tictactoe_row_shape() {
        let session = Session::new_tictactoe("U123");
        let row = SessionRow::from_domain(&session);
        assert_eq!(row.board_state, "000000000");
        assert_eq!(row.mode, "Start");
        assert_eq!(row.game_kind, "tictactoe");
        assert_eq!(row.first_participant, crate::session::BOT_SENTINEL);
        assert_eq!(row.second_participant, "U123");
        assert_eq!(row.turn_holder, "U123");
    }
}
