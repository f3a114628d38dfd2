//! Session store backed by SQLite.
//!
//! Rows are created and updated, never deleted; historical sessions
//! stay addressable by ID so previously issued snapshot references keep
//! resolving.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::SessionRow;
use crate::db::{StoreError, schema};
use crate::games::GameKind;
use crate::session::{Participant, Session, SessionId};

/// Embedded schema migrations, applied at startup and in tests.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Session store keyed by session ID.
#[derive(Debug, Clone)]
pub struct SessionStore {
    db_path: String,
}

impl SessionStore {
    /// Creates a store connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Creating SessionStore");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migration failed: {}", e)))?;
        info!("Migrations applied");
        Ok(())
    }

    /// Persists a new session and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails.
    #[instrument(skip(self, session), fields(session_id = %session.session_id()))]
    pub fn create(&self, session: &Session) -> Result<SessionId, StoreError> {
        debug!("Creating session row");
        let mut conn = self.connection()?;

        let row = SessionRow::from_domain(session);
        diesel::insert_into(schema::sessions::table)
            .values(&row)
            .execute(&mut conn)?;

        info!(session_id = %session.session_id(), kind = %session.kind(), "Session created");
        Ok(*session.session_id())
    }

    /// Gets the most recently created session for a participant in a
    /// game, regardless of its mode. Callers decide whether it is
    /// reusable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database failure; a missing session is
    /// `Ok(None)`.
    #[instrument(skip(self, participant), fields(participant = %participant))]
    pub fn get_latest(
        &self,
        kind: GameKind,
        participant: &Participant,
    ) -> Result<Option<Session>, StoreError> {
        use schema::sessions::dsl;

        debug!("Looking up latest session");
        let mut conn = self.connection()?;
        let id = participant.storage_id();

        let row = dsl::sessions
            .filter(dsl::game_kind.eq(kind.to_string()))
            .filter(
                dsl::first_participant
                    .eq(id)
                    .or(dsl::second_participant.eq(id)),
            )
            .order(dsl::created_at.desc())
            .first::<SessionRow>(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                let session = row.into_domain()?;
                debug!(session_id = %session.session_id(), mode = %session.mode(), "Latest session found");
                Ok(Some(session))
            }
            None => {
                debug!("No session for participant");
                Ok(None)
            }
        }
    }

    /// Gets a session by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database failure; an unknown ID is
    /// `Ok(None)`.
    #[instrument(skip(self))]
    pub fn get_by_id(&self, session_id: &SessionId) -> Result<Option<Session>, StoreError> {
        use schema::sessions::dsl;

        debug!(%session_id, "Looking up session by id");
        let mut conn = self.connection()?;

        let row = dsl::sessions
            .find(session_id.to_string())
            .first::<SessionRow>(&mut conn)
            .optional()?;

        row.map(SessionRow::into_domain).transpose()
    }

    /// Replaces the mutable state of an existing session.
    ///
    /// Only `board_state`, `turn_holder`, and `mode` are written; the
    /// ID, participants, and creation time never change after create.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails or no row exists for
    /// the session's ID.
    #[instrument(skip(self, session), fields(session_id = %session.session_id()))]
    pub fn update(&self, session: &Session) -> Result<(), StoreError> {
        use schema::sessions::dsl;

        debug!(mode = %session.mode(), "Updating session row");
        let mut conn = self.connection()?;

        let updated = diesel::update(dsl::sessions.find(session.session_id().to_string()))
            .set((
                dsl::board_state.eq(session.board().encode()),
                dsl::turn_holder.eq(session.turn_holder().storage_id()),
                dsl::mode.eq(session.mode().to_string()),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(StoreError::new(format!(
                "No session row to update for '{}'",
                session.session_id()
            )));
        }

        info!(session_id = %session.session_id(), mode = %session.mode(), "Session updated");
        Ok(())
    }
}
