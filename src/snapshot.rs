//! Snapshot addressing and the renderer contract.
//!
//! The image itself is drawn by an external collaborator; this module
//! owns the half of the contract the core is responsible for: forming
//! stable references from session IDs and validating inbound tokens
//! before they reach the store.

use crate::db::StoreError;
use crate::games::{GameBoard, GameKind};
use crate::session::SessionId;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Renders a decoded board into an image artifact.
///
/// Implementations live outside this crate; the session ID addressing
/// below guarantees that the board handed to `render` for a given token
/// is the same board that token referred to when it was issued.
pub trait SnapshotRenderer {
    /// The produced image artifact.
    type Image;

    /// Renders the board.
    fn render(&self, board: &GameBoard) -> Self::Image;
}

/// A stable reference to the rendered snapshot of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SnapshotRef {
    session_id: SessionId,
    url: String,
}

impl SnapshotRef {
    /// Forms the reference for a session, using the session ID as the
    /// final URL path segment.
    pub fn new(base_url: &str, kind: GameKind, session_id: SessionId) -> Self {
        let url = format!(
            "{}/game/{}/image/{}",
            base_url.trim_end_matches('/'),
            kind,
            session_id
        );
        Self { session_id, url }
    }
}

impl std::fmt::Display for SnapshotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Failure resolving a snapshot token to a board.
///
/// `InvalidToken` and `NotFound` are both Not-Found-class for the
/// transport: neither leaks whether a session exists.
#[derive(Debug, Clone, Display, Error)]
pub enum SnapshotError {
    /// The token is not a syntactically valid session ID.
    #[display("Not a valid snapshot token")]
    InvalidToken,
    /// No session exists for the token.
    #[display("No session for that token")]
    NotFound,
    /// The store failed while resolving the token.
    #[display("{_0}")]
    Store(#[error(source)] StoreError),
}

impl From<StoreError> for SnapshotError {
    fn from(err: StoreError) -> Self {
        SnapshotError::Store(err)
    }
}

/// Parses an inbound snapshot token into a session ID.
///
/// Syntactically invalid tokens fail here, before any store access.
///
/// # Errors
///
/// Returns [`SnapshotError::InvalidToken`] if the token is not
/// UUID-shaped.
#[instrument]
pub fn parse_token(token: &str) -> Result<SessionId, SnapshotError> {
    Uuid::parse_str(token).map_err(|_| {
        debug!(token, "Rejected malformed snapshot token");
        SnapshotError::InvalidToken
    })
}
