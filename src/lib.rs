//! Parlor - persisted turn-based games driven by text commands
//!
//! Remote users play tic-tac-toe and hangman through asynchronous text
//! commands; every command loads the session from the store, runs the
//! rule engine, persists the result, and answers with a textual summary
//! plus a reference to a renderable snapshot.
//!
//! # Architecture
//!
//! - **Games**: board types, stored-form codecs, and win/draw/loss rules
//! - **Engine**: move validation, application, and terminal detection
//! - **Store**: SQLite persistence, one row per session, never deleted
//! - **Controller**: start / status / move / guess orchestration
//! - **Snapshot**: session-ID addressing for the external image renderer
//!
//! # Example
//!
//! ```no_run
//! use parlor::{GameKind, GameService, SessionStore};
//!
//! # fn example() -> anyhow::Result<()> {
//! let store = SessionStore::new("parlor.db".to_string())?;
//! store.run_migrations()?;
//!
//! let service = GameService::new(store, "http://localhost:8088");
//! let reply = service.start(GameKind::Tictactoe, "U123")?;
//! println!("{}", reply.text());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod db;
mod engine;
mod games;
mod session;
mod snapshot;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Lifecycle controller
pub use controller::{GameReply, GameService};

// Crate-level exports - Store
pub use db::{SessionStore, StoreError};

// Crate-level exports - Rule engine
pub use engine::{MoveRejection, PlayerMove, apply, play, validate};

// Crate-level exports - Game types
pub use games::{
    Cell, CodecError, GameBoard, GameKind, GridBoard, Mark, WordBoard, hangman, tictactoe,
};

// Crate-level exports - Session model
pub use session::{BOT_SENTINEL, Mode, Participant, Session, SessionId};

// Crate-level exports - Snapshot contract
pub use snapshot::{SnapshotError, SnapshotRef, SnapshotRenderer, parse_token};
