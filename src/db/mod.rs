//! Database persistence layer for game sessions.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::StoreError;
pub use models::SessionRow;
pub use repository::{MIGRATIONS, SessionStore};
