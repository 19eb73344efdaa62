//! Session document storage.
//!
//! `SessionStore` is the seam to the document-database collaborator. It
//! exposes exactly the primitives the rest of the service relies on: point
//! reads, unconditional field updates for host progression, a transactional
//! read-modify-write for join, and an atomic numeric increment for scores.

mod memory;

pub use memory::MemoryStore;

use crate::types::{GameSession, GameStatus, Pin};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session {0} not found")]
    NotFound(Pin),
    #[error("session {0} already exists")]
    AlreadyExists(Pin),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Partial update of the host-owned progression fields. `None` leaves a
/// field untouched, mirroring a document-level field update.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressUpdate {
    pub status: Option<GameStatus>,
    pub current_question_index: Option<i64>,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session document. Fails if the PIN is already taken.
    async fn create(&self, session: GameSession) -> Result<(), StoreError>;

    /// Point read of a session document.
    async fn get(&self, pin: &str) -> Result<Option<GameSession>, StoreError>;

    /// Unconditional update of status and/or question index.
    async fn update_progress(&self, pin: &str, update: ProgressUpdate) -> Result<(), StoreError>;

    /// Transactional check-and-set: add `name` at score 0 if absent.
    ///
    /// Returns false, not an error, when the name is taken or the PIN does
    /// not resolve to a document; callers check existence first when they
    /// need to tell the two apart.
    async fn join_player(&self, pin: &str, name: &str) -> Result<bool, StoreError>;

    /// Atomic numeric increment of one player's score field.
    async fn increment_score(&self, pin: &str, name: &str, delta: i64) -> Result<(), StoreError>;
}
