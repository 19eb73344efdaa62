//! In-memory store backend.
//!
//! The `RwLock` write guard stands in for the document database's
//! transaction isolation: every mutating operation below is one isolated
//! read-modify-write over the session map, so join's check-and-set and the
//! score increment get the same guarantees a real backend would provide
//! natively.

use super::{ProgressUpdate, SessionStore, StoreError};
use crate::types::GameSession;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<RwLock<HashMap<String, GameSession>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, session: GameSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.pin) {
            return Err(StoreError::AlreadyExists(session.pin.clone()));
        }
        sessions.insert(session.pin.clone(), session);
        Ok(())
    }

    async fn get(&self, pin: &str) -> Result<Option<GameSession>, StoreError> {
        Ok(self.sessions.read().await.get(pin).cloned())
    }

    async fn update_progress(&self, pin: &str, update: ProgressUpdate) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(pin)
            .ok_or_else(|| StoreError::NotFound(pin.to_string()))?;

        if let Some(status) = update.status {
            session.status = status;
        }
        if let Some(index) = update.current_question_index {
            session.current_question_index = index;
        }
        session.version += 1;
        Ok(())
    }

    async fn join_player(&self, pin: &str, name: &str) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(pin) else {
            return Ok(false);
        };
        if session.players.contains_key(name) {
            return Ok(false);
        }
        session.players.insert(name.to_string(), 0);
        session.version += 1;
        Ok(true)
    }

    async fn increment_score(&self, pin: &str, name: &str, delta: i64) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(pin)
            .ok_or_else(|| StoreError::NotFound(pin.to_string()))?;

        // Creates the field at `delta` if the player is somehow absent,
        // matching document-store increment semantics.
        *session.players.entry(name.to_string()).or_insert(0) += delta;
        session.version += 1;
        Ok(())
    }
}
