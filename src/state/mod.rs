mod answer;
mod join;
mod progress;
mod session;

pub use answer::AnswerOutcome;
pub use session::normalize_pin;

use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::store::{MemoryStore, SessionStore};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    /// Answer ledger: which question indexes each (pin, player) pair has
    /// already answered. Lives outside the session document; the persisted
    /// state only ever carries the score delta.
    answered: Arc<RwLock<HashMap<(String, String), HashSet<i64>>>>,
    /// Fixed client re-fetch interval advertised in every snapshot.
    pub poll_interval_ms: u64,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, poll_interval_ms: u64) -> Self {
        Self {
            store,
            answered: Arc::new(RwLock::new(HashMap::new())),
            poll_interval_ms,
        }
    }

    /// State backed by the in-memory store with default settings.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), DEFAULT_POLL_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::quiz;
    use crate::types::GameStatus;

    #[tokio::test]
    async fn test_full_session_lifecycle() {
        let state = AppState::in_memory();

        let session = state
            .create_session("Dana", quiz::builtin_deck())
            .await
            .unwrap();
        assert_eq!(session.status, GameStatus::Waiting);
        assert_eq!(session.current_question_index, -1);

        state.join_session(&session.pin, "alice").await.unwrap();
        state.join_session(&session.pin, "bob").await.unwrap();

        let started = state
            .start_game(&session.pin, &session.host_token)
            .await
            .unwrap();
        assert_eq!(started.status, GameStatus::InProgress);
        assert_eq!(started.current_question_index, 0);

        // Walk the host through every remaining question.
        for expected_index in 1..session.questions.len() as i64 {
            let current = state
                .advance_question(&session.pin, &session.host_token)
                .await
                .unwrap();
            assert_eq!(current.current_question_index, expected_index);
            assert_eq!(current.status, GameStatus::InProgress);
        }

        // Advancing past the last question finishes the game and leaves the
        // index where it was.
        let finished = state
            .advance_question(&session.pin, &session.host_token)
            .await
            .unwrap();
        assert_eq!(finished.status, GameStatus::Finished);
        assert_eq!(
            finished.current_question_index,
            session.questions.len() as i64 - 1
        );

        // No further progression once finished.
        let err = state
            .advance_question(&session.pin, &session.host_token)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::WrongStatus { .. }));
    }

    #[tokio::test]
    async fn test_version_increases_across_mutations() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", quiz::builtin_deck())
            .await
            .unwrap();

        let v0 = state.get_session(&session.pin).await.unwrap().version;
        state.join_session(&session.pin, "alice").await.unwrap();
        let v1 = state.get_session(&session.pin).await.unwrap().version;
        state
            .start_game(&session.pin, &session.host_token)
            .await
            .unwrap();
        let v2 = state.get_session(&session.pin).await.unwrap().version;

        assert!(v0 < v1 && v1 < v2);
    }
}
