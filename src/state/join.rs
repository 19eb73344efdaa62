use super::session::normalize_pin;
use super::AppState;
use crate::error::ApiError;

impl AppState {
    /// Join a session as a new player at score 0.
    ///
    /// Existence is checked up front so an unknown PIN surfaces as its own
    /// error; the store's transactional check-and-set then guarantees that
    /// of two racing joins with the same name at most one succeeds.
    pub async fn join_session(&self, pin: &str, player_name: &str) -> Result<(), ApiError> {
        let pin = normalize_pin(pin);
        let name = player_name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput(
                "player name must not be empty".to_string(),
            ));
        }

        if self.store.get(&pin).await?.is_none() {
            return Err(ApiError::GameNotFound(pin));
        }

        if self.store.join_player(&pin, name).await? {
            tracing::info!("Player {:?} joined game {}", name, pin);
            Ok(())
        } else {
            Err(ApiError::NameTaken(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_join_unknown_pin() {
        let state = AppState::in_memory();
        let err = state.join_session("ZZZZ", "alice").await.unwrap_err();
        assert!(matches!(err, ApiError::GameNotFound(_)));
    }

    #[tokio::test]
    async fn test_join_duplicate_name_leaves_players_unchanged() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", quiz::builtin_deck())
            .await
            .unwrap();

        state.join_session(&session.pin, "alice").await.unwrap();
        let err = state
            .join_session(&session.pin, "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NameTaken(_)));

        let current = state.get_session(&session.pin).await.unwrap();
        assert_eq!(current.players.len(), 1);
        assert_eq!(current.players["alice"], 0);
    }

    #[tokio::test]
    async fn test_join_rejects_blank_name() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", quiz::builtin_deck())
            .await
            .unwrap();

        let err = state.join_session(&session.pin, "  ").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_join_accepts_lowercase_pin() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", quiz::builtin_deck())
            .await
            .unwrap();

        state
            .join_session(&session.pin.to_ascii_lowercase(), "alice")
            .await
            .unwrap();
        let current = state.get_session(&session.pin).await.unwrap();
        assert!(current.players.contains_key("alice"));
    }

    #[tokio::test]
    async fn test_racing_joins_with_same_name_one_winner() {
        let state = Arc::new(AppState::in_memory());
        let session = state
            .create_session("Dana", quiz::builtin_deck())
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let state = state.clone();
            let pin = session.pin.clone();
            handles.push(tokio::spawn(async move {
                state.join_session(&pin, "alice").await.is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
