use super::session::normalize_pin;
use super::AppState;
use crate::error::ApiError;
use crate::protocol::LeaderboardEntry;
use crate::store::ProgressUpdate;
use crate::types::{GameSession, GameStatus};

/// Players sorted by score descending, name ascending as tiebreak.
pub fn leaderboard_of(session: &GameSession) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = session
        .players
        .iter()
        .map(|(name, score)| LeaderboardEntry {
            name: name.clone(),
            score: *score,
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    entries
}

impl AppState {
    fn authorize_host(session: &GameSession, host_token: &str) -> Result<(), ApiError> {
        if session.host_token == host_token {
            Ok(())
        } else {
            Err(ApiError::NotHost)
        }
    }

    /// Start the game: waiting -> in_progress with the first question up.
    /// Requires at least one joined player.
    pub async fn start_game(
        &self,
        pin: &str,
        host_token: &str,
    ) -> Result<GameSession, ApiError> {
        let pin = normalize_pin(pin);
        let session = self.get_session(&pin).await?;
        Self::authorize_host(&session, host_token)?;

        // Only waiting -> in_progress is a legal start.
        if !session.status.can_transition_to(GameStatus::InProgress) {
            return Err(ApiError::WrongStatus {
                expected: GameStatus::Waiting,
                actual: session.status,
            });
        }
        if session.players.is_empty() {
            return Err(ApiError::NoPlayers);
        }

        self.store
            .update_progress(
                &pin,
                ProgressUpdate {
                    status: Some(GameStatus::InProgress),
                    current_question_index: Some(0),
                },
            )
            .await?;

        tracing::info!(
            "Game {} started with {} players",
            pin,
            session.players.len()
        );
        self.get_session(&pin).await
    }

    /// Advance to the next question, or finish once the last question has
    /// been shown. The index never moves past the final question.
    pub async fn advance_question(
        &self,
        pin: &str,
        host_token: &str,
    ) -> Result<GameSession, ApiError> {
        let pin = normalize_pin(pin);
        let session = self.get_session(&pin).await?;
        Self::authorize_host(&session, host_token)?;

        // Advancing either moves the index or finishes the game; both are
        // only legal while in_progress.
        if !session.status.can_transition_to(GameStatus::Finished) {
            return Err(ApiError::WrongStatus {
                expected: GameStatus::InProgress,
                actual: session.status,
            });
        }

        if session.has_next_question() {
            self.store
                .update_progress(
                    &pin,
                    ProgressUpdate {
                        current_question_index: Some(session.current_question_index + 1),
                        ..Default::default()
                    },
                )
                .await?;
        } else {
            self.store
                .update_progress(
                    &pin,
                    ProgressUpdate {
                        status: Some(GameStatus::Finished),
                        ..Default::default()
                    },
                )
                .await?;
            tracing::info!("Game {} finished", pin);
        }

        self.get_session(&pin).await
    }

    /// Read-only leaderboard for a session.
    pub async fn leaderboard(&self, pin: &str) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let session = self.get_session(pin).await?;
        Ok(leaderboard_of(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz;
    use crate::types::Question;
    use std::collections::HashMap;

    fn two_questions() -> Vec<Question> {
        vec![
            Question {
                question: "Q1".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                answer: "a".to_string(),
            },
            Question {
                question: "Q2".to_string(),
                options: vec!["c".to_string(), "d".to_string()],
                answer: "d".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_start_requires_a_player() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", two_questions())
            .await
            .unwrap();

        let err = state
            .start_game(&session.pin, &session.host_token)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NoPlayers));

        state.join_session(&session.pin, "alice").await.unwrap();
        let started = state
            .start_game(&session.pin, &session.host_token)
            .await
            .unwrap();
        assert_eq!(started.status, GameStatus::InProgress);
    }

    #[tokio::test]
    async fn test_start_rejects_wrong_token() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", two_questions())
            .await
            .unwrap();
        state.join_session(&session.pin, "alice").await.unwrap();

        let err = state
            .start_game(&session.pin, "WRONGTOKEN")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotHost));

        // Nothing moved.
        let current = state.get_session(&session.pin).await.unwrap();
        assert_eq!(current.status, GameStatus::Waiting);
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", two_questions())
            .await
            .unwrap();
        state.join_session(&session.pin, "alice").await.unwrap();

        state
            .start_game(&session.pin, &session.host_token)
            .await
            .unwrap();
        let err = state
            .start_game(&session.pin, &session.host_token)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::WrongStatus {
                actual: GameStatus::InProgress,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_advance_from_last_question_finishes_without_moving_index() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", two_questions())
            .await
            .unwrap();
        state.join_session(&session.pin, "alice").await.unwrap();
        state
            .start_game(&session.pin, &session.host_token)
            .await
            .unwrap();

        let advanced = state
            .advance_question(&session.pin, &session.host_token)
            .await
            .unwrap();
        assert_eq!(advanced.current_question_index, 1);
        assert_eq!(advanced.status, GameStatus::InProgress);

        let finished = state
            .advance_question(&session.pin, &session.host_token)
            .await
            .unwrap();
        assert_eq!(finished.status, GameStatus::Finished);
        assert_eq!(finished.current_question_index, 1);
    }

    #[tokio::test]
    async fn test_advance_before_start_is_rejected() {
        let state = AppState::in_memory();
        let session = state
            .create_session("Dana", two_questions())
            .await
            .unwrap();

        let err = state
            .advance_question(&session.pin, &session.host_token)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::WrongStatus {
                actual: GameStatus::Waiting,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_leaderboard_sorted_by_score_then_name() {
        let session = GameSession {
            pin: "AB12".to_string(),
            host: "Host".to_string(),
            host_token: "HOSTTOKEN".to_string(),
            players: HashMap::from([
                ("carol".to_string(), 2),
                ("alice".to_string(), 5),
                ("bob".to_string(), 2),
            ]),
            questions: quiz::builtin_deck(),
            current_question_index: 3,
            status: GameStatus::InProgress,
            created_at: chrono::Utc::now(),
            version: 9,
        };

        let entries = leaderboard_of(&session);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(entries[0].score, 5);
    }
}
