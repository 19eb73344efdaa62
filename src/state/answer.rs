use super::session::normalize_pin;
use super::AppState;
use crate::error::ApiError;
use crate::types::GameStatus;

/// What a player learns back from a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The player's score after this submission.
    pub score: i64,
}

impl AppState {
    /// Submit a player's answer for one question index.
    ///
    /// The ledger entry is recorded before any store write, so a duplicate
    /// submission for the same index never reaches the score field. Only
    /// the score delta is persisted; the chosen option is not.
    pub async fn submit_answer(
        &self,
        pin: &str,
        player_name: &str,
        question_index: i64,
        answer: &str,
    ) -> Result<AnswerOutcome, ApiError> {
        let pin = normalize_pin(pin);
        let session = self.get_session(&pin).await?;

        if session.status != GameStatus::InProgress {
            return Err(ApiError::WrongStatus {
                expected: GameStatus::InProgress,
                actual: session.status,
            });
        }
        if question_index != session.current_question_index {
            return Err(ApiError::StaleQuestion {
                submitted: question_index,
                current: session.current_question_index,
            });
        }
        let Some(score) = session.players.get(player_name).copied() else {
            return Err(ApiError::PlayerNotJoined(player_name.to_string()));
        };

        let question = session
            .current_question()
            .ok_or_else(|| ApiError::Internal("current question index out of bounds".to_string()))?;

        // Record the index in the ledger first; a concurrent duplicate loses
        // here and never touches the score.
        {
            let mut answered = self.answered.write().await;
            let indexes = answered
                .entry((pin.clone(), player_name.to_string()))
                .or_default();
            if !indexes.insert(question_index) {
                return Err(ApiError::AlreadyAnswered { question_index });
            }
        }

        let correct = question.answer == answer;
        if correct {
            self.store.increment_score(&pin, player_name, 1).await?;
        }
        tracing::debug!(
            "Player {:?} answered question {} of game {} ({})",
            player_name,
            question_index,
            pin,
            if correct { "correct" } else { "incorrect" }
        );

        Ok(AnswerOutcome {
            correct,
            // Only this player's ledger-gated submission can move their own
            // score field, so the local add is exact.
            score: if correct { score + 1 } else { score },
        })
    }
}
