use super::AppState;
use crate::error::ApiError;
use crate::quiz;
use crate::store::StoreError;
use crate::types::{GameSession, GameStatus, Pin, Question};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// PIN alphabet: uppercase letters and digits.
const PIN_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const PIN_LENGTH: usize = 4;

/// Host tokens are longer draws from the same alphabet.
const HOST_TOKEN_LENGTH: usize = 16;

fn random_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| PIN_CHARS[rng.random_range(0..PIN_CHARS.len())] as char)
        .collect()
}

/// Uppercase a PIN as typed by a player.
pub fn normalize_pin(raw: &str) -> Pin {
    raw.trim().to_ascii_uppercase()
}

impl AppState {
    /// Create a new game session from the given question list.
    ///
    /// The questions are stored as a random permutation of the input; an
    /// empty list (a malformed upload) never creates a session.
    pub async fn create_session(
        &self,
        host_name: &str,
        mut questions: Vec<Question>,
    ) -> Result<GameSession, ApiError> {
        let host_name = host_name.trim();
        if host_name.is_empty() {
            return Err(ApiError::InvalidInput(
                "host name must not be empty".to_string(),
            ));
        }
        if questions.is_empty() {
            return Err(ApiError::EmptyQuiz);
        }

        questions.shuffle(&mut rand::rng());

        // Retry on PIN collision. Rare with 1.6M combinations, but sessions
        // are never purged, so it must be handled.
        loop {
            let session = GameSession {
                pin: random_code(PIN_LENGTH),
                host: host_name.to_string(),
                host_token: random_code(HOST_TOKEN_LENGTH),
                players: HashMap::new(),
                questions: questions.clone(),
                current_question_index: -1,
                status: GameStatus::Waiting,
                created_at: Utc::now(),
                version: 1,
            };
            match self.store.create(session.clone()).await {
                Ok(()) => {
                    tracing::info!(
                        "Created game {} for host {:?} with {} questions",
                        session.pin,
                        session.host,
                        session.questions.len()
                    );
                    return Ok(session);
                }
                Err(StoreError::AlreadyExists(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Create a session from an uploaded quiz file's text, or from the
    /// built-in deck when no file was supplied.
    pub async fn create_session_from_text(
        &self,
        host_name: &str,
        quiz_text: Option<&str>,
    ) -> Result<GameSession, ApiError> {
        let questions = match quiz_text {
            Some(text) => quiz::parse_quiz_text(text),
            None => quiz::builtin_deck(),
        };
        self.create_session(host_name, questions).await
    }

    /// Fetch a session by (case-normalized) PIN.
    pub async fn get_session(&self, pin: &str) -> Result<GameSession, ApiError> {
        let pin = normalize_pin(pin);
        self.store
            .get(&pin)
            .await?
            .ok_or(ApiError::GameNotFound(pin))
    }
}
