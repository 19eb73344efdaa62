//! Request and response bodies for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{GameSession, GameStatus, Pin};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub host_name: String,
    /// Raw text of an uploaded quiz file; the built-in deck is used when
    /// absent.
    #[serde(default)]
    pub quiz_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub pin: Pin,
    /// Shown only here; the host sends it back with every host operation.
    pub host_token: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub pin: Pin,
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostActionRequest {
    pub host_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub player_name: String,
    /// Must match the session's current index; stale submissions are
    /// rejected rather than scored against the wrong question.
    pub question_index: i64,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    pub score: i64,
}

/// The current question as shown to clients. The correct answer is only
/// present for the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// Snapshot returned by the short-poll endpoint. Clients re-fetch this on
/// the advertised interval; it is the only way either side observes the
/// other's mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub pin: Pin,
    pub host: String,
    pub status: GameStatus,
    pub current_question_index: i64,
    pub question_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionView>,
    pub players: HashMap<String, i64>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub server_now: DateTime<Utc>,
    /// How long clients should wait before re-fetching.
    pub poll_after_ms: u64,
}

impl GameSnapshot {
    pub fn from_session(session: &GameSession, for_host: bool, poll_after_ms: u64) -> Self {
        let current_question = if session.status == GameStatus::InProgress {
            session.current_question().map(|q| QuestionView {
                question: q.question.clone(),
                options: q.options.clone(),
                answer: for_host.then(|| q.answer.clone()),
            })
        } else {
            None
        };

        Self {
            pin: session.pin.clone(),
            host: session.host.clone(),
            status: session.status,
            current_question_index: session.current_question_index,
            question_count: session.questions.len(),
            current_question,
            players: session.players.clone(),
            version: session.version,
            created_at: session.created_at,
            server_now: Utc::now(),
            poll_after_ms,
        }
    }
}
