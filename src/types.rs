use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Game PINs are short uppercase codes; players are keyed by display name.
pub type Pin = String;
pub type PlayerName = String;

/// Session lifecycle. Transitions are one-directional:
/// waiting -> in_progress -> finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

impl GameStatus {
    /// Check that a status change only moves forward.
    pub fn can_transition_to(self, to: GameStatus) -> bool {
        use GameStatus::*;

        matches!((self, to), (Waiting, InProgress) | (InProgress, Finished))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Waiting => "waiting",
            GameStatus::InProgress => "in_progress",
            GameStatus::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// A single quiz question with its answer choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// The session document, one per game PIN.
///
/// Host progression fields (`status`, `current_question_index`) are written
/// unconditionally and only by the host; `players` is only touched through
/// the store's transactional join and atomic score increment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub pin: Pin,
    pub host: String,
    /// Credential returned once at creation; required for host operations.
    pub host_token: String,
    pub players: HashMap<PlayerName, i64>,
    /// Shuffled at creation; never reordered afterwards.
    pub questions: Vec<Question>,
    /// -1 means the game has not started yet.
    pub current_question_index: i64,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    /// Bumped on every mutation so pollers can cheaply detect change.
    pub version: u64,
}

impl GameSession {
    /// The question currently presented, if the index points at one.
    pub fn current_question(&self) -> Option<&Question> {
        if self.current_question_index < 0 {
            return None;
        }
        self.questions.get(self.current_question_index as usize)
    }

    /// Whether a question remains after the current one.
    pub fn has_next_question(&self) -> bool {
        let next = self.current_question_index + 1;
        (next as usize) < self.questions.len()
    }
}
