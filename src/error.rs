//! User-facing error surface for the HTTP API.
//!
//! Everything here is recoverable from the client's point of view: the user
//! corrects their input (bad PIN, taken name) or simply keeps polling. Store
//! failures are the exception and map to 5xx.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;
use crate::types::GameStatus;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("uploaded quiz contains no valid questions")]
    EmptyQuiz,

    #[error("{0}")]
    InvalidInput(String),

    #[error("no game with PIN {0}")]
    GameNotFound(String),

    #[error("the name {0:?} is already taken in this game")]
    NameTaken(String),

    #[error("host token does not match this game")]
    NotHost,

    #[error("cannot start a game with no players")]
    NoPlayers,

    #[error("game is {actual}, operation requires {expected}")]
    WrongStatus {
        expected: GameStatus,
        actual: GameStatus,
    },

    #[error("question {submitted} is no longer current (now at {current})")]
    StaleQuestion { submitted: i64, current: i64 },

    #[error("question {question_index} was already answered")]
    AlreadyAnswered { question_index: i64 },

    #[error("player {0:?} has not joined this game")]
    PlayerNotJoined(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::EmptyQuiz => "EMPTY_QUIZ",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::GameNotFound(_) => "GAME_NOT_FOUND",
            ApiError::NameTaken(_) => "NAME_TAKEN",
            ApiError::NotHost => "NOT_HOST",
            ApiError::NoPlayers => "NO_PLAYERS",
            ApiError::WrongStatus { .. } => "WRONG_STATUS",
            ApiError::StaleQuestion { .. } => "STALE_QUESTION",
            ApiError::AlreadyAnswered { .. } => "ALREADY_ANSWERED",
            ApiError::PlayerNotJoined(_) => "PLAYER_NOT_JOINED",
            ApiError::Internal(_) => "INTERNAL",
            ApiError::Store(_) => "STORE_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyQuiz | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::GameNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NameTaken(_)
            | ApiError::NoPlayers
            | ApiError::WrongStatus { .. }
            | ApiError::StaleQuestion { .. }
            | ApiError::AlreadyAnswered { .. } => StatusCode::CONFLICT,
            ApiError::NotHost | ApiError::PlayerNotJoined(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::AlreadyExists(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("API error: {}", self);
        } else {
            tracing::debug!("API error: {}", self);
        }

        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
