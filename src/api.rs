//! HTTP API endpoints.
//!
//! All state synchronization is short-poll based: after any action, clients
//! re-fetch `GET /api/games/{pin}` on the interval advertised in the
//! snapshot. There is no push channel; one party observes the other's
//! mutations only through the next poll.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::protocol::{
    CreateGameRequest, CreateGameResponse, GameSnapshot, HostActionRequest, JoinRequest,
    JoinResponse, LeaderboardResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/games", post(create_game))
        .route("/api/games/{pin}", get(get_game))
        .route("/api/games/{pin}/join", post(join_game))
        .route("/api/games/{pin}/start", post(start_game))
        .route("/api/games/{pin}/advance", post(advance_question))
        .route("/api/games/{pin}/answers", post(submit_answer))
        .route("/api/games/{pin}/leaderboard", get(leaderboard))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotQuery {
    /// Presenting the valid host token unlocks the host view (correct
    /// answer included in the current question).
    pub host_token: Option<String>,
}

/// POST /api/games
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let session = state
        .create_session_from_text(&req.host_name, req.quiz_text.as_deref())
        .await?;
    Ok(Json(CreateGameResponse {
        pin: session.pin.clone(),
        host_token: session.host_token.clone(),
        question_count: session.questions.len(),
    }))
}

/// GET /api/games/{pin}, the short-poll snapshot.
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(pin): Path<String>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let session = state.get_session(&pin).await?;
    let for_host = query.host_token.as_deref() == Some(session.host_token.as_str());
    Ok(Json(GameSnapshot::from_session(
        &session,
        for_host,
        state.poll_interval_ms,
    )))
}

/// POST /api/games/{pin}/join
pub async fn join_game(
    State(state): State<Arc<AppState>>,
    Path(pin): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, ApiError> {
    state.join_session(&pin, &req.player_name).await?;
    Ok(Json(JoinResponse {
        pin: crate::state::normalize_pin(&pin),
        player_name: req.player_name.trim().to_string(),
    }))
}

/// POST /api/games/{pin}/start
pub async fn start_game(
    State(state): State<Arc<AppState>>,
    Path(pin): Path<String>,
    Json(req): Json<HostActionRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let session = state.start_game(&pin, &req.host_token).await?;
    Ok(Json(GameSnapshot::from_session(
        &session,
        true,
        state.poll_interval_ms,
    )))
}

/// POST /api/games/{pin}/advance
pub async fn advance_question(
    State(state): State<Arc<AppState>>,
    Path(pin): Path<String>,
    Json(req): Json<HostActionRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let session = state.advance_question(&pin, &req.host_token).await?;
    Ok(Json(GameSnapshot::from_session(
        &session,
        true,
        state.poll_interval_ms,
    )))
}

/// POST /api/games/{pin}/answers
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(pin): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, ApiError> {
    let outcome = state
        .submit_answer(&pin, &req.player_name, req.question_index, &req.answer)
        .await?;
    Ok(Json(SubmitAnswerResponse {
        correct: outcome.correct,
        score: outcome.score,
    }))
}

/// GET /api/games/{pin}/leaderboard
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Path(pin): Path<String>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let entries = state.leaderboard(&pin).await?;
    Ok(Json(LeaderboardResponse { entries }))
}
