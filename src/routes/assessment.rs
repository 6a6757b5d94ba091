use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::engine::types::AnswerSubmission;
use crate::response::{created, ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(start_session))
        .route("/sessions/:id/next-question", get(next_question))
        .route("/sessions/:id/answers", post(submit_answer))
        .route("/sessions/:id/finish", post(finish_session))
        .route("/sessions/:id/report", get(report))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionRequest {
    direction: String,
}

async fn start_session(
    State(state): State<AppState>,
    Json(body): Json<StartSessionRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let direction = body.direction.trim();
    if direction.is_empty() {
        return Err(AppError::bad_request(
            "VALIDATION_ERROR",
            "direction must not be empty",
        ));
    }

    let started = state.engine().start_session(direction).await?;
    Ok(created(started))
}

async fn next_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let outcome = state.engine().next_question(&session_id).await?;
    Ok(ok(outcome))
}

async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<AnswerSubmission>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if body.question_id.trim().is_empty() {
        return Err(AppError::bad_request(
            "VALIDATION_ERROR",
            "questionId must not be empty",
        ));
    }
    if !body.spent_seconds.is_finite() || body.spent_seconds < 0.0 {
        return Err(AppError::bad_request(
            "VALIDATION_ERROR",
            "spentSeconds must be a non-negative number",
        ));
    }

    let outcome = state.engine().submit_answer(&session_id, &body).await?;
    Ok(ok(outcome))
}

async fn finish_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let report = state.engine().finish_session(&session_id).await?;
    Ok(ok(report))
}

async fn report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let report = state.engine().report(&session_id).await?;
    Ok(ok(report))
}
