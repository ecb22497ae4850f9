//! Submission handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, models::Status, state::AppState};

use super::{
    request::CreateSubmissionRequest,
    response::{CancelSubmissionResponse, CreateSubmissionResponse, SubmissionResponse},
};

/// Create a new submission
pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<CreateSubmissionResponse>)> {
    payload.validate()?;

    let id = state
        .engine()
        .submit(
            payload.user_id,
            payload.problem_id,
            &payload.language,
            payload.source_code,
        )
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateSubmissionResponse {
            id,
            message: "Submission received and queued for judging".to_string(),
            status: Status::Queued.to_string(),
        }),
    ))
}

/// Get a submission's current status and per-test results
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = state.engine().status(id).await?;
    let test_cases = state
        .engine()
        .problem_test_cases(submission.problem_id)
        .await?;

    Ok(Json(SubmissionResponse::from_submission(
        &submission,
        &test_cases,
    )))
}

/// Request cancellation of a queued or running submission
pub async fn cancel_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CancelSubmissionResponse>> {
    state.engine().cancel(id).await?;

    Ok(Json(CancelSubmissionResponse {
        id,
        message: "Cancellation requested".to_string(),
    }))
}
