//! Deferred job status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::jobs::JobId;
use crate::response::Message;
use crate::state::AppState;

/// GET /jobs/{job_id} -- status of a queued bulk mutation.
async fn get_job(State(state): State<AppState>, Path(job_id): Path<JobId>) -> Response {
    match state.jobs.get(job_id).await {
        Some(record) => Json(record).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(Message::new(format!("job {job_id} not found"))),
        )
            .into_response(),
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/jobs/{job_id}", get(get_job))
}
