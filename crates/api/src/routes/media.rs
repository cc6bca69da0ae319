//! Media counting (no mutation).

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use mantis_core::filter::{AttrFilter, FilterAxis, FilterOp, FilterSet};
use mantis_tator::directory::resolve_spec;

use crate::error::AppResult;
use crate::models::{check_media_name, MediaNameFilterBase};
use crate::ops::{counts, summary};
use crate::response::Message;
use crate::state::AppState;

use super::project_name;

/// POST /media_count_by_filename
///
/// Count media whose name matches the filter; report only.
async fn media_count_by_filename(
    State(state): State<AppState>,
    Json(model): Json<MediaNameFilterBase>,
) -> AppResult<Response> {
    let op = FilterOp::parse(&model.filter_media)?;
    check_media_name(&model.media_name)?;

    let project = project_name(model.project_name.as_deref(), &state);
    let spec = resolve_spec(&state.tator, &state.directory, project).await?;

    let query = FilterSet::new()
        .with(
            FilterAxis::Primary,
            AttrFilter::media_name(op, &model.media_name)?,
        )
        .build();
    let num_media = counts::media_count(&state.tator, &spec, &query).await?;

    Ok(Json(Message::new(summary::media_count_report(
        num_media,
        op.verb(),
        &model.media_name,
    )))
    .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/media_count_by_filename", post(media_count_by_filename))
}
