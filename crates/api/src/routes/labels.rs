//! Label-count reports, read from the Tator PostgreSQL store.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use mantis_core::error::CoreError;
use mantis_db::LabelCountRepo;
use mantis_tator::directory::version_id;

use crate::error::AppResult;
use crate::models::{LabelClusterFilter, LabelScoreFilter};
use crate::response::Labels;
use crate::state::AppState;

/// GET /labels/{project_name}
///
/// Label → count over all verified localizations of the project.
async fn verified_label_counts(
    State(state): State<AppState>,
    Path(project_name): Path<String>,
) -> AppResult<Response> {
    let project = state.directory.find(&project_name).await?;
    let labels = LabelCountRepo::verified_counts(&state.pool, project.id).await?;
    Ok(Json(Labels { labels }).into_response())
}

/// POST /labels/score/{project_name}
///
/// Label → count for localizations in a version whose score meets the
/// threshold.
async fn label_counts_by_score(
    State(state): State<AppState>,
    Path(project_name): Path<String>,
    Json(model): Json<LabelScoreFilter>,
) -> AppResult<Response> {
    let project = state.directory.find(&project_name).await?;

    let version = version_id(&state.tator, project.id, &model.version_name)
        .await?
        .ok_or_else(|| CoreError::VersionNotFound {
            project: project_name.clone(),
            version: model.version_name.clone(),
        })?;

    let labels = LabelCountRepo::counts_by_score(&state.pool, project.id, version, model.score).await?;
    Ok(Json(Labels { labels }).into_response())
}

/// POST /labels/cluster/{project_name}
///
/// Label → count for clustered localizations in a version; with an
/// `attribute`, nested label → attribute-value → count.
async fn label_counts_by_cluster(
    State(state): State<AppState>,
    Path(project_name): Path<String>,
    Json(model): Json<LabelClusterFilter>,
) -> AppResult<Response> {
    let project = state.directory.find(&project_name).await?;

    let version = version_id(&state.tator, project.id, &model.version_name)
        .await?
        .ok_or_else(|| CoreError::VersionNotFound {
            project: project_name.clone(),
            version: model.version_name.clone(),
        })?;

    match model.attribute.as_deref() {
        Some(attribute) => {
            let labels = LabelCountRepo::counts_by_cluster_attribute(
                &state.pool,
                project.id,
                version,
                attribute,
            )
            .await?;
            Ok(Json(Labels { labels }).into_response())
        }
        None => {
            let labels =
                LabelCountRepo::counts_by_cluster(&state.pool, project.id, version).await?;
            Ok(Json(Labels { labels }).into_response())
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/labels/{project_name}", get(verified_label_counts))
        .route("/labels/score/{project_name}", post(label_counts_by_score))
        .route("/labels/cluster/{project_name}", post(label_counts_by_cluster))
}
