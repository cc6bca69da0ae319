//! Label-assignment endpoints.
//!
//! Each follows the count-then-conditionally-mutate pattern: correlated
//! dry-run counts on the media and localization axes, then either a
//! report or a queued deferred mutation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use validator::Validate;

use mantis_core::error::CoreError;
use mantis_core::filter::{AttrFilter, FilterAxis, FilterOp, FilterSet, TatorQuery};
use mantis_core::project::ProjectSpec;
use mantis_core::types::TatorId;
use mantis_tator::directory::{resolve_spec, version_id};

use crate::error::{AppError, AppResult};
use crate::models::{check_media_name, ClusterFilter, LocIdFilter};
use crate::ops::{assign, counts, require_box_type, require_image_type, summary};
use crate::response::{Message, Queued};
use crate::state::AppState;

use super::project_name;

// ---------------------------------------------------------------------------
// Shared cluster counting
// ---------------------------------------------------------------------------

/// Everything the cluster endpoints derive before deciding to report or
/// mutate.
struct ClusterCounts {
    spec: ProjectSpec,
    version: Option<TatorId>,
    media_query: TatorQuery,
    num_media: u64,
    num_boxes: u64,
}

/// Resolve the project and run the correlated counts for a cluster
/// filter: media axis first to bound the candidate set, then the
/// localization axis with the same criteria mirrored.
async fn cluster_counts(
    state: &AppState,
    model: &ClusterFilter,
    media_filter: Option<AttrFilter>,
) -> Result<ClusterCounts, AppError> {
    let project = project_name(model.project_name.as_deref(), state);
    let spec = resolve_spec(&state.tator, &state.directory, project).await?;
    require_image_type(&spec)?;

    if model.cluster_name.trim().is_empty() {
        return Err(CoreError::Validation("No cluster name provided".into()).into());
    }

    let version = version_id(&state.tator, spec.project_id, &model.version_name).await?;
    if version.is_none() && !model.version_name.is_empty() {
        return Err(CoreError::VersionNotFound {
            project: spec.project_name.clone(),
            version: model.version_name.clone(),
        }
        .into());
    }

    let cluster = AttrFilter::equals("cluster", &model.cluster_name);
    let unverified = AttrFilter::flag("verified", false);

    let media_query = FilterSet::new()
        .with(FilterAxis::Related, cluster.clone())
        .with(FilterAxis::Related, unverified.clone())
        .with_opt(FilterAxis::Primary, media_filter.clone())
        .build();
    let num_media = counts::media_count(&state.tator, &spec, &media_query).await?;
    tracing::debug!(num_media, ?media_query, "Counted candidate media");

    let loc_query = FilterSet::new()
        .with(FilterAxis::Primary, cluster)
        .with(FilterAxis::Primary, unverified)
        .with_opt(FilterAxis::Related, media_filter)
        .with_version(version)
        .build();
    let num_boxes = counts::localization_count(&state.tator, &spec, &loc_query).await?;
    tracing::debug!(num_boxes, num_media, "Counted candidate localizations");

    Ok(ClusterCounts {
        spec,
        version,
        media_query,
        num_media,
        num_boxes,
    })
}

// ---------------------------------------------------------------------------
// POST /label/id/{label}
// ---------------------------------------------------------------------------

/// Assign a label to a single localization by id.
async fn assign_by_id(
    State(state): State<AppState>,
    Path(label): Path<String>,
    Json(model): Json<LocIdFilter>,
) -> AppResult<Response> {
    let project = project_name(model.project_name.as_deref(), &state);
    let spec = resolve_spec(&state.tator, &state.directory, project).await?;
    require_box_type(&spec)?;

    if model.validate().is_err() {
        let score = model.score.unwrap_or_default();
        return Err(CoreError::Validation(format!(
            "Invalid score {score}. Must be between 0 and 1"
        ))
        .into());
    }

    let found = match state.tator.get_localization(model.loc_id).await {
        Ok(loc) => loc,
        Err(e) => {
            tracing::warn!(loc_id = model.loc_id, error = %e, "Localization lookup failed");
            return Ok(Json(Message::new(format!(
                "No localizations found for id {}",
                model.loc_id
            )))
            .into_response());
        }
    };

    if model.dry_run {
        let current = found.attr_str("Label").unwrap_or("unlabeled");
        return Ok(Json(Message::new(format!(
            "Found localization for id {} with label {current}",
            model.loc_id
        )))
        .into_response());
    }

    let client = Arc::clone(&state.tator);
    let task_spec = spec.clone();
    let task_label = label.clone();
    let loc_id = model.loc_id;
    let score = model.score;
    let job_id = state
        .jobs
        .spawn(
            format!("assign label {label} to localization {loc_id}"),
            async move {
                assign::assign_label_by_id(&client, &task_spec, loc_id, &task_label, score).await
            },
        )
        .await;

    Ok(Json(Queued {
        message: format!("Queued localization change for id {loc_id}"),
        job_id,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// POST /label/cluster/{label}
// ---------------------------------------------------------------------------

/// Bulk label assignment for every unverified localization in a
/// cluster, optionally narrowed by media name.
async fn assign_by_cluster(
    State(state): State<AppState>,
    Path(label): Path<String>,
    Json(model): Json<ClusterFilter>,
) -> AppResult<Response> {
    let media_filter = if model.media_name.trim().is_empty() {
        None
    } else {
        let op = FilterOp::parse(&model.filter_media)?;
        Some(AttrFilter::media_name(op, &model.media_name)?)
    };

    let counts = cluster_counts(&state, &model, media_filter.clone()).await?;
    let version_label = summary::version_label(&model.version_name, counts.version);

    if model.dry_run {
        return Ok(Json(Message::new(summary::cluster_assign_report(
            counts.num_boxes,
            &model.cluster_name,
            &version_label,
            counts.num_media,
        )))
        .into_response());
    }

    if counts.num_media == 0 {
        return Ok(Json(Message::new(summary::no_media_found(&counts.media_query))).into_response());
    }

    let job_id = spawn_cluster_assignment(&state, &model, counts, media_filter, &label).await;
    Ok(Json(Queued {
        message: format!(
            "Queued modification of localizations in cluster {} and {version_label} to label {label}",
            model.cluster_name
        ),
        job_id,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// POST /label/filename_cluster/{label}
// ---------------------------------------------------------------------------

/// Bulk label assignment narrowed by media filename match mode and
/// cluster.
async fn assign_by_filename_cluster(
    State(state): State<AppState>,
    Path(label): Path<String>,
    Json(model): Json<ClusterFilter>,
) -> AppResult<Response> {
    let op = FilterOp::parse(&model.filter_media)?;
    check_media_name(&model.media_name)?;
    let media_filter = Some(AttrFilter::media_name(op, &model.media_name)?);

    let counts = cluster_counts(&state, &model, media_filter.clone()).await?;
    let version_label = summary::version_label(&model.version_name, counts.version);

    if model.dry_run {
        return Ok(Json(Message::new(summary::media_cluster_assign_report(
            counts.num_boxes,
            op.verb(),
            &model.media_name,
            &model.cluster_name,
            &version_label,
            counts.num_media,
        )))
        .into_response());
    }

    if counts.num_media == 0 {
        return Ok(Json(Message::new(summary::no_media_found(&counts.media_query))).into_response());
    }

    let job_id = spawn_cluster_assignment(&state, &model, counts, media_filter, &label).await;
    Ok(Json(Queued {
        message: format!(
            "Queued modification of localizations by filename {} and cluster {} to label {label}",
            model.media_name, model.cluster_name
        ),
        job_id,
    })
    .into_response())
}

/// Queue the deferred cluster-assignment task.
async fn spawn_cluster_assignment(
    state: &AppState,
    model: &ClusterFilter,
    counts: ClusterCounts,
    media_filter: Option<AttrFilter>,
    label: &str,
) -> crate::jobs::JobId {
    let client = Arc::clone(&state.tator);
    let spec = counts.spec;
    let version = counts.version;
    let cluster_name = model.cluster_name.clone();
    let task_label = label.to_string();

    state
        .jobs
        .spawn(
            format!("assign label {task_label} by cluster {cluster_name}"),
            async move {
                assign::assign_cluster_label(
                    &client,
                    &spec,
                    &cluster_name,
                    media_filter,
                    version,
                    &task_label,
                )
                .await
            },
        )
        .await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/label/id/{label}", post(assign_by_id))
        .route("/label/cluster/{label}", post(assign_by_cluster))
        .route("/label/filename_cluster/{label}", post(assign_by_filename_cluster))
}
