//! Bulk-deletion endpoints.
//!
//! Every endpoint counts before it mutates: the media axis bounds the
//! candidate set, the localization axis (same criteria, mirrored)
//! yields the reported box count, and a zero on either axis
//! short-circuits without queuing anything.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::delete;
use axum::{Json, Router};

use mantis_core::error::CoreError;
use mantis_core::filter::{AttrFilter, FilterAxis, FilterOp, FilterSet, TatorQuery};
use mantis_core::project::ProjectSpec;
use mantis_core::types::TatorId;
use mantis_tator::directory::{resolve_spec, version_id};

use crate::error::{AppError, AppResult};
use crate::models::{
    check_media_name, ClusterFilter, DeleteFlagFilter, LabelFilter, MediaIdFilter,
    MediaNameFilter, SaliencyFilter,
};
use crate::ops::{counts, delete as delete_ops, require_image_type, summary};
use crate::response::{Message, Queued};
use crate::state::AppState;

use super::project_name;

// ---------------------------------------------------------------------------
// Shared filtered-delete counting
// ---------------------------------------------------------------------------

/// Everything the filtered-deletion endpoints derive before deciding to
/// report or mutate.
struct FilteredDelete {
    spec: ProjectSpec,
    version: Option<TatorId>,
    media_query: TatorQuery,
    /// Localization predicates re-applied per mutation batch.
    loc_filters: FilterSet,
    num_media: u64,
    num_boxes: u64,
}

/// Resolve the project and run the correlated counts for a deletion
/// driven by localization criteria (label, cluster, saliency), with an
/// optional media-name narrowing.  An absent media filter means the
/// deletion sweeps all media.
async fn filtered_delete_counts(
    state: &AppState,
    project: Option<&str>,
    version_name: &str,
    media_filter: Option<AttrFilter>,
    criteria: Vec<AttrFilter>,
) -> Result<FilteredDelete, AppError> {
    let project = project_name(project, state);
    let spec = resolve_spec(&state.tator, &state.directory, project).await?;
    require_image_type(&spec)?;

    let version = version_id(&state.tator, spec.project_id, version_name).await?;
    if version.is_none() && !version_name.is_empty() {
        return Err(CoreError::VersionNotFound {
            project: spec.project_name.clone(),
            version: version_name.to_string(),
        }
        .into());
    }

    let mut media_set = FilterSet::new().with_opt(FilterAxis::Primary, media_filter.clone());
    let mut loc_filters = FilterSet::new().with_opt(FilterAxis::Related, media_filter);
    for criterion in criteria {
        media_set = media_set.with(FilterAxis::Related, criterion.clone());
        loc_filters = loc_filters.with(FilterAxis::Primary, criterion);
    }
    let loc_filters = loc_filters.with_version(version);

    let media_query = media_set.build();
    let num_media = counts::media_count(&state.tator, &spec, &media_query).await?;
    tracing::debug!(num_media, ?media_query, "Counted candidate media");

    let num_boxes =
        counts::localization_count(&state.tator, &spec, &loc_filters.build()).await?;
    tracing::debug!(num_boxes, num_media, "Counted candidate localizations");

    Ok(FilteredDelete {
        spec,
        version,
        media_query,
        loc_filters,
        num_media,
        num_boxes,
    })
}

/// Queue the deferred filtered-deletion task.
async fn spawn_filtered_delete(
    state: &AppState,
    counts: FilteredDelete,
    description: String,
) -> crate::jobs::JobId {
    let client = Arc::clone(&state.tator);
    let spec = counts.spec;
    let media_query = counts.media_query;
    let loc_filters = counts.loc_filters;

    state
        .jobs
        .spawn(description, async move {
            delete_ops::delete_by_filter(&client, &spec, &media_query, loc_filters).await
        })
        .await
}

// ---------------------------------------------------------------------------
// DELETE /localizations/filename
// ---------------------------------------------------------------------------

/// Delete every localization in media matching a filename filter.
async fn delete_by_filename(
    State(state): State<AppState>,
    Json(model): Json<MediaNameFilter>,
) -> AppResult<Response> {
    let op = FilterOp::parse(&model.filter_media)?;
    check_media_name(&model.media_name)?;

    let project = project_name(model.project_name.as_deref(), &state);
    let spec = resolve_spec(&state.tator, &state.directory, project).await?;

    let name_filter = AttrFilter::media_name(op, &model.media_name)?;

    let media_query = FilterSet::new()
        .with(FilterAxis::Primary, name_filter.clone())
        .build();
    let num_media = counts::media_count(&state.tator, &spec, &media_query).await?;
    if num_media == 0 {
        return Ok(Json(Message::new(summary::no_media_found(&media_query))).into_response());
    }

    let loc_filters = FilterSet::new().with(FilterAxis::Related, name_filter);
    let num_boxes = counts::localization_count(&state.tator, &spec, &loc_filters.build()).await?;
    if num_boxes == 0 {
        return Ok(Json(Message::new(format!(
            "No unverified localizations found for {}",
            model.media_name
        )))
        .into_response());
    }

    if model.dry_run {
        return Ok(Json(Message::new(summary::filename_delete_report(
            num_media,
            op.verb(),
            &model.media_name,
            num_boxes,
        )))
        .into_response());
    }

    let counts = FilteredDelete {
        spec,
        version: None,
        media_query,
        loc_filters,
        num_media,
        num_boxes,
    };
    let description = format!("delete localizations by filename {}", model.media_name);
    let job_id = spawn_filtered_delete(&state, counts, description).await;

    Ok(Json(Queued {
        message: format!(
            "Queued deletion of localizations in medias by filename {}",
            model.media_name
        ),
        job_id,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// DELETE /localizations/filename_label
// ---------------------------------------------------------------------------

/// Delete unverified localizations by label, optionally narrowed by
/// media filename.
async fn delete_by_filename_label(
    State(state): State<AppState>,
    Json(model): Json<LabelFilter>,
) -> AppResult<Response> {
    let op = FilterOp::parse(&model.filter_media)?;

    if model.label_name.trim().is_empty() {
        return Err(CoreError::Validation("No label name provided".into()).into());
    }

    // An empty media name sweeps the label across all media.
    let media_filter = if model.media_name.trim().is_empty() {
        None
    } else {
        Some(AttrFilter::media_name(op, &model.media_name)?)
    };

    let counts = filtered_delete_counts(
        &state,
        model.project_name.as_deref(),
        &model.version_name,
        media_filter,
        vec![
            AttrFilter::equals("Label", &model.label_name),
            AttrFilter::flag("verified", false),
        ],
    )
    .await?;

    let report = summary::filtered_delete_report(
        counts.num_boxes,
        counts.num_media,
        op.verb(),
        &model.media_name,
        &format!("label {}", model.label_name),
        &summary::version_label(&model.version_name, counts.version),
    );

    if counts.num_boxes == 0 || model.dry_run {
        return Ok(Json(Message::new(report)).into_response());
    }

    let description = format!(
        "delete localizations by filename {} and label {}",
        model.media_name, model.label_name
    );
    let job_id = spawn_filtered_delete(&state, counts, description).await;

    Ok(Json(Queued {
        message: format!(
            "Queued deletion by name {} and label {}",
            model.media_name, model.label_name
        ),
        job_id,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// DELETE /localizations/filename_cluster
// ---------------------------------------------------------------------------

/// Delete unverified localizations by cluster, optionally narrowed by
/// media filename.
async fn delete_by_filename_cluster(
    State(state): State<AppState>,
    Json(model): Json<ClusterFilter>,
) -> AppResult<Response> {
    let op = FilterOp::parse(&model.filter_media)?;

    if model.cluster_name.trim().is_empty() {
        return Err(CoreError::Validation("No cluster name provided".into()).into());
    }

    let media_filter = if model.media_name.trim().is_empty() {
        None
    } else {
        Some(AttrFilter::media_name(op, &model.media_name)?)
    };

    let counts = filtered_delete_counts(
        &state,
        model.project_name.as_deref(),
        &model.version_name,
        media_filter,
        vec![
            AttrFilter::equals("cluster", &model.cluster_name),
            AttrFilter::flag("verified", false),
        ],
    )
    .await?;

    let report = summary::filtered_delete_report(
        counts.num_boxes,
        counts.num_media,
        op.verb(),
        &model.media_name,
        &format!("cluster {}", model.cluster_name),
        &summary::version_label(&model.version_name, counts.version),
    );

    if counts.num_boxes == 0 || model.dry_run {
        return Ok(Json(Message::new(report)).into_response());
    }

    let description = format!(
        "delete localizations by filename {} and cluster {}",
        model.media_name, model.cluster_name
    );
    let job_id = spawn_filtered_delete(&state, counts, description).await;

    Ok(Json(Queued {
        message: format!(
            "Queued deletion by name {} and cluster {}",
            model.media_name, model.cluster_name
        ),
        job_id,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// DELETE /localizations/filename_saliency
// ---------------------------------------------------------------------------

/// Delete unverified localizations below a saliency threshold,
/// optionally narrowed by media filename.
async fn delete_by_filename_saliency(
    State(state): State<AppState>,
    Json(model): Json<SaliencyFilter>,
) -> AppResult<Response> {
    let op = FilterOp::parse(&model.filter_media)?;

    let saliency = model
        .saliency_value
        .ok_or_else(|| CoreError::Validation("No saliency value provided".into()))?;

    // An empty media name sweeps low-saliency boxes across all media.
    let media_filter = if model.media_name.trim().is_empty() {
        None
    } else {
        Some(AttrFilter::media_name(op, &model.media_name)?)
    };

    let counts = filtered_delete_counts(
        &state,
        model.project_name.as_deref(),
        &model.version_name,
        media_filter,
        vec![
            AttrFilter::less_than("saliency", saliency),
            AttrFilter::flag("verified", false),
        ],
    )
    .await?;

    let report = summary::filtered_delete_report(
        counts.num_boxes,
        counts.num_media,
        op.verb(),
        &model.media_name,
        &format!("saliency less than {saliency}"),
        &summary::version_label(&model.version_name, counts.version),
    );

    if counts.num_boxes == 0 || model.dry_run {
        return Ok(Json(Message::new(report)).into_response());
    }

    let description = format!(
        "delete localizations by filename {} and saliency less than {saliency}",
        model.media_name
    );
    let job_id = spawn_filtered_delete(&state, counts, description).await;

    Ok(Json(Queued {
        message: format!(
            "Queued deletion by name {} and saliency less than {saliency}",
            model.media_name
        ),
        job_id,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// DELETE /localizations/id
// ---------------------------------------------------------------------------

/// Delete the unverified localizations of a single media item.
async fn delete_by_media_id(
    State(state): State<AppState>,
    Json(model): Json<MediaIdFilter>,
) -> AppResult<Response> {
    let project = project_name(model.project_name.as_deref(), &state);
    let spec = resolve_spec(&state.tator, &state.directory, project).await?;

    let media_id = model
        .media_id
        .ok_or_else(|| CoreError::Validation("Media id must be provided".into()))?;

    let loc_filters = FilterSet::new().with(FilterAxis::Primary, AttrFilter::flag("verified", false));
    let count_query = loc_filters.clone().with_media_ids(&[media_id]).build();
    let num_boxes = counts::localization_count(&state.tator, &spec, &count_query).await?;

    if num_boxes == 0 {
        return Ok(Json(Message::new(format!(
            "No unverified localizations found for media id {media_id}"
        )))
        .into_response());
    }

    if model.dry_run {
        tracing::info!(num_boxes, media_id, "Found unverified localizations");
        return Ok(Json(Message::new(format!(
            "Found {num_boxes} unverified localizations for media id {media_id}"
        )))
        .into_response());
    }

    let client = Arc::clone(&state.tator);
    let job_id = state
        .jobs
        .spawn(
            format!("delete localizations for media id {media_id}"),
            async move {
                delete_ops::delete_for_media_id(&client, &spec, media_id, loc_filters).await
            },
        )
        .await;

    Ok(Json(Queued {
        message: format!("Queued deletion of localizations for media id {media_id}"),
        job_id,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// DELETE /localizations/delete_flag
// ---------------------------------------------------------------------------

/// Delete every localization flagged for deletion.
async fn delete_flagged(
    State(state): State<AppState>,
    Json(model): Json<DeleteFlagFilter>,
) -> AppResult<Response> {
    let project = project_name(model.project_name.as_deref(), &state);
    let spec = resolve_spec(&state.tator, &state.directory, project).await?;

    let flagged = AttrFilter::flag("delete", true);

    let media_query = FilterSet::new()
        .with(FilterAxis::Related, flagged.clone())
        .build();
    let num_media = counts::media_count(&state.tator, &spec, &media_query).await?;
    tracing::debug!(num_media, "Counted media with boxes flagged for deletion");
    if num_media == 0 {
        return Ok(Json(Message::new("No medias found with boxes flagged for deletion"))
            .into_response());
    }

    let loc_filters = FilterSet::new().with(FilterAxis::Primary, flagged);
    let num_boxes = counts::localization_count(&state.tator, &spec, &loc_filters.build()).await?;
    if num_boxes == 0 {
        return Ok(Json(Message::new(
            "No localizations found for medias flagged for deletion",
        ))
        .into_response());
    }

    if model.dry_run {
        return Ok(Json(Message::new(format!(
            "Found {num_boxes} unverified localizations in {num_media} medias flagged for deletion"
        )))
        .into_response());
    }

    let counts = FilteredDelete {
        spec,
        version: None,
        media_query,
        loc_filters,
        num_media,
        num_boxes,
    };
    let job_id = spawn_filtered_delete(
        &state,
        counts,
        "delete localizations flagged for deletion".to_string(),
    )
    .await;

    Ok(Json(Queued {
        message: "Queued deletion of localizations in medias flagged for deletion".to_string(),
        job_id,
    })
    .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/localizations/filename", delete(delete_by_filename))
        .route("/localizations/filename_label", delete(delete_by_filename_label))
        .route("/localizations/filename_cluster", delete(delete_by_filename_cluster))
        .route("/localizations/filename_saliency", delete(delete_by_filename_saliency))
        .route("/localizations/id", delete(delete_by_media_id))
        .route("/localizations/delete_flag", delete(delete_flagged))
}
