//! Deferred label-assignment tasks.

use serde_json::json;

use mantis_core::error::CoreError;
use mantis_core::filter::{AttrFilter, FilterAxis, FilterSet};
use mantis_core::paginate::{batches, MUTATION_BATCH_SIZE};
use mantis_core::project::ProjectSpec;
use mantis_core::types::TatorId;
use mantis_tator::models::LocalizationBulkUpdate;
use mantis_tator::TatorClient;

use super::counts::media_ids;
use super::{require_box_type, upstream};

/// Patch the label (and optional score) of a single localization.
pub async fn assign_label_by_id(
    client: &TatorClient,
    spec: &ProjectSpec,
    loc_id: TatorId,
    label: &str,
    score: Option<f64>,
) -> Result<u64, CoreError> {
    let box_type = require_box_type(spec)?;

    tracing::info!(loc_id, label, "Assigning localization label");
    let attributes = match score {
        Some(score) => json!({ "Label": label, "score": score }),
        None => json!({ "Label": label }),
    };
    let update = LocalizationBulkUpdate::new(attributes, vec![loc_id]);

    client
        .update_localization_list(spec.project_id, box_type, &update)
        .await
        .map_err(upstream)?;
    Ok(1)
}

/// Paginated label assignment for every unverified localization in a
/// cluster, optionally narrowed to media matching a filename filter.
///
/// Matching media are enumerated first, then localizations are listed
/// and patched in ascending media-id batches.  Patched boxes are marked
/// verified.  A failed batch is logged and skipped; the task carries on
/// with the remaining batches.
pub async fn assign_cluster_label(
    client: &TatorClient,
    spec: &ProjectSpec,
    cluster_name: &str,
    media_filter: Option<AttrFilter>,
    version_id: Option<TatorId>,
    label: &str,
) -> Result<u64, CoreError> {
    let box_type = require_box_type(spec)?;

    if cluster_name.is_empty() {
        return Err(CoreError::Validation("No cluster name provided".into()));
    }

    tracing::debug!(
        project = %spec.project_name,
        cluster_name,
        "Fetching medias for cluster assignment"
    );
    let media_query = FilterSet::new()
        .with(FilterAxis::Related, AttrFilter::equals("cluster", cluster_name))
        .with_opt(FilterAxis::Primary, media_filter)
        .build();
    let ids = media_ids(client, spec, &media_query).await?;
    if ids.is_empty() {
        return Ok(0);
    }

    let mut modified = 0;
    for range in batches(ids.len(), MUTATION_BATCH_SIZE) {
        let batch = &ids[range.start..range.stop];
        tracing::debug!(
            start = range.start,
            stop = range.stop,
            cluster_name,
            "Fetching localizations for media batch"
        );

        let loc_query = FilterSet::new()
            .with(FilterAxis::Primary, AttrFilter::equals("cluster", cluster_name))
            .with_version(version_id)
            .with_media_ids(batch)
            .build();
        let localizations = client
            .get_localization_list(spec.project_id, box_type, &loc_query)
            .await
            .map_err(upstream)?;

        // The attribute query can over-return; keep exact cluster
        // matches only.
        let patch_ids: Vec<TatorId> = localizations
            .iter()
            .filter(|l| l.attr_str("cluster") == Some(cluster_name))
            .map(|l| l.id)
            .collect();

        if patch_ids.is_empty() {
            tracing::debug!(start = range.start, stop = range.stop, "No localizations in batch");
            continue;
        }

        let update = LocalizationBulkUpdate::new(
            json!({ "Label": label, "verified": true }),
            patch_ids.clone(),
        );
        match client
            .update_localization_list(spec.project_id, box_type, &update)
            .await
        {
            Ok(response) => {
                tracing::debug!(?response, patched = patch_ids.len(), "Bulk patch applied");
                modified += patch_ids.len() as u64;
            }
            Err(e) => {
                tracing::error!(
                    start = range.start,
                    stop = range.stop,
                    error = %e,
                    "Failed to update localization batch"
                );
            }
        }
    }

    tracing::info!(
        modified,
        cluster_name,
        label,
        "Cluster label assignment complete"
    );
    Ok(modified)
}
