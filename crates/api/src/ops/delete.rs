//! Deferred bulk-deletion tasks.

use mantis_core::error::CoreError;
use mantis_core::filter::{FilterSet, TatorQuery};
use mantis_core::paginate::{batches, MUTATION_BATCH_SIZE};
use mantis_core::project::ProjectSpec;
use mantis_core::types::TatorId;
use mantis_tator::TatorClient;

use super::counts::{localization_count, media_ids};
use super::upstream;

/// Delete the localizations of a single media item matching the
/// localization filters.
pub async fn delete_for_media_id(
    client: &TatorClient,
    spec: &ProjectSpec,
    media_id: TatorId,
    loc_filters: FilterSet,
) -> Result<u64, CoreError> {
    let query = loc_filters.with_media_ids(&[media_id]).build();

    let count = localization_count(client, spec, &query).await?;
    tracing::info!(media_id, count, "Deleting localizations for media");

    client
        .delete_localization_list(spec.project_id, &query)
        .await
        .map_err(upstream)?;

    tracing::info!(
        media_id,
        project = %spec.project_name,
        "Done. Deleted localizations for media"
    );
    Ok(count)
}

/// Paginated delete of localizations by filter.
///
/// `media_query` selects the candidate media; `loc_filters` carries the
/// localization predicates and is re-applied to every ascending
/// media-id batch so the bulk endpoint only ever sees a bounded id
/// list.
pub async fn delete_by_filter(
    client: &TatorClient,
    spec: &ProjectSpec,
    media_query: &TatorQuery,
    loc_filters: FilterSet,
) -> Result<u64, CoreError> {
    let ids = media_ids(client, spec, media_query).await?;
    if ids.is_empty() {
        return Ok(0);
    }

    let mut deleted = 0;
    for range in batches(ids.len(), MUTATION_BATCH_SIZE) {
        let batch = &ids[range.start..range.stop];
        tracing::info!(
            start = range.start,
            stop = range.stop,
            "Deleting localizations for media batch"
        );

        let query = loc_filters.clone().with_media_ids(batch).build();
        let count = localization_count(client, spec, &query).await?;

        let response = client
            .delete_localization_list(spec.project_id, &query)
            .await
            .map_err(upstream)?;
        tracing::debug!(?response, "Bulk delete applied");
        deleted += count;

        tracing::info!(
            start = range.start,
            stop = range.stop,
            project = %spec.project_name,
            "Done. Deleted localizations for media batch"
        );
    }

    tracing::info!(deleted, "Filtered deletion complete");
    Ok(deleted)
}
