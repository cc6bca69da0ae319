//! Non-mutating count and id-enumeration calls.

use mantis_core::error::CoreError;
use mantis_core::filter::TatorQuery;
use mantis_core::paginate::{batches, MEDIA_PAGE_SIZE};
use mantis_core::project::ProjectSpec;
use mantis_core::types::TatorId;
use mantis_tator::TatorClient;

use super::{require_box_type, upstream};

/// Count media matching the filters, summed over the project's image
/// and video types.
pub async fn media_count(
    client: &TatorClient,
    spec: &ProjectSpec,
    query: &TatorQuery,
) -> Result<u64, CoreError> {
    let mut count = 0;
    if let Some(image_type) = spec.image_type {
        tracing::debug!(project = spec.project_id, image_type, ?query, "Counting image media");
        count += client
            .get_media_count(spec.project_id, image_type, query)
            .await
            .map_err(upstream)?;
    }
    if let Some(video_type) = spec.video_type {
        tracing::debug!(project = spec.project_id, video_type, ?query, "Counting video media");
        count += client
            .get_media_count(spec.project_id, video_type, query)
            .await
            .map_err(upstream)?;
    }
    Ok(count)
}

/// Count box localizations matching the filters.
pub async fn localization_count(
    client: &TatorClient,
    spec: &ProjectSpec,
    query: &TatorQuery,
) -> Result<u64, CoreError> {
    let box_type = require_box_type(spec)?;
    tracing::debug!(project = spec.project_id, box_type, ?query, "Counting localizations");
    client
        .get_localization_count(spec.project_id, box_type, query)
        .await
        .map_err(upstream)
}

/// Enumerate the ids of all media matching the filters, page by page.
///
/// Ids are sorted and deduplicated so downstream mutation batches run
/// in ascending id order.
pub async fn media_ids(
    client: &TatorClient,
    spec: &ProjectSpec,
    query: &TatorQuery,
) -> Result<Vec<TatorId>, CoreError> {
    let total = media_count(client, spec, query).await? as usize;
    if total == 0 {
        tracing::info!(project = spec.project_id, ?query, "No media matched the filter");
        return Ok(Vec::new());
    }

    tracing::debug!(total, ?query, "Enumerating media ids");
    let mut ids = Vec::with_capacity(total);
    for range in batches(total, MEDIA_PAGE_SIZE) {
        let page = client
            .get_media_list(spec.project_id, range.start, range.stop, query)
            .await
            .map_err(upstream)?;
        ids.extend(page.into_iter().map(|m| m.id));
    }

    ids.sort_unstable();
    ids.dedup();
    tracing::debug!(found = ids.len(), "Media id enumeration complete");
    Ok(ids)
}
