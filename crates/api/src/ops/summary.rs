//! Human-readable report lines for dry-run and zero-result responses.
//!
//! Every endpoint answers with prose rather than bare numbers; keeping
//! the formatting here keeps the phrasing stable across the near-twin
//! endpoints and makes it testable without a live backend.

use mantis_core::filter::TatorQuery;
use mantis_core::types::TatorId;

/// The version part of a report: the version name when it resolved,
/// otherwise "all versions".
pub fn version_label(version_name: &str, version_id: Option<TatorId>) -> String {
    if version_id.is_some() {
        version_name.to_string()
    } else {
        "all versions".to_string()
    }
}

/// Dry-run report for cluster label assignment.
pub fn cluster_assign_report(
    num_boxes: u64,
    cluster_name: &str,
    version: &str,
    num_media: u64,
) -> String {
    format!(
        "{num_boxes} unverified localizations in cluster {cluster_name} and {version} in {num_media} medias"
    )
}

/// Dry-run report for label assignment filtered by media filename and
/// cluster.
pub fn media_cluster_assign_report(
    num_boxes: u64,
    verb: &str,
    media_name: &str,
    cluster_name: &str,
    version: &str,
    num_media: u64,
) -> String {
    format!(
        "{num_boxes} unverified localizations that {verb} {media_name} and {cluster_name} and {version} in {num_media} medias"
    )
}

/// Report for the media-count endpoint.
pub fn media_count_report(num_media: u64, verb: &str, media_name: &str) -> String {
    format!("Found {num_media} medias that {verb} {media_name}")
}

/// Dry-run report for deletion by media filename.
pub fn filename_delete_report(
    num_media: u64,
    verb: &str,
    media_name: &str,
    num_boxes: u64,
) -> String {
    format!(
        "Found {num_media} medias that {verb} {media_name} with {num_boxes} unverified localizations"
    )
}

/// Report for the filtered-deletion endpoints (label, cluster,
/// saliency).  A zero count reads "no unverified localizations ..." —
/// the same sentence doubles as the nothing-to-do response.
pub fn filtered_delete_report(
    num_boxes: u64,
    num_media: u64,
    verb: &str,
    media_name: &str,
    criterion: &str,
    version: &str,
) -> String {
    let count = if num_boxes == 0 {
        "no".to_string()
    } else {
        num_boxes.to_string()
    };
    format!(
        "{count} unverified localizations in {num_media} media that {verb} {media_name} with {criterion} in version {version}"
    )
}

/// Zero-media response for mutation requests.
pub fn no_media_found(query: &TatorQuery) -> String {
    format!("No media found with {query:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantis_core::filter::{AttrFilter, FilterAxis, FilterOp, FilterSet};

    #[test]
    fn version_label_falls_back_to_all_versions() {
        assert_eq!(version_label("Baseline", Some(3)), "Baseline");
        assert_eq!(version_label("Baseline", None), "all versions");
    }

    #[test]
    fn cluster_assign_report_scenario() {
        // 2 matching media, 5 unverified boxes in cluster C3, version resolved.
        let report = cluster_assign_report(5, "C3", &version_label("Baseline", Some(1)), 2);
        assert_eq!(
            report,
            "5 unverified localizations in cluster C3 and Baseline in 2 medias"
        );
    }

    #[test]
    fn media_cluster_assign_report_uses_filter_verb() {
        let report = media_cluster_assign_report(
            5,
            FilterOp::Equals.verb(),
            "dive01_200m_0001.jpg",
            "C3",
            "Baseline",
            2,
        );
        assert_eq!(
            report,
            "5 unverified localizations that equals dive01_200m_0001.jpg and C3 and Baseline in 2 medias"
        );
    }

    #[test]
    fn media_count_report_substring_mode() {
        assert_eq!(
            media_count_report(12, FilterOp::Includes.verb(), "_200m_"),
            "Found 12 medias that include _200m_"
        );
    }

    #[test]
    fn filtered_delete_report_zero_reads_as_no() {
        let report = filtered_delete_report(0, 3, "include", "_200m_", "label Kelp", "Baseline");
        assert_eq!(
            report,
            "no unverified localizations in 3 media that include _200m_ with label Kelp in version Baseline"
        );
    }

    #[test]
    fn filtered_delete_report_nonzero() {
        let report =
            filtered_delete_report(7, 3, "include", "_200m_", "saliency less than 300", "all versions");
        assert!(report.starts_with("7 unverified localizations in 3 media"));
        assert!(report.contains("saliency less than 300"));
    }

    #[test]
    fn no_media_found_names_the_filters() {
        let query = FilterSet::new()
            .with(FilterAxis::Primary, AttrFilter::equals("$name", "a.jpg"))
            .build();
        assert!(no_media_found(&query).starts_with("No media found with "));
        assert!(no_media_found(&query).contains("$name::a.jpg"));
    }
}
