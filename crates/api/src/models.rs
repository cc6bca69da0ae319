//! Request-body models for the bulk-operation endpoints.
//!
//! Field defaults mirror the service conventions: `dry_run` defaults to
//! true (mutations are opt-in), `version_name` to `Baseline`, and
//! `project_name` falls back to the configured default project when
//! omitted.

use serde::Deserialize;
use validator::Validate;

use mantis_core::error::CoreError;
use mantis_core::types::TatorId;

fn default_true() -> bool {
    true
}

fn default_baseline() -> String {
    "Baseline".to_string()
}

fn default_equals() -> String {
    "Equals".to_string()
}

fn default_includes() -> String {
    "Includes".to_string()
}

/// Reject missing or blank media names.
pub fn check_media_name(media_name: &str) -> Result<(), CoreError> {
    if media_name.trim().is_empty() {
        return Err(CoreError::Validation("No media name provided".into()));
    }
    Ok(())
}

/// Media-name filter without a mutation flag (`POST /media_count_by_filename`).
#[derive(Debug, Deserialize)]
pub struct MediaNameFilterBase {
    #[serde(default = "default_equals")]
    pub filter_media: String,
    #[serde(default)]
    pub media_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
}

/// Media-name filter (`DELETE /localizations/filename`).
#[derive(Debug, Deserialize)]
pub struct MediaNameFilter {
    #[serde(default = "default_equals")]
    pub filter_media: String,
    #[serde(default)]
    pub media_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

/// Single-localization filter (`POST /label/id/{label}`).
#[derive(Debug, Deserialize, Validate)]
pub struct LocIdFilter {
    pub loc_id: TatorId,
    /// Optional model confidence stored alongside the label.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

/// Single-media filter (`DELETE /localizations/id`).
#[derive(Debug, Deserialize)]
pub struct MediaIdFilter {
    #[serde(default)]
    pub media_id: Option<TatorId>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

/// Cluster filter, optionally narrowed by media filename
/// (`POST /label/cluster/{label}`, `POST /label/filename_cluster/{label}`,
/// `DELETE /localizations/filename_cluster`).
#[derive(Debug, Deserialize)]
pub struct ClusterFilter {
    #[serde(default = "default_includes")]
    pub filter_media: String,
    #[serde(default)]
    pub media_name: String,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default = "default_baseline")]
    pub version_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

/// Label filter narrowed by media filename
/// (`DELETE /localizations/filename_label`).
#[derive(Debug, Deserialize)]
pub struct LabelFilter {
    #[serde(default = "default_equals")]
    pub filter_media: String,
    #[serde(default)]
    pub media_name: String,
    #[serde(default)]
    pub label_name: String,
    #[serde(default = "default_baseline")]
    pub version_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

/// Saliency-threshold filter (`DELETE /localizations/filename_saliency`).
#[derive(Debug, Deserialize)]
pub struct SaliencyFilter {
    #[serde(default = "default_includes")]
    pub filter_media: String,
    #[serde(default)]
    pub media_name: String,
    #[serde(default)]
    pub saliency_value: Option<i64>,
    #[serde(default = "default_baseline")]
    pub version_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

/// Delete-flag sweep (`DELETE /localizations/delete_flag`).
#[derive(Debug, Deserialize)]
pub struct DeleteFlagFilter {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
}

/// Score-thresholded label report (`POST /labels/score/{project_name}`).
#[derive(Debug, Deserialize)]
pub struct LabelScoreFilter {
    #[serde(default = "default_baseline")]
    pub version_name: String,
    pub score: f64,
}

/// Clustered label report (`POST /labels/cluster/{project_name}`).
#[derive(Debug, Deserialize)]
pub struct LabelClusterFilter {
    #[serde(default = "default_baseline")]
    pub version_name: String,
    /// Optional secondary grouping attribute (e.g. depth, altitude).
    #[serde(default)]
    pub attribute: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn cluster_filter_defaults() {
        let model: ClusterFilter = serde_json::from_str(r#"{"cluster_name": "C3"}"#).unwrap();
        assert_eq!(model.filter_media, "Includes");
        assert_eq!(model.version_name, "Baseline");
        assert!(model.dry_run);
        assert!(model.project_name.is_none());
        assert!(model.media_name.is_empty());
    }

    #[test]
    fn media_name_filter_defaults_to_equals() {
        let model: MediaNameFilter =
            serde_json::from_str(r#"{"media_name": "a.jpg"}"#).unwrap();
        assert_eq!(model.filter_media, "Equals");
        assert!(model.dry_run);
    }

    #[test]
    fn loc_id_score_range_is_validated() {
        let ok: LocIdFilter =
            serde_json::from_str(r#"{"loc_id": 5, "score": 0.9}"#).unwrap();
        assert!(ok.validate().is_ok());

        let too_high: LocIdFilter =
            serde_json::from_str(r#"{"loc_id": 5, "score": 1.5}"#).unwrap();
        assert!(too_high.validate().is_err());

        let absent: LocIdFilter = serde_json::from_str(r#"{"loc_id": 5}"#).unwrap();
        assert!(absent.validate().is_ok());
    }

    #[test]
    fn blank_media_names_are_rejected() {
        assert_matches!(check_media_name(""), Err(CoreError::Validation(_)));
        assert_matches!(check_media_name("   "), Err(CoreError::Validation(_)));
        assert!(check_media_name("dive01_200m_0001.jpg").is_ok());
    }
}
