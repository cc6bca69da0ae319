//! Bulk-operation building blocks.
//!
//! Every mutating operation follows the same shape: validate, run the
//! correlated dry-run counts (media axis first, then the localization
//! axis with structurally identical filters), then either report the
//! counts or queue a deferred task that re-resolves the filters and
//! mutates in fixed-size id batches.

pub mod assign;
pub mod counts;
pub mod delete;
pub mod summary;

use mantis_core::error::CoreError;
use mantis_core::project::ProjectSpec;
use mantis_core::types::TatorId;
use mantis_tator::TatorError;

/// Box annotation type id, or the "No box type found" failure mode.
pub fn require_box_type(spec: &ProjectSpec) -> Result<TatorId, CoreError> {
    spec.box_type.ok_or_else(|| {
        CoreError::Validation(format!(
            "No box type found for project {}",
            spec.project_name
        ))
    })
}

/// Image media type id, or the "No image type found" failure mode.
pub fn require_image_type(spec: &ProjectSpec) -> Result<TatorId, CoreError> {
    spec.image_type.ok_or_else(|| {
        CoreError::Validation(format!(
            "No image type found for project {}",
            spec.project_name
        ))
    })
}

pub(crate) fn upstream(err: TatorError) -> CoreError {
    CoreError::Upstream(err.to_string())
}
