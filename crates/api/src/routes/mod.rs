pub mod jobs;
pub mod label;
pub mod labels;
pub mod localizations;
pub mod media;
pub mod meta;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// GET    /                                  service banner
/// GET    /health                            readiness (non-empty directory)
/// GET    /projects                          known project names
///
/// GET    /labels/{project_name}             verified label counts
/// POST   /labels/score/{project_name}       label counts above a score
/// POST   /labels/cluster/{project_name}     clustered label counts
///
/// POST   /label/id/{label}                  assign label to one localization
/// POST   /label/cluster/{label}             bulk assign by cluster
/// POST   /label/filename_cluster/{label}    bulk assign by filename + cluster
///
/// POST   /media_count_by_filename           media count only
///
/// DELETE /localizations/filename            delete by media filename
/// DELETE /localizations/filename_label      delete by filename + label
/// DELETE /localizations/filename_cluster    delete by filename + cluster
/// DELETE /localizations/filename_saliency   delete below a saliency threshold
/// DELETE /localizations/id                  delete by media id
/// DELETE /localizations/delete_flag         delete flagged localizations
///
/// GET    /jobs/{job_id}                     deferred job status
/// ```
pub fn app_router() -> Router<AppState> {
    Router::new()
        .merge(meta::router())
        .merge(labels::router())
        .merge(label::router())
        .merge(media::router())
        .merge(localizations::router())
        .merge(jobs::router())
}

/// The project a request targets: explicit `project_name`, or the
/// configured default.
pub(crate) fn project_name<'a>(explicit: Option<&'a str>, state: &'a AppState) -> &'a str {
    explicit.unwrap_or(&state.config.default_project)
}
