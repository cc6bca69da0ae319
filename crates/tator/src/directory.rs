//! Project directory snapshot and per-request spec resolution.
//!
//! The directory is the only cached state in the service: a list of
//! projects fetched at startup and refreshed wholesale on demand.
//! Everything derived from it (type ids, version ids) is re-resolved on
//! every request.

use tokio::sync::RwLock;

use mantis_core::error::CoreError;
use mantis_core::project::{
    match_type_id, ProjectSpec, BOX_TYPE_NAMES, IMAGE_TYPE_NAMES, VIDEO_TYPE_NAMES,
};
use mantis_core::types::TatorId;

use crate::client::{TatorClient, TatorError};
use crate::models::Project;

/// Owned, re-fetchable snapshot of the Tator project list.
///
/// Readers take cheap cloned snapshots; a refresh swaps the whole list
/// at once.  Readers racing a refresh may observe the previous snapshot,
/// which is acceptable — the directory changes rarely and staleness only
/// delays visibility of new projects.
pub struct ProjectDirectory {
    projects: RwLock<Vec<Project>>,
}

impl ProjectDirectory {
    /// Directory over an explicit project list (tests, pre-fetched data).
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: RwLock::new(projects),
        }
    }

    /// Empty directory; the service starts degraded until a refresh
    /// succeeds.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Fetch the project list and build a directory from it.
    pub async fn fetch(client: &TatorClient) -> Result<Self, TatorError> {
        let projects = client.get_project_list().await?;
        tracing::info!(count = projects.len(), "Fetched project directory");
        Ok(Self::new(projects))
    }

    /// Replace the snapshot with a freshly fetched project list.
    pub async fn refresh(&self, client: &TatorClient) -> Result<usize, TatorError> {
        let fresh = client.get_project_list().await?;
        let count = fresh.len();
        *self.projects.write().await = fresh;
        tracing::info!(count, "Refreshed project directory");
        Ok(count)
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }

    /// Names of all known projects.
    pub async fn names(&self) -> Vec<String> {
        self.projects
            .read()
            .await
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    /// Look up a project by exact name.
    pub async fn find(&self, name: &str) -> Result<Project, CoreError> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| CoreError::ProjectNotFound {
                name: name.to_string(),
            })
    }
}

/// Resolve the identifiers an operation needs for one project.
///
/// Directory lookup first (unknown name short-circuits), then live type
/// lookups; absent box/image/video types leave the corresponding field
/// `None` for callers to check.
pub async fn resolve_spec(
    client: &TatorClient,
    directory: &ProjectDirectory,
    project_name: &str,
) -> Result<ProjectSpec, CoreError> {
    let project = directory.find(project_name).await?;

    let loc_types = client
        .get_localization_type_list(project.id)
        .await
        .map_err(upstream)?;
    let media_types = client
        .get_media_type_list(project.id)
        .await
        .map_err(upstream)?;

    let spec = ProjectSpec {
        box_type: match_type_id(
            &BOX_TYPE_NAMES,
            loc_types.iter().map(|t| (t.id, t.name.as_str())),
        ),
        image_type: match_type_id(
            &IMAGE_TYPE_NAMES,
            media_types.iter().map(|t| (t.id, t.name.as_str())),
        ),
        video_type: match_type_id(
            &VIDEO_TYPE_NAMES,
            media_types.iter().map(|t| (t.id, t.name.as_str())),
        ),
        project_name: project.name,
        project_id: project.id,
    };

    tracing::debug!(?spec, "Resolved project spec");
    Ok(spec)
}

/// Version id for a named version, `None` when the name is unknown.
pub async fn version_id(
    client: &TatorClient,
    project_id: TatorId,
    version_name: &str,
) -> Result<Option<TatorId>, CoreError> {
    let versions = client.get_version_list(project_id).await.map_err(upstream)?;
    Ok(versions
        .into_iter()
        .find(|v| v.name == version_name)
        .map(|v| v.id))
}

fn upstream(err: TatorError) -> CoreError {
    CoreError::Upstream(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn directory() -> ProjectDirectory {
        ProjectDirectory::new(vec![
            Project {
                id: 4,
                name: "901902-uavs".to_string(),
            },
            Project {
                id: 7,
                name: "i2map".to_string(),
            },
        ])
    }

    #[tokio::test]
    async fn find_known_project() {
        let project = directory().find("i2map").await.unwrap();
        assert_eq!(project.id, 7);
    }

    #[tokio::test]
    async fn find_unknown_project_is_not_found() {
        let err = directory().find("does-not-exist").await.unwrap_err();
        assert_matches!(err, CoreError::ProjectNotFound { name } if name == "does-not-exist");
    }

    #[tokio::test]
    async fn find_is_exact_match() {
        assert!(directory().find("i2").await.is_err());
    }

    #[tokio::test]
    async fn names_and_emptiness() {
        let dir = directory();
        assert!(!dir.is_empty().await);
        assert_eq!(dir.names().await, vec!["901902-uavs", "i2map"]);
        assert!(ProjectDirectory::empty().is_empty().await);
    }
}
