/// Domain error taxonomy shared across the workspace.
///
/// A zero-result count is deliberately absent: "nothing matched" is a
/// terminal success state ("nothing to do"), never an error.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The project name is absent from the project directory.
    #[error("{name} project not found")]
    ProjectNotFound { name: String },

    /// The version name does not exist within the project.
    #[error("No version found for project {project} with version {version}")]
    VersionNotFound { project: String, version: String },

    /// The filter tag is not one of `Includes`/`Equals`/`LessThan`, or is
    /// not applicable to the attribute it was paired with.
    #[error("Invalid filter type {given}")]
    InvalidFilterType { given: String },

    /// A required request field is missing, blank, or out of range.
    #[error("{0}")]
    Validation(String),

    /// The Tator client or the aggregate database failed.
    #[error("Error: {0}")]
    Upstream(String),
}
