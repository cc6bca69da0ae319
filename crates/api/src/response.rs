//! Shared response envelope types for API handlers.
//!
//! Every endpoint answers with one of these envelopes; business-level
//! failures reuse [`Message`] rather than ad-hoc JSON.

use serde::Serialize;

use crate::jobs::JobId;

/// Standard `{ "message": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement for a queued deferred mutation.  The mutation itself
/// runs out-of-band; `job_id` can be polled via `GET /jobs/{id}`.
#[derive(Debug, Serialize)]
pub struct Queued {
    pub message: String,
    pub job_id: JobId,
}

/// `GET /projects` payload.
#[derive(Debug, Serialize)]
pub struct Projects {
    pub projects: Vec<String>,
}

/// Label-count report payload.
#[derive(Debug, Serialize)]
pub struct Labels<T: Serialize> {
    pub labels: T,
}
