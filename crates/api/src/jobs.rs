//! In-memory registry for deferred bulk-mutation jobs.
//!
//! Queuing returns immediately with a [`JobId`]; the mutation runs in a
//! detached tokio task that records its terminal state here.  Failures
//! are logged and visible through `GET /jobs/{id}`, never surfaced to
//! the original caller — the "queued" acknowledgement has already gone
//! out by the time the task runs.  Records live for the process
//! lifetime; nothing is persisted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use mantis_core::error::CoreError;
use mantis_core::types::Timestamp;

pub type JobId = Uuid;

/// Lifecycle of one deferred mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    /// The task completed; `modified` counts localizations patched or
    /// deleted.
    Succeeded { modified: u64 },
    Failed { error: String },
}

impl JobState {
    fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

/// One tracked job.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub id: JobId,
    pub description: String,
    #[serde(flatten)]
    pub state: JobState,
    pub queued_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}

/// Process-local job store.  Cheaply cloneable; clones share the same
/// underlying map.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<JobId, JobRecord>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a mutation future and return its handle immediately.
    pub async fn spawn<F>(&self, description: impl Into<String>, task: F) -> JobId
    where
        F: Future<Output = Result<u64, CoreError>> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let description = description.into();

        self.jobs.write().await.insert(
            id,
            JobRecord {
                id,
                description: description.clone(),
                state: JobState::Queued,
                queued_at: Utc::now(),
                finished_at: None,
            },
        );

        let registry = self.clone();
        tokio::spawn(async move {
            registry.set_state(id, JobState::Running).await;
            tracing::info!(job_id = %id, description, "Deferred task started");

            match task.await {
                Ok(modified) => {
                    tracing::info!(job_id = %id, modified, "Deferred task finished");
                    registry
                        .set_state(id, JobState::Succeeded { modified })
                        .await;
                }
                Err(e) => {
                    tracing::error!(job_id = %id, error = %e, "Deferred task failed");
                    registry
                        .set_state(
                            id,
                            JobState::Failed {
                                error: e.to_string(),
                            },
                        )
                        .await;
                }
            }
        });

        id
    }

    /// Current record for a job, if known.
    pub async fn get(&self, id: JobId) -> Option<JobRecord> {
        self.jobs.read().await.get(&id).cloned()
    }

    async fn set_state(&self, id: JobId, state: JobState) {
        if let Some(record) = self.jobs.write().await.get_mut(&id) {
            if state.is_terminal() {
                record.finished_at = Some(Utc::now());
            }
            record.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Duration;

    /// Poll until the job reaches a terminal state (bounded).
    async fn wait_terminal(registry: &JobRegistry, id: JobId) -> JobRecord {
        for _ in 0..100 {
            let record = registry.get(id).await.expect("job should exist");
            if record.state.is_terminal() {
                return record;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job never reached a terminal state");
    }

    #[tokio::test]
    async fn successful_job_records_modified_count() {
        let registry = JobRegistry::new();
        let id = registry.spawn("patch 42 boxes", async { Ok(42) }).await;

        let record = wait_terminal(&registry, id).await;
        assert_matches!(record.state, JobState::Succeeded { modified: 42 });
        assert!(record.finished_at.is_some());
    }

    #[tokio::test]
    async fn failed_job_records_error() {
        let registry = JobRegistry::new();
        let id = registry
            .spawn("doomed", async {
                Err(CoreError::Upstream("connection refused".into()))
            })
            .await;

        let record = wait_terminal(&registry, id).await;
        assert_matches!(record.state, JobState::Failed { .. });
    }

    #[tokio::test]
    async fn unknown_job_is_none() {
        let registry = JobRegistry::new();
        assert!(registry.get(Uuid::new_v4()).await.is_none());
    }
}
