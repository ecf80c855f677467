//! Remote task/media store port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::media::{MediaArtifact, RemoteMedia};
use crate::domain::task::{Task, TaskStatus};

/// Sync errors. Never fatal to a capture session: callers fall back to
/// local state on every variant.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// Transport failure; the server could not be reached at all
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// The server answered with a non-success status
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The server answered but the body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Port for the remote task/media API.
///
/// Each call is attempted exactly once; retry policy is the caller's concern.
#[async_trait]
pub trait SyncApi: Send + Sync {
    /// Fetch the task collection.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, SyncError>;

    /// Update a task's status, returning the server's representation.
    async fn patch_task_status(
        &self,
        task_id: u64,
        status: TaskStatus,
    ) -> Result<Task, SyncError>;

    /// Fetch the media rows recorded for a task.
    async fn fetch_media(&self, task_id: u64) -> Result<Vec<RemoteMedia>, SyncError>;

    /// Upload an assembled artifact as a multipart form.
    async fn upload_media(&self, artifact: &MediaArtifact) -> Result<RemoteMedia, SyncError>;
}
