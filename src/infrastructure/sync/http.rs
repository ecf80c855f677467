//! HTTP sync client adapter

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::multipart;
use serde::Serialize;

use crate::application::ports::{SyncApi, SyncError};
use crate::domain::media::{MediaArtifact, RemoteMedia};
use crate::domain::task::{Task, TaskStatus};

// Request types for the tenant API

#[derive(Debug, Serialize)]
struct StatusPatch {
    status: TaskStatus,
}

/// Sync client for the tenant task/media API.
///
/// Issues each request exactly once; transport failures are classified as
/// `Unreachable` and left to the caller's fallback path.
pub struct HttpSyncClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSyncClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Task collection URL
    fn tasks_url(&self) -> String {
        format!("{}/api/tasks/", self.base_url)
    }

    /// Single task URL
    fn task_url(&self, task_id: u64) -> String {
        format!("{}/api/tasks/{}/", self.base_url, task_id)
    }

    /// Media collection URL
    fn media_url(&self) -> String {
        format!("{}/api/media/", self.base_url)
    }

    /// Classify a non-success status as an API error
    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SyncError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Build the multipart form for an artifact upload
    fn upload_form(artifact: &MediaArtifact) -> Result<multipart::Form, SyncError> {
        let file_part = multipart::Part::bytes(artifact.payload().to_vec())
            .file_name(artifact.filename().to_string())
            .mime_str(artifact.mime_type().as_str())
            .map_err(|e| SyncError::Decode(format!("Invalid MIME type: {}", e)))?;

        Ok(multipart::Form::new()
            .part("file", file_part)
            .text("task", artifact.task_id().to_string())
            .text("title", artifact.title())
            .text(
                "recording_start",
                artifact
                    .started_at()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .text(
                "recording_end",
                artifact
                    .ended_at()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ))
    }
}

#[async_trait]
impl SyncApi for HttpSyncClient {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, SyncError> {
        let response = self
            .client
            .get(self.tasks_url())
            .send()
            .await
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;
        let response = Self::checked(response).await?;

        response
            .json::<Vec<Task>>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))
    }

    async fn patch_task_status(
        &self,
        task_id: u64,
        status: TaskStatus,
    ) -> Result<Task, SyncError> {
        let response = self
            .client
            .patch(self.task_url(task_id))
            .json(&StatusPatch { status })
            .send()
            .await
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;
        let response = Self::checked(response).await?;

        response
            .json::<Task>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))
    }

    async fn fetch_media(&self, task_id: u64) -> Result<Vec<RemoteMedia>, SyncError> {
        let response = self
            .client
            .get(self.media_url())
            .query(&[("task", task_id)])
            .send()
            .await
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;
        let response = Self::checked(response).await?;

        response
            .json::<Vec<RemoteMedia>>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))
    }

    async fn upload_media(&self, artifact: &MediaArtifact) -> Result<RemoteMedia, SyncError> {
        let form = Self::upload_form(artifact)?;

        let response = self
            .client
            .post(self.media_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;
        let response = Self::checked(response).await?;

        response
            .json::<RemoteMedia>()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))
    }
}
