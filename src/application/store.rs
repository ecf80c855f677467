//! Client-side task/media store use case

use std::sync::Arc;
use thiserror::Error;

use crate::domain::media::{MediaArtifact, MediaRecord};
use crate::domain::task::{Task, TaskStatus};

use super::ports::{SyncApi, SyncError, ViewEvent, ViewSink};

/// Errors from the task board use case
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No task is selected")]
    NoTaskSelected,

    #[error("Unknown task id {0}")]
    UnknownTask(u64),

    #[error("Artifact belongs to task {artifact}, but task {selected} is selected")]
    TaskMismatch { selected: u64, artifact: u64 },

    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),
}

/// Whether a status update reached the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The server accepted the PATCH and returned the task
    Confirmed,
    /// The server was unreachable; the change is held locally
    LocalOnly,
}

/// Whether an attached recording reached the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The upload succeeded and a remote record was returned
    Uploaded,
    /// The upload failed; the artifact is held as a local-only record
    LocalOnly,
}

/// Client-side cache of the task list, the selected task, and the media
/// known for it.
///
/// Status updates are optimistic: the in-memory task takes the new value
/// whether or not the PATCH succeeds, and a later successful fetch may
/// overwrite it with the server's value (last-fetch-wins). A failed upload
/// keeps the artifact visible as a local-only record, so visual
/// confirmation of a capture never depends on network availability.
pub struct TaskBoard<S, V>
where
    S: SyncApi,
    V: ViewSink,
{
    sync: S,
    view: V,
    tasks: Vec<Task>,
    selected: Option<Task>,
    media: Vec<MediaRecord>,
}

impl<S, V> TaskBoard<S, V>
where
    S: SyncApi,
    V: ViewSink,
{
    /// Create an empty board
    pub fn new(sync: S, view: V) -> Self {
        Self {
            sync,
            view,
            tasks: Vec::new(),
            selected: None,
            media: Vec::new(),
        }
    }

    /// The cached task list
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The currently selected task
    pub fn selected(&self) -> Option<&Task> {
        self.selected.as_ref()
    }

    /// Media known for the selected task, in arrival order
    pub fn media(&self) -> &[MediaRecord] {
        &self.media
    }

    /// Fetch the task list and replace the cache.
    ///
    /// A transport failure surfaces as-is; the board never fabricates
    /// data. A successful fetch overwrites any optimistic status on the
    /// selected task with the server's value.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let tasks = self.sync.fetch_tasks().await?;
        self.tasks = tasks;

        if let Some(selected) = self.selected.as_mut() {
            if let Some(current) = self.tasks.iter().find(|t| t.id == selected.id) {
                *selected = current.clone();
                let id = selected.id;
                self.view.publish(ViewEvent::TaskChanged(id)).await;
            }
        }

        self.view.publish(ViewEvent::TaskListChanged).await;
        Ok(())
    }

    /// Select a task from the cached list and load its media.
    ///
    /// A failed media fetch means "nothing retrievable this round", not
    /// "zero records exist" - the list stays empty and a notice is raised.
    pub async fn select(&mut self, task_id: u64) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or(StoreError::UnknownTask(task_id))?;

        self.selected = Some(task);
        self.media.clear();

        match self.sync.fetch_media(task_id).await {
            Ok(rows) => {
                self.media = rows.into_iter().map(MediaRecord::Remote).collect();
            }
            Err(e) => {
                self.view
                    .publish(ViewEvent::Notice(format!("Media list unavailable: {}", e)))
                    .await;
            }
        }

        self.view.publish(ViewEvent::TaskChanged(task_id)).await;
        self.view.publish(ViewEvent::MediaChanged(task_id)).await;
        Ok(())
    }

    /// Re-fetch the media list for the selected task, keeping local-only
    /// records appended after the remote rows.
    pub async fn reload_media(&mut self) -> Result<(), StoreError> {
        let task_id = self
            .selected
            .as_ref()
            .map(|t| t.id)
            .ok_or(StoreError::NoTaskSelected)?;

        match self.sync.fetch_media(task_id).await {
            Ok(rows) => {
                let locals: Vec<MediaRecord> = self
                    .media
                    .drain(..)
                    .filter(|r| r.is_local())
                    .collect();
                self.media = rows.into_iter().map(MediaRecord::Remote).collect();
                self.media.extend(locals);
                self.view.publish(ViewEvent::MediaChanged(task_id)).await;
            }
            Err(e) => {
                self.view
                    .publish(ViewEvent::Notice(format!("Media list unavailable: {}", e)))
                    .await;
            }
        }
        Ok(())
    }

    /// Update the selected task's status, optimistically.
    ///
    /// The in-memory task takes the new value before the PATCH is
    /// attempted; a remote failure keeps the local value.
    pub async fn set_status(&mut self, status: TaskStatus) -> Result<StatusOutcome, StoreError> {
        let task = self.selected.as_mut().ok_or(StoreError::NoTaskSelected)?;
        let task_id = task.id;

        task.status = status;
        // the server's display label no longer matches the new status
        task.status_display = None;
        if let Some(cached) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            cached.status = status;
            cached.status_display = None;
        }
        self.view.publish(ViewEvent::TaskChanged(task_id)).await;

        match self.sync.patch_task_status(task_id, status).await {
            Ok(server_task) => {
                if let Some(cached) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                    *cached = server_task.clone();
                }
                self.selected = Some(server_task);
                self.view.publish(ViewEvent::TaskChanged(task_id)).await;
                Ok(StatusOutcome::Confirmed)
            }
            Err(e) => {
                self.view
                    .publish(ViewEvent::Notice(format!(
                        "Status changed locally only: {}",
                        e
                    )))
                    .await;
                Ok(StatusOutcome::LocalOnly)
            }
        }
    }

    /// Attach an assembled recording to the selected task.
    ///
    /// On upload failure the artifact is appended as a local-only record;
    /// the media list grows by exactly one entry either way.
    pub async fn attach_recording(
        &mut self,
        artifact: MediaArtifact,
    ) -> Result<AttachOutcome, StoreError> {
        let selected = self.selected.as_ref().ok_or(StoreError::NoTaskSelected)?;
        if artifact.task_id() != selected.id {
            return Err(StoreError::TaskMismatch {
                selected: selected.id,
                artifact: artifact.task_id(),
            });
        }
        let task_id = selected.id;

        let outcome = match self.sync.upload_media(&artifact).await {
            Ok(remote) => {
                self.media.push(MediaRecord::Remote(remote));
                self.view
                    .publish(ViewEvent::Notice("Recording uploaded".to_string()))
                    .await;
                AttachOutcome::Uploaded
            }
            Err(e) => {
                self.media.push(MediaRecord::Local(Arc::new(artifact)));
                self.view
                    .publish(ViewEvent::Notice(format!(
                        "Upload failed, recording kept locally: {}",
                        e
                    )))
                    .await;
                AttachOutcome::LocalOnly
            }
        };

        self.view.publish(ViewEvent::MediaChanged(task_id)).await;
        Ok(outcome)
    }
}
