//! Capture session use case

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::capture::{CaptureState, InvalidTransition, SessionLifecycle};
use crate::domain::error::EmptyRecording;
use crate::domain::media::{assemble, MediaArtifact, VideoMimeType};

use super::ports::{
    CaptureConstraints, CaptureDevice, DeviceError, DeviceStream, ViewEvent, ViewSink,
};

/// Errors from the recording use case
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("A capture session is already active")]
    SessionAlreadyActive,

    #[error("No capture session is active")]
    NoActiveSession,

    #[error("Device request failed: {0}")]
    Device(#[from] DeviceError),

    #[error("Session error: {0}")]
    InvalidTransition(#[from] InvalidTransition),

    #[error("Nothing recorded: {0}")]
    Empty(#[from] EmptyRecording),
}

/// One recording attempt: the exclusively-owned device stream, its
/// lifecycle state, and the chunks accumulated so far.
struct ActiveSession {
    task_id: u64,
    stream: Box<dyn DeviceStream>,
    lifecycle: SessionLifecycle,
    chunks: Vec<Vec<u8>>,
    started_at: Option<DateTime<Utc>>,
}

/// Capture session controller.
///
/// Owns at most one active session at a time and drives it through the
/// state machine: device acquisition, chunk accumulation, stop-with-flush
/// into an assembled artifact, or cancel with immediate track release.
pub struct RecordingController<D, V>
where
    D: CaptureDevice,
    V: ViewSink,
{
    device: D,
    view: V,
    constraints: CaptureConstraints,
    mime_type: VideoMimeType,
    session: Option<ActiveSession>,
}

impl<D, V> RecordingController<D, V>
where
    D: CaptureDevice,
    V: ViewSink,
{
    /// Create a controller with default constraints and MIME type
    pub fn new(device: D, view: V) -> Self {
        Self {
            device,
            view,
            constraints: CaptureConstraints::default(),
            mime_type: VideoMimeType::default(),
            session: None,
        }
    }

    /// Override the declared MIME type of produced artifacts
    pub fn with_mime_type(mut self, mime_type: VideoMimeType) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Current session state, `Idle` when no session exists
    pub fn state(&self) -> CaptureState {
        self.session
            .as_ref()
            .map(|s| s.lifecycle.state())
            .unwrap_or(CaptureState::Idle)
    }

    /// Task the active session records for, if any
    pub fn active_task(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.task_id)
    }

    /// Start a capture session for a task: acquire the device and attach
    /// the stream. Rejected while another session is active.
    pub async fn start(&mut self, task_id: u64) -> Result<(), RecordingError> {
        if self.session.is_some() {
            return Err(RecordingError::SessionAlreadyActive);
        }

        let mut lifecycle = SessionLifecycle::new();
        lifecycle.request_device()?;
        self.view
            .publish(ViewEvent::SessionState(CaptureState::RequestingDevice))
            .await;

        let stream = match self.device.open(&self.constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                lifecycle.device_denied()?;
                self.view
                    .publish(ViewEvent::SessionState(CaptureState::Idle))
                    .await;
                self.view
                    .publish(ViewEvent::Notice(format!("Camera error: {}", e)))
                    .await;
                return Err(e.into());
            }
        };

        lifecycle.device_ready()?;
        self.session = Some(ActiveSession {
            task_id,
            stream,
            lifecycle,
            chunks: Vec::new(),
            started_at: None,
        });
        self.view
            .publish(ViewEvent::SessionState(CaptureState::Ready))
            .await;

        Ok(())
    }

    /// Begin accumulating chunks and record the start timestamp
    pub async fn begin(&mut self) -> Result<(), RecordingError> {
        let session = self
            .session
            .as_mut()
            .ok_or(RecordingError::NoActiveSession)?;
        session.lifecycle.begin_recording()?;
        session.started_at = Some(Utc::now());

        self.view
            .publish(ViewEvent::SessionState(CaptureState::Recording))
            .await;
        Ok(())
    }

    /// Chunk delivery event. Zero-length chunks are dropped; chunks
    /// arriving outside the recording window are discarded.
    pub fn push_chunk(&mut self, data: Vec<u8>) {
        if data.is_empty() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            if session.lifecycle.accepts_chunks() {
                session.chunks.push(data);
            }
        }
    }

    /// Drain the device stream until it ends, appending each delivered
    /// chunk in arrival order. Returns the number of chunks appended.
    pub async fn pump(&mut self) -> Result<usize, RecordingError> {
        let session = self
            .session
            .as_mut()
            .ok_or(RecordingError::NoActiveSession)?;

        let mut appended = 0;
        while let Some(chunk) = session.stream.next_chunk().await {
            if chunk.is_empty() || !session.lifecycle.accepts_chunks() {
                continue;
            }
            session.chunks.push(chunk);
            appended += 1;
        }
        Ok(appended)
    }

    /// Stop the recording: flush chunks still pending delivery, release the
    /// device, and assemble the artifact. The session is destroyed whether
    /// or not assembly succeeds.
    pub async fn stop(&mut self) -> Result<MediaArtifact, RecordingError> {
        {
            let session = self
                .session
                .as_mut()
                .ok_or(RecordingError::NoActiveSession)?;
            session.lifecycle.stop()?;
        }

        // Transition committed; the session is consumed from here on.
        let mut session = match self.session.take() {
            Some(s) => s,
            None => return Err(RecordingError::NoActiveSession),
        };
        let ended_at = Utc::now();

        // Final flush: anything already delivered is appended before assembly
        while let Some(chunk) = session.stream.pending_chunk() {
            session.chunks.push(chunk);
        }
        session.stream.stop_tracks();

        self.view
            .publish(ViewEvent::SessionState(CaptureState::Stopped))
            .await;

        let started_at = session.started_at.unwrap_or(ended_at);
        let artifact = assemble(
            session.task_id,
            session.chunks,
            self.mime_type,
            started_at,
            ended_at,
        )?;
        Ok(artifact)
    }

    /// Cancel the session: stop all tracks immediately, discard buffered
    /// chunks, produce no artifact. A no-op when no session is active.
    pub async fn cancel(&mut self) {
        if let Some(mut session) = self.session.take() {
            let _ = session.lifecycle.cancel();
            session.stream.stop_tracks();
            self.view
                .publish(ViewEvent::SessionState(CaptureState::Cancelled))
                .await;
        }
    }
}
