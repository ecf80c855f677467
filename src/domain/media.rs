//! Media artifact and record value objects

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::EmptyRecording;

/// Supported video MIME types for captured media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoMimeType {
    Webm,
    Mp4,
    Ogg,
}

impl VideoMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Webm => "video/webm",
            Self::Mp4 => "video/mp4",
            Self::Ogg => "video/ogg",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Ogg => "ogg",
        }
    }
}

impl fmt::Display for VideoMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for VideoMimeType {
    fn default() -> Self {
        Self::Webm
    }
}

/// An assembled recording, produced once per completed capture session.
/// Immutable after creation.
#[derive(Debug, Clone)]
pub struct MediaArtifact {
    payload: Vec<u8>,
    mime_type: VideoMimeType,
    task_id: u64,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    filename: String,
}

impl MediaArtifact {
    /// Get the raw payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload size in bytes
    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Get the declared MIME type
    pub fn mime_type(&self) -> VideoMimeType {
        self.mime_type
    }

    /// Get the owning task id
    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    /// Get the recording start timestamp
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Get the recording end timestamp
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    /// Get the generated filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Upload title for this artifact
    pub fn title(&self) -> String {
        format!("Recording for task #{}", self.task_id)
    }
}

/// Assemble the ordered chunk sequence of a stopped session into one artifact.
///
/// The payload is the concatenation of non-empty chunks in arrival order.
/// Refuses to emit an artifact with no payload.
pub fn assemble(
    task_id: u64,
    chunks: Vec<Vec<u8>>,
    mime_type: VideoMimeType,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
) -> Result<MediaArtifact, EmptyRecording> {
    let payload: Vec<u8> = chunks
        .into_iter()
        .filter(|c| !c.is_empty())
        .flatten()
        .collect();

    if payload.is_empty() {
        return Err(EmptyRecording { task_id });
    }

    // Collision-resistant within a session; same-second ties are acceptable
    let filename = format!(
        "mobile_task_{}_{}.{}",
        task_id,
        ended_at.timestamp_millis(),
        mime_type.extension()
    );

    Ok(MediaArtifact {
        payload,
        mime_type,
        task_id,
        started_at,
        ended_at,
        filename,
    })
}

/// A media row as returned by the remote store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteMedia {
    pub id: u64,
    /// Retrievable URL of the stored file
    pub file: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recording_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recording_end: Option<DateTime<Utc>>,
}

/// A media entry known for a task: confirmed by the remote store, or held
/// only in this process after a failed upload.
#[derive(Debug, Clone)]
pub enum MediaRecord {
    Remote(RemoteMedia),
    Local(Arc<MediaArtifact>),
}

impl MediaRecord {
    /// Whether this record exists only in the running process
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Display label for list rendering
    pub fn label(&self) -> String {
        match self {
            Self::Remote(m) => m
                .title
                .clone()
                .unwrap_or_else(|| format!("media #{}", m.id)),
            Self::Local(a) => format!("{} (local only)", a.filename()),
        }
    }
}
