//! File-backed capture device adapter
//!
//! Streams an existing file as chunked capture input. Used by the CLI
//! `record` command and as a stand-in where no live camera exists.

use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{CaptureConstraints, CaptureDevice, DeviceError, DeviceStream};
use crate::domain::config::DEFAULT_CHUNK_SIZE;

/// Capture device that replays a file as a chunked stream
pub struct FileCaptureDevice {
    path: PathBuf,
    chunk_size: usize,
}

impl FileCaptureDevice {
    /// Create a device reading the given file with the default chunk size
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk size (bytes). Values below 1 are clamped.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

#[async_trait]
impl CaptureDevice for FileCaptureDevice {
    async fn open(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Box<dyn DeviceStream>, DeviceError> {
        let data = fs::read(&self.path).await.map_err(|e| {
            DeviceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let chunks = data
            .chunks(self.chunk_size)
            .map(|c| c.to_vec())
            .collect::<VecDeque<_>>();

        let tracks = usize::from(constraints.video) + usize::from(constraints.audio);
        Ok(Box::new(FileStream { chunks, tracks }))
    }
}

struct FileStream {
    chunks: VecDeque<Vec<u8>>,
    tracks: usize,
}

#[async_trait]
impl DeviceStream for FileStream {
    async fn next_chunk(&mut self) -> Option<Vec<u8>> {
        if self.tracks == 0 {
            return None;
        }
        self.chunks.pop_front()
    }

    fn pending_chunk(&mut self) -> Option<Vec<u8>> {
        if self.tracks == 0 {
            return None;
        }
        self.chunks.pop_front()
    }

    fn stop_tracks(&mut self) {
        self.tracks = 0;
        self.chunks.clear();
    }

    fn active_tracks(&self) -> usize {
        self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn streams_file_in_chunks() {
        let file = fixture(&[1, 2, 3, 4, 5]);
        let device = FileCaptureDevice::new(file.path()).with_chunk_size(2);

        let mut stream = device.open(&CaptureConstraints::default()).await.unwrap();
        assert_eq!(stream.active_tracks(), 2);
        assert_eq!(stream.next_chunk().await, Some(vec![1, 2]));
        assert_eq!(stream.next_chunk().await, Some(vec![3, 4]));
        assert_eq!(stream.next_chunk().await, Some(vec![5]));
        assert_eq!(stream.next_chunk().await, None);
    }

    #[tokio::test]
    async fn stop_tracks_ends_delivery() {
        let file = fixture(&[1, 2, 3, 4]);
        let device = FileCaptureDevice::new(file.path()).with_chunk_size(1);

        let mut stream = device.open(&CaptureConstraints::default()).await.unwrap();
        assert_eq!(stream.next_chunk().await, Some(vec![1]));
        stream.stop_tracks();
        assert_eq!(stream.active_tracks(), 0);
        assert_eq!(stream.next_chunk().await, None);
        assert_eq!(stream.pending_chunk(), None);
    }

    #[tokio::test]
    async fn missing_file_is_device_unavailable() {
        let device = FileCaptureDevice::new("/nonexistent/capture.webm");

        let err = device
            .open(&CaptureConstraints::default())
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, DeviceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn track_count_follows_constraints() {
        let file = fixture(&[1]);
        let device = FileCaptureDevice::new(file.path());

        let constraints = CaptureConstraints {
            video: true,
            audio: false,
            prefer_rear_camera: false,
        };
        let stream = device.open(&constraints).await.unwrap();
        assert_eq!(stream.active_tracks(), 1);
    }
}
