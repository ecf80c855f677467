//! Capture device port interfaces

use async_trait::async_trait;
use thiserror::Error;

/// Device acquisition errors
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    /// Permission denied, no camera, or device busy. Fatal to the session.
    #[error("Capture device unavailable: {0}")]
    Unavailable(String),
}

/// Requested capture constraints
#[derive(Debug, Clone, Copy)]
pub struct CaptureConstraints {
    pub video: bool,
    pub audio: bool,
    /// Prefer the rear-facing camera when more than one is present
    pub prefer_rear_camera: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            video: true,
            audio: true,
            prefer_rear_camera: true,
        }
    }
}

/// Port for acquiring a live capture device
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Request the device and attach a live stream.
    ///
    /// # Returns
    /// An exclusively-owned stream handle, or `Unavailable` if the grant fails
    async fn open(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Box<dyn DeviceStream>, DeviceError>;
}

/// An exclusively-owned live device stream.
///
/// The stream's tracks must be stopped on every exit path from a session so
/// camera/microphone access is never leaked.
#[async_trait]
pub trait DeviceStream: Send {
    /// Wait for the next chunk. Returns None when the stream has ended
    /// or its tracks were stopped.
    async fn next_chunk(&mut self) -> Option<Vec<u8>>;

    /// Take a chunk that is already delivered but not yet read, without
    /// waiting. Used for the final flush after a stop event.
    fn pending_chunk(&mut self) -> Option<Vec<u8>>;

    /// Stop all tracks, releasing the device immediately.
    fn stop_tracks(&mut self);

    /// Number of tracks still live on this stream.
    fn active_tracks(&self) -> usize;
}
