//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod error;
pub mod media;
pub mod task;

// Re-export common types
pub use capture::{CaptureState, InvalidTransition, SessionLifecycle};
pub use config::AppConfig;
pub use error::*;
pub use media::{assemble, MediaArtifact, MediaRecord, RemoteMedia, VideoMimeType};
pub use task::{Stage, Task, TaskStatus};
