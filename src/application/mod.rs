//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod recording;
pub mod store;

// Re-export use cases
pub use recording::{RecordingController, RecordingError};
pub use store::{AttachOutcome, StatusOutcome, StoreError, TaskBoard};
