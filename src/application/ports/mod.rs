//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod sync;
pub mod view;

// Re-export common types
pub use capture::{CaptureConstraints, CaptureDevice, DeviceError, DeviceStream};
pub use config::ConfigStore;
pub use sync::{SyncApi, SyncError};
pub use view::{ViewEvent, ViewSink};
