//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the tenant HTTP API, capture streams, and
//! configuration storage.

pub mod capture;
pub mod config;
pub mod sync;

// Re-export adapters
pub use capture::FileCaptureDevice;
pub use config::XdgConfigStore;
pub use sync::HttpSyncClient;
