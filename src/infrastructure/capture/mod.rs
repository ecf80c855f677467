//! Capture infrastructure module
//!
//! Device stream adapters behind the `CaptureDevice` port.

mod file;

pub use file::FileCaptureDevice;
