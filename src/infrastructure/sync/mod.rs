//! Sync infrastructure module
//!
//! HTTP adapter for the tenant task/media API.

mod http;

pub use http::HttpSyncClient;
