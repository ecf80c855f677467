//! FieldTask - field worker client for tenant-scoped task and media APIs
//!
//! This crate provides the core functionality for browsing assigned tasks,
//! updating their status, and capturing recordings that are uploaded to the
//! tenant's media endpoint (or kept locally when the server is unreachable).
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (HTTP sync, capture streams, config)
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
