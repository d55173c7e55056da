//! Stowkit Core Library
//!
//! This crate provides the shared domain types, error metadata, configuration,
//! and telemetry setup used by all Stowkit components.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod folder;
pub mod storage_types;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorMetadata, LogLevel};
pub use fingerprint::ContentFingerprint;
pub use folder::MediaFolder;
pub use storage_types::StorageBackend;
