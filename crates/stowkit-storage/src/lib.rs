//! Stowkit Storage Library
//!
//! This crate provides the object storage abstraction for stowkit.
//! It includes the ObjectStorage trait and implementations for S3 and
//! the local filesystem, plus a config-driven factory.
//!
//! # Storage key format
//!
//! Keys are relative paths of the form `{folder}/{filename}`, e.g.
//! `images/3f2b9c.png`. Keys must not contain `..` or a leading `/`;
//! backends reject such keys rather than normalizing them.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use stowkit_core::StorageBackend;
pub use traits::{ObjectStorage, StorageError, StorageLocation, StorageResult, StoredObject};
