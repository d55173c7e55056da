//! Stowkit Upload Library
//!
//! Deduplicating upload gateway over object storage. Payloads are
//! validated against size and batch limits, classified into media folders
//! by declared MIME type, fingerprinted with SHA-256, and forwarded to the
//! configured storage backend. Repeated uploads of identical content
//! within the cache TTL are answered from the result cache without a new
//! storage put.

pub mod cache;
pub mod error;
pub mod filename;
pub mod gateway;
mod single_flight;
pub mod types;

// Re-export commonly used types
pub use cache::{Clock, MemoryCache, SystemClock, UploadCache};
pub use error::UploadError;
pub use gateway::{GatewaySettings, UploadGateway};
pub use stowkit_core::{ContentFingerprint, MediaFolder};
pub use types::{UploadFile, UploadOptions, UploadReceipt};
