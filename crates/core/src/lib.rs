//! bsc-core: Core library for the storage-zone client
//!
//! This crate provides everything that does not need a network connection:
//! - Path normalization against a storage zone
//! - The error taxonomy and status-code mapping
//! - Upload checksums
//! - The `StorageObject` listing model
//! - Profile and configuration management
//! - The `ObjectStore` trait implemented by the HTTP client
//!
//! This crate is independent of any HTTP stack, which keeps it easy to test.

pub mod checksum;
pub mod config;
pub mod error;
pub mod object;
pub mod path;
pub mod profile;
pub mod traits;
pub mod zone;

pub use config::{Config, ConfigManager};
pub use error::{map_status, Error, Result};
pub use object::StorageObject;
pub use path::{normalize_path, PathKind, ZonePath};
pub use profile::{Profile, ProfileManager};
pub use traits::{ObjectReader, ObjectStore, UploadOptions};
pub use zone::StorageZone;
