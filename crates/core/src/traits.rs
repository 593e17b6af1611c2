//! ObjectStore trait definition
//!
//! This trait defines the operations a storage-zone backend offers. It keeps
//! the CLI decoupled from the HTTP implementation and can be mocked in tests.

use std::path::Path;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;
use crate::object::StorageObject;

/// Owned stream of object content
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Options for uploads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Compute a checksum when none is supplied
    pub verify_checksum: bool,

    /// Precomputed SHA-256 of the content (uppercase hex). Sent whenever
    /// present, whether or not `verify_checksum` is set.
    pub checksum: Option<String>,
}

impl UploadOptions {
    /// Ask the client to compute and send a checksum
    pub fn verified() -> Self {
        Self {
            verify_checksum: true,
            checksum: None,
        }
    }

    /// Send a checksum computed by the caller
    pub fn with_checksum(checksum: impl Into<String>) -> Self {
        Self {
            verify_checksum: true,
            checksum: Some(checksum.into()),
        }
    }
}

/// Operations against one storage zone.
///
/// Paths are raw user input; every implementation normalizes them before
/// issuing its single request.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List the entries of a directory
    async fn list_objects(&self, path: &str) -> Result<Vec<StorageObject>>;

    /// Upload the content of `reader` to a file path
    async fn upload_from_stream(
        &self,
        reader: ObjectReader,
        path: &str,
        options: UploadOptions,
    ) -> Result<()>;

    /// Upload a local file to a file path
    async fn upload_from_local_file(
        &self,
        local_path: &Path,
        path: &str,
        options: UploadOptions,
    ) -> Result<()>;

    /// Open the content of a file for reading. The caller owns the stream.
    async fn download_to_stream(&self, path: &str) -> Result<ObjectReader>;

    /// Download a file into `local_path`, creating or truncating it.
    /// Returns the number of bytes written.
    async fn download_to_local_file(&self, path: &str, local_path: &Path) -> Result<u64>;

    /// Delete a file, or a directory with everything below it
    async fn delete_object(&self, path: &str) -> Result<()>;
}
