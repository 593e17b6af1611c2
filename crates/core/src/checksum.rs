//! Upload checksums
//!
//! The storage API verifies an optional `Checksum` request header against the
//! bytes it receives. The value is the SHA-256 digest of the content rendered
//! as uppercase hex.

use std::io::Read;

use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt};

const CHUNK_SIZE: usize = 64 * 1024;

/// Checksum of an in-memory buffer
pub fn checksum_bytes(data: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(data))
}

/// Checksum of everything `reader` yields.
///
/// The reader is consumed to EOF exactly once. Callers that also need to
/// upload the same bytes must rewind or buffer the source themselves.
pub fn generate<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode_upper(hasher.finalize()))
}

/// Async counterpart of [`generate`]
pub async fn generate_async<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode_upper(hasher.finalize()))
}
