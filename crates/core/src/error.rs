//! Error types for bsc-core
//!
//! One error enum covers the remote taxonomy (validation, not found,
//! authentication, checksum mismatch, unknown) and the local ambient failures
//! (configuration, IO, codecs). Every variant maps to a stable exit code.

use thiserror::Error;

/// Result type alias for bsc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by every [`Error::Unknown`]
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error has occured during the request.";

/// Error types for storage-zone operations
#[derive(Error, Debug)]
pub enum Error {
    /// The path was rejected locally, before any request was sent
    #[error("{0}")]
    PathValidation(String),

    /// The remote object does not exist (HTTP 404)
    #[error("Could not find part of the object path: {path}")]
    ObjectNotFound { path: String },

    /// The access key was rejected for the zone (HTTP 401)
    #[error("Authentication failed for storage zone '{zone}' with access key '{access_key}'.")]
    Authentication { zone: String, access_key: String },

    /// The server refused an upload whose checksum header did not match (HTTP 400)
    #[error("Upload checksum verification failed for '{path}' using checksum '{checksum}'.")]
    ChecksumMismatch { path: String, checksum: String },

    /// Any other non-success status, or a transport failure without a status
    #[error("An unknown error has occured during the request.")]
    Unknown { status: Option<u16> },

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::PathValidation(_) => 2,                       // UsageError
            Error::Config(_) | Error::ProfileNotFound(_) => 2,   // UsageError
            Error::InvalidUrl(_) => 2,                           // UsageError
            Error::Authentication { .. } => 3,                   // AuthError
            Error::ObjectNotFound { .. } => 4,                   // NotFound
            Error::ChecksumMismatch { .. } => 5,                 // ChecksumMismatch
            _ => 1,                                              // GeneralError
        }
    }
}

/// Map a non-success response status to the error taxonomy.
///
/// `checksum` is the value of the checksum header that accompanied the
/// request, if any. Only uploads send one, so a 400 is reported as a
/// checksum mismatch for uploads and as an unknown error everywhere else.
pub fn map_status(
    status: u16,
    path: &str,
    zone: &str,
    access_key: &str,
    checksum: Option<&str>,
) -> Error {
    match (status, checksum) {
        (404, _) => Error::ObjectNotFound {
            path: path.to_string(),
        },
        (401, _) => Error::Authentication {
            zone: zone.to_string(),
            access_key: access_key.to_string(),
        },
        (400, Some(checksum)) => Error::ChecksumMismatch {
            path: path.to_string(),
            checksum: checksum.to_string(),
        },
        _ => Error::Unknown {
            status: Some(status),
        },
    }
}
