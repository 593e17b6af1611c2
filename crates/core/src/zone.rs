//! Storage zone identity
//!
//! A zone name and the access key that unlocks it. Both are fixed when the
//! zone is created and only read afterwards.

use crate::error::{map_status, Error, Result};
use crate::path::{normalize_path, PathKind, ZonePath};

/// A named storage zone and its credentials
#[derive(Clone, PartialEq, Eq)]
pub struct StorageZone {
    name: String,
    access_key: String,
}

impl StorageZone {
    pub fn new(name: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access_key: access_key.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Normalize `raw` into a path inside this zone
    pub fn normalize(&self, raw: &str, kind: PathKind) -> Result<ZonePath> {
        normalize_path(&self.name, raw, kind)
    }

    /// Map a failed response status for `path` to an error.
    ///
    /// Pass the checksum header sent with the request, if any.
    pub fn map_status(&self, status: u16, path: &str, checksum: Option<&str>) -> Error {
        map_status(status, path, &self.name, &self.access_key, checksum)
    }
}

impl std::fmt::Debug for StorageZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageZone")
            .field("name", &self.name)
            .field("access_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_accessors() {
        let zone = StorageZone::new("images", "key-123");
        assert_eq!(zone.name(), "images");
        assert_eq!(zone.access_key(), "key-123");
    }

    #[test]
    fn test_debug_redacts_access_key() {
        let zone = StorageZone::new("images", "key-123");
        let debug = format!("{zone:?}");
        assert!(debug.contains("images"));
        assert!(!debug.contains("key-123"));
    }

    #[test]
    fn test_normalize_uses_zone_name() {
        let zone = StorageZone::new("images", "key");
        let path = zone.normalize("/images/a.png", PathKind::File).unwrap();
        assert_eq!(path.as_str(), "images/a.png");

        let err = zone.normalize("/other/a.png", PathKind::File).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Path validation failed. File path must begin with /images/."
        );
    }

    #[test]
    fn test_map_status_uses_credentials() {
        let zone = StorageZone::new("images", "key-123");
        match zone.map_status(401, "images/a.png", None) {
            Error::Authentication { zone, access_key } => {
                assert_eq!(zone, "images");
                assert_eq!(access_key, "key-123");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            zone.map_status(418, "images/a.png", None),
            Error::Unknown { status: Some(418) }
        ));
    }
}
