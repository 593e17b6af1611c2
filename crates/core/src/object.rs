//! Storage object metadata
//!
//! Entries returned by a directory listing. Field names on the wire are
//! PascalCase and case-sensitive.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file or directory inside a storage zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageObject {
    /// Unique id of the object
    pub guid: Uuid,

    /// Id of the account that owns the object
    pub user_id: Uuid,

    /// Creation time as reported by the server (no offset)
    pub date_created: DateTime,

    /// Last modification time as reported by the server (no offset)
    pub last_changed: DateTime,

    /// Name of the zone the object is stored in
    pub storage_zone_name: String,

    /// Id of the zone the object is stored in
    pub storage_zone_id: u64,

    /// Id of the storage server holding the object
    pub server_id: u32,

    pub array_number: i32,

    /// Directory part, e.g. `/zone/images/`
    pub path: String,

    /// Last path component
    pub object_name: String,

    /// Size in bytes (0 for directories)
    pub length: u64,

    #[serde(default)]
    pub content_type: String,

    /// SHA-256 of the content, when the server has one
    pub checksum: Option<String>,

    /// Comma-separated list of zones this object is replicated to
    pub replicated_zones: Option<String>,

    pub is_directory: bool,
}

impl StorageObject {
    /// Path and object name joined
    pub fn full_path(&self) -> String {
        format!("{}{}", self.path, self.object_name)
    }

    /// Replicated zone names, split on commas
    pub fn replicated_zone_names(&self) -> Vec<&str> {
        self.replicated_zones
            .as_deref()
            .map(|zones| {
                zones
                    .split(',')
                    .map(str::trim)
                    .filter(|z| !z.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Decode the body of a list response
pub fn decode_listing(body: &[u8]) -> crate::Result<Vec<StorageObject>> {
    Ok(serde_json::from_slice(body)?)
}
