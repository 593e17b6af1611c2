//! Path normalization and validation
//!
//! Every remote path handed to the API has the shape `<zone>/<key>`: no
//! leading slash, forward slashes only, no empty segments, and a trailing
//! slash exactly when it names a directory. [`normalize_path`] turns loosely
//! written input (Windows separators, stray whitespace, duplicated slashes,
//! a leading `/`) into that canonical form or rejects it.

use crate::error::{Error, Result};

/// What kind of entry a path is expected to name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathKind {
    /// A directory: the normalized path always ends with a single `/`
    Directory,
    /// A file: a trailing `/` is rejected
    File,
    /// No suffix rule is applied
    #[default]
    Any,
}

impl From<Option<bool>> for PathKind {
    fn from(is_directory: Option<bool>) -> Self {
        match is_directory {
            Some(true) => PathKind::Directory,
            Some(false) => PathKind::File,
            None => PathKind::Any,
        }
    }
}

/// A validated, canonical path inside a storage zone
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonePath(String);

impl ZonePath {
    /// The wire form of the path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the path names a directory
    pub fn is_dir(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Path segments starting with the zone name; directories end with an
    /// empty segment
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split('/')
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ZonePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZonePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize `raw` into a path rooted at `zone`.
///
/// Steps run in a fixed order: trim, convert `\` to `/`, strip leading
/// slashes, check the `<zone>/` prefix, apply the [`PathKind`] suffix rule,
/// then collapse repeated slashes.
pub fn normalize_path(zone: &str, raw: &str, kind: PathKind) -> Result<ZonePath> {
    let path = raw.trim().replace('\\', "/");
    let path = path.trim_start_matches('/');

    let prefix = format!("{zone}/");
    if !path.starts_with(&prefix) {
        return Err(Error::PathValidation(format!(
            "Path validation failed. File path must begin with /{zone}/."
        )));
    }

    let path = match kind {
        PathKind::Directory => format!("{}/", path.trim_end_matches('/')),
        PathKind::File if path.ends_with('/') => {
            return Err(Error::PathValidation(
                "The requested path is invalid, cannot be directory.".into(),
            ));
        }
        PathKind::File | PathKind::Any => path.to_string(),
    };

    let path = collapse_slashes(&path);
    if path.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(Error::PathValidation(
            "The requested path is invalid, cannot contain '.' or '..' segments.".into(),
        ));
    }

    Ok(ZonePath(path))
}

/// Collapse every run of `/` into a single `/`
fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }
    out
}
