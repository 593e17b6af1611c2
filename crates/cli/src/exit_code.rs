//! Exit code definitions for the bsc CLI
//!
//! Scripts depend on these values; changing one is a breaking change.

use bsc_core::Error;

/// Exit codes for the bsc CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General or unknown error, including unexpected server responses
    GeneralError = 1,

    /// User input error: invalid arguments, path validation, configuration
    UsageError = 2,

    /// The storage zone rejected the access key
    AuthError = 3,

    /// The object or directory does not exist
    NotFound = 4,

    /// The server rejected an upload because its checksum did not match
    ChecksumMismatch = 5,

    /// Operation was interrupted (e.g., Ctrl+C)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::AuthError),
            4 => Some(Self::NotFound),
            5 => Some(Self::ChecksumMismatch),
            130 => Some(Self::Interrupted),
            _ => None,
        }
    }

    /// Exit code for a library error
    pub fn from_error(error: &Error) -> Self {
        Self::from_i32(error.exit_code()).unwrap_or(Self::GeneralError)
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments, path or configuration",
            Self::AuthError => "Authentication failure",
            Self::NotFound => "Resource not found",
            Self::ChecksumMismatch => "Checksum mismatch",
            Self::Interrupted => "Operation interrupted",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::UsageError.as_i32(), 2);
        assert_eq!(ExitCode::AuthError.as_i32(), 3);
        assert_eq!(ExitCode::NotFound.as_i32(), 4);
        assert_eq!(ExitCode::ChecksumMismatch.as_i32(), 5);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_exit_code_from_i32() {
        assert_eq!(ExitCode::from_i32(0), Some(ExitCode::Success));
        assert_eq!(ExitCode::from_i32(3), Some(ExitCode::AuthError));
        assert_eq!(ExitCode::from_i32(5), Some(ExitCode::ChecksumMismatch));
        assert_eq!(ExitCode::from_i32(130), Some(ExitCode::Interrupted));
        assert_eq!(ExitCode::from_i32(99), None);
    }

    #[test]
    fn test_exit_code_from_error() {
        let cases = [
            (Error::PathValidation("bad".into()), ExitCode::UsageError),
            (
                Error::ObjectNotFound {
                    path: "zone/a".into(),
                },
                ExitCode::NotFound,
            ),
            (
                Error::Authentication {
                    zone: "zone".into(),
                    access_key: "key".into(),
                },
                ExitCode::AuthError,
            ),
            (
                Error::ChecksumMismatch {
                    path: "zone/a".into(),
                    checksum: "AB".into(),
                },
                ExitCode::ChecksumMismatch,
            ),
            (Error::Unknown { status: Some(500) }, ExitCode::GeneralError),
            (Error::Unknown { status: None }, ExitCode::GeneralError),
            (Error::ProfileNotFound("x".into()), ExitCode::UsageError),
        ];

        for (error, expected) in cases {
            assert_eq!(ExitCode::from_error(&error), expected, "{error:?}");
        }
    }

    #[test]
    fn test_exit_code_display() {
        let display = format!("{}", ExitCode::NotFound);
        assert!(display.contains("4"));
        assert!(display.contains("not found"));
    }
}
