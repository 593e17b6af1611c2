//! Output formatting utilities
//!
//! Formatters for human-readable and JSON output, plus the transfer spinner.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::Spinner;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable the transfer spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
