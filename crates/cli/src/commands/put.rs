//! put command - Upload a local file
//!
//! Streams a local file to a path in the storage zone, optionally asking the
//! server to verify its SHA-256 checksum.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use bsc_core::{Error, ObjectStore, UploadOptions};

use super::report;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// Upload a local file
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub source: PathBuf,

    /// Destination path (zone/dir/file)
    pub target: String,

    /// Compute the checksum locally and have the server verify it
    #[arg(long)]
    pub verify: bool,

    /// Use this SHA-256 checksum (64 hex characters) instead of computing one
    #[arg(long, value_name = "HEX")]
    pub checksum: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
    size_human: String,
    verified: bool,
}

/// Execute the put command
pub async fn execute(store: &dyn ObjectStore, args: PutArgs, formatter: &Formatter) -> ExitCode {
    let options = match upload_options(args.verify, args.checksum.as_deref()) {
        Ok(options) => options,
        Err(message) => {
            formatter.error(&message);
            return ExitCode::UsageError;
        }
    };
    let verified = options.verify_checksum || options.checksum.is_some();

    let size = match tokio::fs::metadata(&args.source).await {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => {
            formatter.error(&format!("Not a file: {}", args.source.display()));
            return ExitCode::UsageError;
        }
        Err(e) => return report(formatter, &Error::from(e)),
    };

    let spinner = Spinner::new(
        formatter.config(),
        &format!("Uploading {}", args.source.display()),
    );
    let result = store
        .upload_from_local_file(&args.source, &args.target, options)
        .await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        return report(formatter, &e);
    }

    let size_human = humansize::format_size(size, humansize::BINARY);
    if formatter.is_json() {
        formatter.json(&PutOutput {
            status: "success",
            source: args.source.display().to_string(),
            target: args.target,
            size_bytes: size,
            size_human,
            verified,
        });
    } else {
        formatter.success(&format!(
            "{} -> {} ({size_human})",
            args.source.display(),
            args.target
        ));
    }

    ExitCode::Success
}

/// Options for an upload, validating a user-supplied checksum
pub(crate) fn upload_options(
    verify: bool,
    checksum: Option<&str>,
) -> Result<UploadOptions, String> {
    match checksum {
        Some(hex) => {
            if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!(
                    "Invalid checksum '{hex}': expected 64 hexadecimal characters"
                ));
            }
            Ok(UploadOptions::with_checksum(hex.to_ascii_uppercase()))
        }
        None if verify => Ok(UploadOptions::verified()),
        None => Ok(UploadOptions::default()),
    }
}
