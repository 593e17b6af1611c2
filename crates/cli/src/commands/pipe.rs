//! pipe command - Stream stdin to a file
//!
//! Reads stdin to the end and uploads it. Useful for piping output from
//! other commands straight into the storage zone.

use clap::Args;
use serde::Serialize;

use bsc_core::{ObjectReader, ObjectStore};

use super::put::upload_options;
use super::report;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// Stream stdin to a file
#[derive(Args, Debug)]
pub struct PipeArgs {
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
struct PipeOutput {
    status: &'static str,
    target: String,
}

/// Execute the pipe command
pub async fn execute(store: &dyn ObjectStore, args: PipeArgs, formatter: &Formatter) -> ExitCode {
    upload(store, Box::pin(tokio::io::stdin()), args, formatter).await
}

async fn upload(
    store: &dyn ObjectStore,
    reader: ObjectReader,
    args: PipeArgs,
    formatter: &Formatter,
) -> ExitCode {
    let options = match upload_options(args.verify, args.checksum.as_deref()) {
        Ok(options) => options,
        Err(message) => {
            formatter.error(&message);
            return ExitCode::UsageError;
        }
    };

    let spinner = Spinner::new(formatter.config(), &format!("Uploading to {}", args.target));
    let result = store.upload_from_stream(reader, &args.target, options).await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        return report(formatter, &e);
    }

    if formatter.is_json() {
        formatter.json(&PipeOutput {
            status: "success",
            target: args.target,
        });
    } else {
        formatter.success(&format!("stdin -> {}", args.target));
    }

    ExitCode::Success
}
