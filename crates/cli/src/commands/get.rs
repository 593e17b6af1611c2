//! get command - Download a file to the local disk
//!
//! Any existing local file is overwritten.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use bsc_core::ObjectStore;

use super::report;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// Download a file
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Source path (zone/dir/file)
    pub source: String,

    /// Local destination file
    pub target: PathBuf,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
    size_human: String,
}

/// Execute the get command
pub async fn execute(store: &dyn ObjectStore, args: GetArgs, formatter: &Formatter) -> ExitCode {
    let spinner = Spinner::new(formatter.config(), &format!("Downloading {}", args.source));
    let result = store.download_to_local_file(&args.source, &args.target).await;
    spinner.finish_and_clear();

    let size = match result {
        Ok(size) => size,
        Err(e) => return report(formatter, &e),
    };

    let size_human = humansize::format_size(size, humansize::BINARY);
    if formatter.is_json() {
        formatter.json(&GetOutput {
            status: "success",
            source: args.source,
            target: args.target.display().to_string(),
            size_bytes: size,
            size_human,
        });
    } else {
        formatter.success(&format!(
            "{} -> {} ({size_human})",
            args.source,
            args.target.display()
        ));
    }

    ExitCode::Success
}
