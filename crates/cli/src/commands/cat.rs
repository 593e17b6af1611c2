//! cat command - Write a file to stdout
//!
//! The download is streamed, so large files are never held in memory.

use clap::Args;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use bsc_core::{ObjectStore, Result};

use super::report;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Write a file to stdout
#[derive(Args, Debug)]
pub struct CatArgs {
    /// File path (zone/dir/file)
    pub path: String,
}

/// Execute the cat command
pub async fn execute(store: &dyn ObjectStore, args: CatArgs, formatter: &Formatter) -> ExitCode {
    let mut stdout = tokio::io::stdout();
    match copy_to(store, &args.path, &mut stdout).await {
        Ok(_) => ExitCode::Success,
        Err(e) => report(formatter, &e),
    }
}

/// Stream a remote file into `writer`, returning the bytes written
async fn copy_to<W>(store: &dyn ObjectStore, path: &str, writer: &mut W) -> Result<u64>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut reader = store.download_to_stream(path).await?;
    let written = tokio::io::copy(&mut reader, writer).await?;
    writer.flush().await?;
    tracing::debug!(path, bytes = written, "cat complete");
    Ok(written)
}
