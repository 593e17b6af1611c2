//! bsc - storage zone CLI client
//!
//! A command-line interface for listing, uploading, downloading and
//! deleting files in a storage zone.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bunny_storage_cli::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // --debug wins over RUST_LOG; otherwise only warnings are shown
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = tokio::select! {
        code = commands::execute(cli) => code,
        _ = tokio::signal::ctrl_c() => bunny_storage_cli::exit_code::ExitCode::Interrupted,
    };

    std::process::exit(exit_code.as_i32());
}
