//! CLI command definitions and execution
//!
//! Remote commands take a `&dyn ObjectStore` so their logic can run against
//! a mock; only `execute` here builds the real client from a profile.

use clap::{Parser, Subcommand};

use bsc_core::config::Defaults;
use bsc_core::{ConfigManager, Error, ProfileManager};
use bsc_http::StorageClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod cat;
mod completions;
mod get;
mod ls;
mod pipe;
mod profile;
mod put;
mod rm;

/// bsc - storage zone CLI client
///
/// List, upload, download and delete files in a storage zone.
#[derive(Parser, Debug)]
#[command(name = "bsc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable the transfer spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Profile to use (defaults to the configured default profile)
    #[arg(short, long, global = true, env = "BSC_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage storage zone profiles
    #[command(subcommand)]
    Profile(profile::ProfileCommands),

    /// List a directory
    Ls(ls::LsArgs),

    /// Upload a local file
    Put(put::PutArgs),

    /// Stream stdin to a file
    Pipe(pipe::PipeArgs),

    /// Download a file to the local disk
    Get(get::GetArgs),

    /// Write a file to stdout
    Cat(cat::CatArgs),

    /// Delete files or directories
    Rm(rm::RmArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let defaults = ConfigManager::new()
        .and_then(|manager| manager.load())
        .map(|config| config.defaults)
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "using built-in output defaults");
            Defaults::default()
        });
    let formatter = Formatter::new(output_config(&cli, &defaults));
    let profile_name = cli.profile.as_deref();

    match cli.command {
        Commands::Profile(cmd) => profile::execute(cmd, &formatter),
        Commands::Completions(args) => completions::execute(args),
        Commands::Ls(args) => match connect(profile_name, &formatter) {
            Ok(client) => ls::execute(&client, args, &formatter).await,
            Err(code) => code,
        },
        Commands::Put(args) => match connect(profile_name, &formatter) {
            Ok(client) => put::execute(&client, args, &formatter).await,
            Err(code) => code,
        },
        Commands::Pipe(args) => match connect(profile_name, &formatter) {
            Ok(client) => pipe::execute(&client, args, &formatter).await,
            Err(code) => code,
        },
        Commands::Get(args) => match connect(profile_name, &formatter) {
            Ok(client) => get::execute(&client, args, &formatter).await,
            Err(code) => code,
        },
        Commands::Cat(args) => match connect(profile_name, &formatter) {
            Ok(client) => cat::execute(&client, args, &formatter).await,
            Err(code) => code,
        },
        Commands::Rm(args) => match connect(profile_name, &formatter) {
            Ok(client) => rm::execute(&client, client.zone(), args, &formatter).await,
            Err(code) => code,
        },
    }
}

/// Command-line flags override the config file defaults
fn output_config(cli: &Cli, defaults: &Defaults) -> OutputConfig {
    OutputConfig {
        json: cli.json || defaults.output == "json",
        no_color: cli.no_color || defaults.color == "never",
        no_progress: cli.no_progress || !defaults.progress,
        quiet: cli.quiet,
    }
}

/// Build a client from the selected profile
fn connect(profile: Option<&str>, formatter: &Formatter) -> Result<StorageClient, ExitCode> {
    let client = ProfileManager::new()
        .and_then(|manager| manager.resolve(profile))
        .and_then(|profile| {
            tracing::debug!(
                profile = %profile.name,
                zone = %profile.zone,
                endpoint = %profile.endpoint,
                "using profile"
            );
            StorageClient::from_profile(&profile)
        });

    client.map_err(|e| report(formatter, &e))
}

/// Print an error and pick the matching exit code
pub(crate) fn report(formatter: &Formatter, error: &Error) -> ExitCode {
    formatter.failure(error);
    ExitCode::from_error(error)
}
