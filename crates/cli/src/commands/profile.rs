//! Profile management commands
//!
//! A profile names a storage zone together with its access key, endpoint
//! and request timeout.

use clap::Subcommand;
use serde::Serialize;

use bsc_core::profile::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use bsc_core::{Profile, ProfileManager};

use super::report;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Add or update a profile
    Set(SetArgs),

    /// List all configured profiles
    List(ListArgs),

    /// Remove a profile
    Remove(RemoveArgs),

    /// Make a profile the default
    Default(DefaultArgs),
}

/// Arguments for the `profile set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Profile name (e.g., "prod", "staging")
    pub name: String,

    /// Storage zone name
    pub zone: String,

    /// Zone access key (the storage zone password)
    pub access_key: String,

    /// Storage API endpoint, e.g. a regional host
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Also make this the default profile
    #[arg(long)]
    pub default: bool,
}

/// Arguments for the `profile list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show endpoints and timeouts
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `profile remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the profile to remove
    pub name: String,
}

/// Arguments for the `profile default` command
#[derive(clap::Args, Debug)]
pub struct DefaultArgs {
    /// Name of the profile to use by default
    pub name: String,
}

/// JSON output for profile list
#[derive(Serialize)]
struct ProfileListOutput {
    profiles: Vec<ProfileInfo>,
}

/// Profile information for JSON output (without the access key)
#[derive(Serialize)]
struct ProfileInfo {
    name: String,
    zone: String,
    endpoint: String,
    timeout_secs: u64,
    default: bool,
}

/// JSON output for set/remove/default operations
#[derive(Serialize)]
struct ProfileOperationOutput {
    success: bool,
    profile: String,
    message: String,
}

/// Execute a profile subcommand
pub fn execute(cmd: ProfileCommands, formatter: &Formatter) -> ExitCode {
    match ProfileManager::new() {
        Ok(manager) => run(cmd, &manager, formatter),
        Err(e) => report(formatter, &e),
    }
}

fn run(cmd: ProfileCommands, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    match cmd {
        ProfileCommands::Set(args) => execute_set(args, manager, formatter),
        ProfileCommands::List(args) => execute_list(args, manager, formatter),
        ProfileCommands::Remove(args) => execute_remove(args, manager, formatter),
        ProfileCommands::Default(args) => execute_default(args, manager, formatter),
    }
}

fn execute_set(args: SetArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    for (value, what) in [
        (&args.name, "Profile name"),
        (&args.zone, "Zone name"),
        (&args.access_key, "Access key"),
    ] {
        if value.trim().is_empty() {
            formatter.error(&format!("{what} cannot be empty"));
            return ExitCode::UsageError;
        }
    }
    if args.zone.contains('/') {
        formatter.error("Zone name cannot contain '/'");
        return ExitCode::UsageError;
    }

    let mut profile = Profile::new(&args.name, &args.zone, &args.access_key);
    profile.endpoint = args.endpoint;
    profile.timeout_secs = args.timeout;

    let mut result = manager.set(profile);
    if args.default && result.is_ok() {
        result = manager.set_default(&args.name);
    }
    if let Err(e) = result {
        return report(formatter, &e);
    }

    operation_done(formatter, &args.name, "configured");
    ExitCode::Success
}

fn execute_list(args: ListArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    let listed = manager
        .list()
        .and_then(|profiles| Ok((profiles, manager.default_name()?)));
    let (profiles, default) = match listed {
        Ok(listed) => listed,
        Err(e) => return report(formatter, &e),
    };
    let is_default = |p: &Profile| default.as_deref() == Some(p.name.as_str());

    if formatter.is_json() {
        formatter.json(&ProfileListOutput {
            profiles: profiles
                .iter()
                .map(|p| ProfileInfo {
                    name: p.name.clone(),
                    zone: p.zone.clone(),
                    endpoint: p.endpoint.clone(),
                    timeout_secs: p.timeout_secs,
                    default: is_default(p),
                })
                .collect(),
        });
    } else if profiles.is_empty() {
        formatter.println("No profiles configured.");
    } else {
        for p in &profiles {
            let marker = if is_default(p) { "*" } else { " " };
            if args.long {
                formatter.println(&format!(
                    "{marker} {:<12} {:<20} {} (timeout: {}s)",
                    p.name, p.zone, p.endpoint, p.timeout_secs
                ));
            } else {
                formatter.println(&format!("{marker} {:<12} {}", p.name, p.zone));
            }
        }
    }

    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            operation_done(formatter, &args.name, "removed");
            ExitCode::Success
        }
        Err(bsc_core::Error::ProfileNotFound(_)) => {
            formatter.error(&format!("Profile '{}' not found", args.name));
            ExitCode::NotFound
        }
        Err(e) => report(formatter, &e),
    }
}

fn execute_default(args: DefaultArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    match manager.set_default(&args.name) {
        Ok(()) => {
            operation_done(formatter, &args.name, "set as default");
            ExitCode::Success
        }
        Err(bsc_core::Error::ProfileNotFound(_)) => {
            formatter.error(&format!("Profile '{}' not found", args.name));
            ExitCode::NotFound
        }
        Err(e) => report(formatter, &e),
    }
}

fn operation_done(formatter: &Formatter, name: &str, action: &str) {
    let message = format!("Profile '{name}' {action}");
    if formatter.is_json() {
        formatter.json(&ProfileOperationOutput {
            success: true,
            profile: name.to_string(),
            message,
        });
    } else {
        formatter.success(&message);
    }
}
