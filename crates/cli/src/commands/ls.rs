//! ls command - List a directory
//!
//! Prints the immediate children of a directory in the storage zone.

use clap::Args;
use serde::Serialize;

use bsc_core::{ObjectStore, StorageObject};

use super::report;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List a directory
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Directory path (zone/dir/)
    pub path: String,

    /// Also show checksums and replication targets
    #[arg(short, long)]
    pub long: bool,

    /// Summarize output (show totals)
    #[arg(long)]
    pub summarize: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput<'a> {
    items: &'a [StorageObject],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Summary {
    total_files: usize,
    total_directories: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

impl Summary {
    fn of(objects: &[StorageObject]) -> Self {
        let total_directories = objects.iter().filter(|o| o.is_directory).count();
        let total_size_bytes = objects.iter().map(|o| o.length).sum();
        Self {
            total_files: objects.len() - total_directories,
            total_directories,
            total_size_bytes,
            total_size_human: humansize::format_size(total_size_bytes, humansize::BINARY),
        }
    }
}

/// Execute the ls command
pub async fn execute(store: &dyn ObjectStore, args: LsArgs, formatter: &Formatter) -> ExitCode {
    let objects = match store.list_objects(&args.path).await {
        Ok(objects) => objects,
        Err(e) => return report(formatter, &e),
    };

    if formatter.is_json() {
        formatter.json(&LsOutput {
            items: &objects,
            summary: args.summarize.then(|| Summary::of(&objects)),
        });
        return ExitCode::Success;
    }

    for object in &objects {
        formatter.println(&format_entry(object, args.long));
    }

    if args.summarize {
        let summary = Summary::of(&objects);
        formatter.println(&format!(
            "\nTotal: {} files, {} directories, {}",
            summary.total_files, summary.total_directories, summary.total_size_human
        ));
    }

    ExitCode::Success
}

/// One line of human-readable listing
fn format_entry(object: &StorageObject, long: bool) -> String {
    let date = object.last_changed.strftime("%Y-%m-%d %H:%M:%S");

    let mut line = if object.is_directory {
        format!("[{date}] {:>10} {}/", "DIR", object.object_name)
    } else {
        let size = humansize::format_size(object.length, humansize::BINARY);
        format!("[{date}] {size:>10} {}", object.object_name)
    };

    if long {
        if let Some(checksum) = &object.checksum {
            line.push_str(&format!("  sha256:{checksum}"));
        }
        let zones = object.replicated_zone_names();
        if !zones.is_empty() {
            line.push_str(&format!("  replicas:{}", zones.join(",")));
        }
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{object, quiet_formatter, MockStore};
    use bsc_core::Error;

    fn args(path: &str) -> LsArgs {
        LsArgs {
            path: path.to_string(),
            long: false,
            summarize: true,
        }
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry(&object("a.txt", 2048, false), false),
            "[2024-05-02 08:30:15]      2 KiB a.txt"
        );
        assert_eq!(
            format_entry(&object("thumbs", 0, true), false),
            "[2024-05-02 08:30:15]        DIR thumbs/"
        );
    }

    #[test]
    fn test_format_entry_long() {
        let mut entry = object("a.txt", 1, false);
        entry.checksum = Some("ABCD".to_string());
        assert_eq!(
            format_entry(&entry, true),
            "[2024-05-02 08:30:15]        1 B a.txt  sha256:ABCD  replicas:DE,NY"
        );
    }

    #[test]
    fn test_summary() {
        let objects = vec![
            object("a", 1024, false),
            object("b", 1024, false),
            object("sub", 0, true),
        ];
        assert_eq!(
            Summary::of(&objects),
            Summary {
                total_files: 2,
                total_directories: 1,
                total_size_bytes: 2048,
                total_size_human: "2 KiB".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_ls_success() {
        let mut store = MockStore::new();
        store
            .expect_list_objects()
            .withf(|path| path == "zone/dir")
            .times(1)
            .returning(|_| Ok(vec![object("a.txt", 3, false)]));

        let code = execute(&store, args("zone/dir"), &quiet_formatter()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_ls_not_found() {
        let mut store = MockStore::new();
        store.expect_list_objects().returning(|path| {
            Err(Error::ObjectNotFound {
                path: path.to_string(),
            })
        });

        let code = execute(&store, args("zone/missing/"), &quiet_formatter()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_ls_path_validation() {
        let mut store = MockStore::new();
        store.expect_list_objects().returning(|_| {
            Err(Error::PathValidation(
                "Path validation failed. File path must begin with /zone/.".to_string(),
            ))
        });

        let code = execute(&store, args("other/"), &quiet_formatter()).await;
        assert_eq!(code, ExitCode::UsageError);
    }
}
