//! rm command - Delete files and directories
//!
//! Deleting a directory path removes it together with its contents on the
//! server. Paths are processed in order; a missing path does not stop the
//! run, but an authentication or usage error does.

use clap::Args;
use serde::Serialize;

use bsc_core::{Error, ObjectStore, PathKind, StorageZone};

use super::report;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Delete files or directories
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Path(s) to delete (zone/dir/file or zone/dir/)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Ignore paths that do not exist
    #[arg(short, long)]
    pub force: bool,

    /// Only show what would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    deleted: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<String>,
    total: usize,
}

/// Execute the rm command
pub async fn execute(
    store: &dyn ObjectStore,
    zone: &StorageZone,
    args: RmArgs,
    formatter: &Formatter,
) -> ExitCode {
    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    let mut first_failure = None;

    for path in &args.paths {
        if args.dry_run {
            // Same validation a real delete applies before its request
            match zone.normalize(path, PathKind::Any) {
                Ok(normalized) => {
                    formatter.println(&format!("Would remove: {normalized}"));
                    deleted.push(normalized.into_string());
                }
                Err(e) => return report(formatter, &e),
            }
            continue;
        }

        match store.delete_object(path).await {
            Ok(()) => {
                if !formatter.is_json() {
                    formatter.println(&format!("Removed: {path}"));
                }
                deleted.push(path.clone());
            }
            Err(Error::ObjectNotFound { .. }) if args.force => {
                tracing::debug!(path = %path, "skipping missing path");
            }
            Err(e) => {
                let code = report(formatter, &e);
                if is_fatal(code) {
                    return code;
                }
                failed.push(path.clone());
                if first_failure.is_none() {
                    first_failure = Some(code);
                }
            }
        }
    }

    if formatter.is_json() {
        formatter.json(&RmOutput {
            status: if failed.is_empty() { "success" } else { "partial" },
            total: deleted.len(),
            deleted,
            failed,
        });
    } else if !args.dry_run && !deleted.is_empty() {
        formatter.success(&format!("Removed {} path(s).", deleted.len()));
    }

    first_failure.unwrap_or(ExitCode::Success)
}

/// Failures that would repeat for every remaining path
fn is_fatal(code: ExitCode) -> bool {
    matches!(code, ExitCode::AuthError | ExitCode::UsageError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{quiet_formatter, MockStore};
    use mockall::Sequence;

    fn args(paths: &[&str]) -> RmArgs {
        RmArgs {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            force: false,
            dry_run: false,
        }
    }

    fn zone() -> StorageZone {
        StorageZone::new("zone", "key")
    }

    fn not_found(path: &str) -> Error {
        Error::ObjectNotFound {
            path: path.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rm_deletes_in_order() {
        let mut seq = Sequence::new();
        let mut store = MockStore::new();
        for expected in ["zone/a.txt", "zone/dir/"] {
            store
                .expect_delete_object()
                .withf(move |path| path == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let rm = args(&["zone/a.txt", "zone/dir/"]);
        let code = execute(&store, &zone(), rm, &quiet_formatter()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_rm_continues_past_missing_path() {
        let mut store = MockStore::new();
        store
            .expect_delete_object()
            .withf(|path| path == "zone/missing")
            .times(1)
            .returning(|path| Err(not_found(path)));
        store
            .expect_delete_object()
            .withf(|path| path == "zone/present")
            .times(1)
            .returning(|_| Ok(()));

        let code = execute(
            &store,
            &zone(),
            args(&["zone/missing", "zone/present"]),
            &quiet_formatter(),
        )
        .await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_rm_force_ignores_missing_path() {
        let mut store = MockStore::new();
        store
            .expect_delete_object()
            .returning(|path| Err(not_found(path)));

        let mut rm = args(&["zone/missing"]);
        rm.force = true;
        let code = execute(&store, &zone(), rm, &quiet_formatter()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_rm_stops_on_auth_error() {
        let mut store = MockStore::new();
        store.expect_delete_object().times(1).returning(|_| {
            Err(Error::Authentication {
                zone: "zone".to_string(),
                access_key: "bad".to_string(),
            })
        });

        let rm = args(&["zone/a", "zone/b"]);
        let code = execute(&store, &zone(), rm, &quiet_formatter()).await;
        assert_eq!(code, ExitCode::AuthError);
    }

    #[tokio::test]
    async fn test_rm_dry_run_sends_nothing() {
        let mut store = MockStore::new();
        store.expect_delete_object().never();

        let mut rm = args(&["zone/a", "/zone//b/"]);
        rm.dry_run = true;
        let code = execute(&store, &zone(), rm, &quiet_formatter()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_rm_dry_run_rejects_invalid_paths() {
        let mut store = MockStore::new();
        store.expect_delete_object().never();

        for path in ["other/a", "zone/sub/../a"] {
            let mut rm = args(&["zone/a", path]);
            rm.dry_run = true;
            assert_eq!(
                execute(&store, &zone(), rm, &quiet_formatter()).await,
                ExitCode::UsageError,
                "{path}"
            );
        }
    }
}
