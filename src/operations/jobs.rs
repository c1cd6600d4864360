use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::local::remove_path;
use super::storage::ObjectStore;
use super::transfer::{self, CopyPlan};
use crate::models::objects::parent_prefix;
use crate::models::status::Severity;

/// Action held by the confirmation dialog until the user commits "Yes"
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Transfer(CopyPlan),
    DeleteLocal { path: PathBuf },
    /// An empty key or one ending in `/` removes everything under that prefix.
    DeleteRemote { bucket: String, key: String },
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::Transfer(CopyPlan::Upload {
                source,
                bucket,
                key,
            }) => format!(
                "Do you want to upload the path {} to {bucket}/{key}?",
                source.display()
            ),
            PendingAction::Transfer(CopyPlan::Download {
                bucket,
                key,
                destination,
            }) => format!(
                "Do you want to download the object {bucket}/{key} to {}?",
                destination.display()
            ),
            PendingAction::Transfer(CopyPlan::Unsupported(message)) => message.to_string(),
            PendingAction::DeleteLocal { path } => {
                format!("Do you want to delete the path {}?", path.display())
            }
            PendingAction::DeleteRemote { bucket, key } if key.is_empty() => {
                format!("Do you want to delete ALL objects in bucket {bucket}?")
            }
            PendingAction::DeleteRemote { bucket, key } if key.ends_with('/') => {
                format!("Do you want to delete all objects under {bucket}/{key}?")
            }
            PendingAction::DeleteRemote { bucket, key } => {
                format!("Do you want to delete the object {bucket}/{key}?")
            }
        }
    }

    pub fn dry_run_message(&self) -> String {
        match self {
            PendingAction::Transfer(CopyPlan::Upload {
                source,
                bucket,
                key,
            }) => format!("Would upload {} to {bucket}/{key}", source.display()),
            PendingAction::Transfer(CopyPlan::Download {
                bucket,
                key,
                destination,
            }) => format!("Would download {bucket}/{key} to {}", destination.display()),
            PendingAction::Transfer(CopyPlan::Unsupported(message)) => message.to_string(),
            PendingAction::DeleteLocal { path } => format!("Would delete {}", path.display()),
            PendingAction::DeleteRemote { bucket, key } => format!("Would delete {bucket}/{key}"),
        }
    }
}

/// Tree node to refresh once a job is done
#[derive(Debug, Clone, PartialEq)]
pub enum Reload {
    Local(PathBuf),
    Remote { bucket: String, prefix: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub severity: Severity,
    pub message: String,
    pub reload: Option<Reload>,
}

impl JobOutcome {
    fn success(message: String, reload: Reload) -> Self {
        Self {
            severity: Severity::Success,
            message,
            reload: Some(reload),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
            reload: None,
        }
    }
}

/// A confirmed action running on its own task
pub struct BackgroundJob {
    pub description: String,
    pub handle: JoinHandle<JobOutcome>,
}

pub fn spawn_job(store: Arc<dyn ObjectStore>, action: PendingAction) -> BackgroundJob {
    let description = action.dry_run_message();
    tracing::info!(action = ?action, "starting background job");

    let handle = tokio::spawn(async move { run_action(store.as_ref(), action).await });

    BackgroundJob {
        description,
        handle,
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// Performs the action and turns the result into a status message. Never fails.
pub async fn run_action(store: &dyn ObjectStore, action: PendingAction) -> JobOutcome {
    match action {
        PendingAction::Transfer(CopyPlan::Upload {
            source,
            bucket,
            key,
        }) => match transfer::upload(store, &source, &bucket, &key).await {
            Ok(keys) => JobOutcome::success(
                format!(
                    "Successfully uploaded path {} to {bucket}/{key} ({} file(s))",
                    source.display(),
                    keys.len()
                ),
                Reload::Remote {
                    prefix: parent_prefix(&key),
                    bucket,
                },
            ),
            // part of a directory may already be stored, so the prefix is reloaded anyway
            Err(e) => JobOutcome {
                reload: Some(Reload::Remote {
                    prefix: parent_prefix(&key),
                    bucket: bucket.clone(),
                }),
                ..JobOutcome::failure(format!(
                    "Failed to upload path {} to {bucket}/{key}: {e:#}",
                    source.display()
                ))
            },
        },
        PendingAction::Transfer(CopyPlan::Download {
            bucket,
            key,
            destination,
        }) => match transfer::download(store, &bucket, &key, &destination).await {
            Ok(()) => JobOutcome::success(
                format!(
                    "Successfully downloaded object {bucket}/{key} to {}",
                    destination.display()
                ),
                Reload::Local(parent_dir(&destination)),
            ),
            Err(e) => JobOutcome::failure(format!(
                "Failed to download object {bucket}/{key} to {}: {e:#}",
                destination.display()
            )),
        },
        PendingAction::Transfer(CopyPlan::Unsupported(message)) => JobOutcome {
            severity: Severity::Info,
            message: message.to_string(),
            reload: None,
        },
        PendingAction::DeleteLocal { path } => match remove_path(&path).await {
            Ok(()) => JobOutcome::success(
                format!("Successfully deleted path \"{}\"", path.display()),
                Reload::Local(parent_dir(&path)),
            ),
            Err(e) => JobOutcome::failure(format!("{e:#}")),
        },
        PendingAction::DeleteRemote { bucket, key } => {
            let result = if key.is_empty() || key.ends_with('/') {
                store.delete_prefix(&bucket, &key).await
            } else {
                store.delete_object(&bucket, &key).await.map(|()| 1)
            };
            match result {
                Ok(count) => JobOutcome::success(
                    format!("Successfully deleted {count} S3 object(s) \"{bucket}/{key}\""),
                    Reload::Remote {
                        prefix: parent_prefix(&key),
                        bucket,
                    },
                ),
                Err(e) => JobOutcome::failure(format!(
                    "Failed to delete S3 object(s) \"{bucket}/{key}\": {e:#}"
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::memory::{MemoryStore, StoreCall};
    use crate::operations::transfer::LOCAL_COPY_UNSUPPORTED;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn deleting_a_prefix_uses_bulk_delete() {
        let store = MemoryStore::new()
            .with_object("b", "docs/a.txt", b"a")
            .with_object("b", "docs/sub/b.txt", b"b")
            .with_object("b", "keep.txt", b"k");

        let outcome = run_action(
            &store,
            PendingAction::DeleteRemote {
                bucket: "b".to_string(),
                key: "docs/".to_string(),
            },
        )
        .await;

        assert_eq!(outcome.severity, Severity::Success);
        assert_eq!(
            store.io_calls(),
            vec![StoreCall::DeletePrefix {
                bucket: "b".to_string(),
                prefix: "docs/".to_string()
            }]
        );
        assert_eq!(store.keys("b"), vec!["keep.txt".to_string()]);
        assert_eq!(
            outcome.reload,
            Some(Reload::Remote {
                bucket: "b".to_string(),
                prefix: String::new()
            })
        );
    }

    #[tokio::test]
    async fn deleting_the_empty_key_empties_the_bucket() {
        let store = MemoryStore::new()
            .with_object("b", "docs/a.txt", b"a")
            .with_object("b", "top.txt", b"t");

        let outcome = run_action(
            &store,
            PendingAction::DeleteRemote {
                bucket: "b".to_string(),
                key: String::new(),
            },
        )
        .await;

        assert!(outcome.message.contains("2 S3 object(s)"));
        assert!(store.keys("b").is_empty());
    }

    #[tokio::test]
    async fn deleting_a_file_key_deletes_one_object() {
        let store = MemoryStore::new()
            .with_object("b", "a.txt", b"a")
            .with_object("b", "a.txt.bak", b"b");

        run_action(
            &store,
            PendingAction::DeleteRemote {
                bucket: "b".to_string(),
                key: "a.txt".to_string(),
            },
        )
        .await;

        assert_eq!(
            store.io_calls(),
            vec![StoreCall::DeleteObject {
                bucket: "b".to_string(),
                key: "a.txt".to_string()
            }]
        );
        assert_eq!(store.keys("b"), vec!["a.txt.bak".to_string()]);
    }

    #[tokio::test]
    async fn remote_errors_carry_the_service_message() {
        let store = MemoryStore::new().with_bucket("b").deny("b");

        let outcome = run_action(
            &store,
            PendingAction::DeleteRemote {
                bucket: "b".to_string(),
                key: "a.txt".to_string(),
            },
        )
        .await;

        assert_eq!(outcome.severity, Severity::Error);
        assert!(outcome.message.contains("Access Denied"));
        assert!(outcome.reload.is_none());
    }

    #[tokio::test]
    async fn local_delete_reports_os_errors() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let target = dir.path().join("nested");
        fs::create_dir_all(target.join("deep")).unwrap();
        fs::write(target.join("deep/f"), b"x").unwrap();

        let outcome = run_action(
            &store,
            PendingAction::DeleteLocal {
                path: target.clone(),
            },
        )
        .await;
        assert_eq!(outcome.severity, Severity::Success);
        assert!(!target.exists());
        assert_eq!(outcome.reload, Some(Reload::Local(dir.path().to_path_buf())));

        let outcome = run_action(&store, PendingAction::DeleteLocal { path: target }).await;
        assert_eq!(outcome.severity, Severity::Error);
        assert!(outcome.message.contains("Failed to delete path"));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn unsupported_plans_do_no_io() {
        let store = MemoryStore::new();
        let outcome = run_action(
            &store,
            PendingAction::Transfer(CopyPlan::Unsupported(LOCAL_COPY_UNSUPPORTED)),
        )
        .await;
        assert_eq!(outcome.severity, Severity::Info);
        assert_eq!(outcome.message, LOCAL_COPY_UNSUPPORTED);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn interrupted_directory_upload_reports_progress() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("up");
        fs::create_dir(&source).unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(source.join(name), name).unwrap();
        }
        let store = MemoryStore::new()
            .with_bucket("b")
            .deny_key("b", "docs/up/b.txt");

        let outcome = run_action(
            &store,
            PendingAction::Transfer(CopyPlan::Upload {
                source,
                bucket: "b".to_string(),
                key: "docs/up".to_string(),
            }),
        )
        .await;

        assert_eq!(outcome.severity, Severity::Error);
        assert!(outcome.message.starts_with("Failed to upload path"));
        assert!(outcome.message.contains("1 of 3 file(s) uploaded"));
        assert!(outcome.message.contains("Access Denied"));
        assert_eq!(store.keys("b"), vec!["docs/up/a.txt".to_string()]);
        assert_eq!(
            outcome.reload,
            Some(Reload::Remote {
                bucket: "b".to_string(),
                prefix: "docs/".to_string()
            })
        );
    }

    #[test]
    fn prompts_name_the_target() {
        let action = PendingAction::DeleteRemote {
            bucket: "b".to_string(),
            key: "docs/".to_string(),
        };
        assert_eq!(
            action.prompt(),
            "Do you want to delete all objects under b/docs/?"
        );

        let action = PendingAction::Transfer(CopyPlan::Upload {
            source: PathBuf::from("/tmp/a.txt"),
            bucket: "b".to_string(),
            key: "docs/a.txt".to_string(),
        });
        assert_eq!(
            action.prompt(),
            "Do you want to upload the path /tmp/a.txt to b/docs/a.txt?"
        );
    }
}
