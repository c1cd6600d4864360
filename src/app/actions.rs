use super::navigation::{reload_local, reload_remote};
use super::{App, ConfirmState, Focus, Screen};
use crate::operations::jobs::{spawn_job, JobOutcome, PendingAction, Reload};
use crate::operations::transfer::{plan_copy, CopyPlan, Location};

pub const NO_BUCKET: &str = "No bucket selected, press b to choose one";
pub const FOLDER_DOWNLOAD_UNSUPPORTED: &str = "Downloading folders is not yet supported";
pub const LOCAL_ROOT_UNDELETABLE: &str = "The local root folder cannot be deleted";

fn selected_remote_key(app: &App) -> Option<(String, bool)> {
    app.selected_remote_object()
        .map(|obj| (obj.key.clone(), obj.is_dir()))
}

/// Copies the selected local path into the selected remote prefix.
pub fn upload(app: &mut App) {
    let (Some(bucket), Some(prefix)) = (app.bucket.clone(), app.selected_remote_prefix()) else {
        app.status.info(NO_BUCKET);
        return;
    };
    let source = app.selected_local_object().path.clone();

    let plan = plan_copy(&Location::local(&source), &Location::remote(bucket, prefix));
    request_confirmation(app, PendingAction::Transfer(plan));
}

/// Copies the selected object into the selected local folder.
pub fn download(app: &mut App) {
    let (Some(bucket), Some((key, is_dir))) = (app.bucket.clone(), selected_remote_key(app)) else {
        app.status.info(NO_BUCKET);
        return;
    };
    if is_dir {
        app.status.info(FOLDER_DOWNLOAD_UNSUPPORTED);
        return;
    }
    let destination = app.selected_local_folder();

    let plan = plan_copy(&Location::remote(bucket, key), &Location::local(&destination));
    request_confirmation(app, PendingAction::Transfer(plan));
}

/// Deletes the node under the cursor of the focused pane.
pub fn delete(app: &mut App) {
    let action = match app.focus {
        Focus::Local => {
            if app.local_tree.cursor_path().is_empty() {
                app.status.info(LOCAL_ROOT_UNDELETABLE);
                return;
            }
            PendingAction::DeleteLocal {
                path: app.selected_local_object().path.clone(),
            }
        }
        Focus::Remote => {
            let (Some(bucket), Some((key, _))) = (app.bucket.clone(), selected_remote_key(app))
            else {
                app.status.info(NO_BUCKET);
                return;
            };
            PendingAction::DeleteRemote { bucket, key }
        }
    };
    request_confirmation(app, action);
}

/// Opens the confirmation dialog. Unsupported copies are reported right away.
pub fn request_confirmation(app: &mut App, action: PendingAction) {
    if let PendingAction::Transfer(CopyPlan::Unsupported(message)) = action {
        app.status.info(message);
        return;
    }

    tracing::debug!(action = ?action, "awaiting confirmation");
    app.confirm = ConfirmState::new(action);
    app.show_screen(Screen::Confirm);
}

/// Closes the dialog and runs the pending action when "Yes" is selected.
pub fn commit_confirm(app: &mut App) {
    let pending = app.confirm.pending.take();
    let yes = app.confirm.yes_selected;
    app.confirm = ConfirmState::default();
    app.go_back();

    match pending {
        Some(action) if yes => {
            if app.dry_run {
                app.status.info(action.dry_run_message());
            } else {
                let job = spawn_job(app.store.clone(), action);
                app.status.info(format!("Started: {}", job.description));
                app.jobs.push(job);
            }
        }
        _ => cancel_confirm_state(app),
    }
}

pub fn cancel_confirm(app: &mut App) {
    app.confirm = ConfirmState::default();
    app.go_back();
    cancel_confirm_state(app);
}

fn cancel_confirm_state(app: &mut App) {
    app.status.info("Cancelled");
}

/// Logs a finished job and refreshes the node it touched.
pub async fn finish_job(app: &mut App, outcome: JobOutcome) {
    app.status.push(outcome.severity, outcome.message);

    match outcome.reload {
        Some(Reload::Local(dir)) => reload_local(app, &dir),
        Some(Reload::Remote { bucket, prefix }) if app.bucket.as_ref() == Some(&bucket) => {
            reload_remote(app, &prefix).await;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::navigation::open_bucket;
    use crate::app::tests::test_app;
    use crate::models::status::Severity;
    use crate::operations::memory::MemoryStore;
    use std::sync::Arc;

    async fn connected(store: Arc<MemoryStore>) -> (tempfile::TempDir, App) {
        let (dir, mut app) = test_app(store);
        open_bucket(&mut app, "b".to_string()).await;
        (dir, app)
    }

    fn select_local(app: &mut App, name: &str) {
        let path = app.local_tree.find(|obj| obj.name() == name).unwrap();
        app.local_tree.select_path(&path);
    }

    fn select_remote(app: &mut App, key: &str) {
        let tree = app.remote_tree.as_mut().unwrap();
        let path = tree.find(|obj| obj.key == key).unwrap();
        tree.select_path(&path);
    }

    #[tokio::test]
    async fn upload_asks_before_any_io() {
        let store = Arc::new(MemoryStore::new().with_object("b", "docs/readme.md", b"r"));
        let (dir, mut app) = connected(store.clone()).await;
        select_local(&mut app, "a.txt");
        select_remote(&mut app, "docs/");

        upload(&mut app);

        assert_eq!(app.screen, Screen::Confirm);
        assert!(!app.confirm.yes_selected);
        assert_eq!(
            app.confirm.prompt,
            format!(
                "Do you want to upload the path {} to b/docs/a.txt?",
                dir.path().join("a.txt").display()
            )
        );
        assert!(store.io_calls().is_empty());
    }

    #[tokio::test]
    async fn committing_no_does_nothing() {
        let store = Arc::new(MemoryStore::new().with_object("b", "docs/readme.md", b"r"));
        let (_dir, mut app) = connected(store.clone()).await;
        select_remote(&mut app, "docs/");

        delete(&mut app);
        assert_eq!(app.screen, Screen::Confirm);
        commit_confirm(&mut app);

        assert_eq!(app.screen, Screen::Browser);
        assert!(app.jobs.is_empty());
        assert_eq!(app.status.last().unwrap().message, "Cancelled");
        assert!(store.io_calls().is_empty());

        delete(&mut app);
        cancel_confirm(&mut app);
        assert!(app.confirm.pending.is_none());
        assert!(store.io_calls().is_empty());
    }

    #[tokio::test]
    async fn dry_run_only_logs() {
        let store = Arc::new(MemoryStore::new().with_object("b", "docs/readme.md", b"r"));
        let (_dir, mut app) = connected(store.clone()).await;
        app.dry_run = true;
        select_remote(&mut app, "docs/");

        delete(&mut app);
        app.confirm.yes_selected = true;
        commit_confirm(&mut app);

        assert!(app.jobs.is_empty());
        assert_eq!(app.status.last().unwrap().message, "Would delete b/docs/");
        assert!(store.io_calls().is_empty());
    }

    #[tokio::test]
    async fn folder_download_is_informational() {
        let store = Arc::new(MemoryStore::new().with_object("b", "docs/readme.md", b"r"));
        let (_dir, mut app) = connected(store.clone()).await;
        select_remote(&mut app, "docs/");

        download(&mut app);

        assert_eq!(app.screen, Screen::Browser);
        let last = app.status.last().unwrap();
        assert_eq!(last.severity, Severity::Info);
        assert_eq!(last.message, FOLDER_DOWNLOAD_UNSUPPORTED);
        assert!(store.io_calls().is_empty());
    }

    #[tokio::test]
    async fn local_root_cannot_be_deleted() {
        let (_dir, mut app) = test_app(Arc::new(MemoryStore::new()));
        app.focus = Focus::Local;

        delete(&mut app);

        assert_eq!(app.screen, Screen::Browser);
        assert_eq!(app.status.last().unwrap().message, LOCAL_ROOT_UNDELETABLE);
    }

    #[tokio::test]
    async fn bucket_root_delete_targets_the_empty_key() {
        let store = Arc::new(MemoryStore::new().with_object("b", "a.txt", b"a"));
        let (_dir, mut app) = connected(store).await;
        app.remote_tree.as_mut().unwrap().home();

        delete(&mut app);

        assert_eq!(
            app.confirm.pending,
            Some(PendingAction::DeleteRemote {
                bucket: "b".to_string(),
                key: String::new()
            })
        );
        assert_eq!(
            app.confirm.prompt,
            "Do you want to delete ALL objects in bucket b?"
        );
    }

    #[tokio::test]
    async fn transfers_need_a_bucket() {
        let (_dir, mut app) = test_app(Arc::new(MemoryStore::new()));

        upload(&mut app);
        download(&mut app);

        assert_eq!(app.screen, Screen::Browser);
        assert_eq!(app.status.entries().len(), 2);
        assert!(app.status.entries().iter().all(|e| e.message == NO_BUCKET));
    }
}
