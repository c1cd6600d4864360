use std::path::Path;

use super::{App, BucketSelectState, Focus, Screen};
use crate::models::objects::{parent_prefix, FileObject, S3Object};
use crate::models::tree::{parent_path, TreeModel, TreeNode};
use crate::operations::local::read_local_directory;
use crate::operations::storage::{classify_listing, relative_label, DELIMITER};

fn local_node(obj: FileObject) -> TreeNode<FileObject> {
    let label = obj.name();
    if obj.is_dir() {
        TreeNode::branch(label, obj)
    } else {
        TreeNode::leaf(label, obj)
    }
}

fn remote_node(prefix: &str, obj: S3Object) -> TreeNode<S3Object> {
    let label = relative_label(prefix, &obj.key);
    if obj.is_dir() {
        TreeNode::branch(label, obj)
    } else {
        TreeNode::leaf(label, obj)
    }
}

/// Replaces the children of a local folder node with a fresh directory listing.
/// A failed listing leaves the node empty and logs the error.
pub fn load_local_node(app: &mut App, path: &[usize]) {
    let Some(node) = app.local_tree.node(path) else {
        return;
    };
    let dir = node.data.path.clone();

    let children = match read_local_directory(&dir) {
        Ok(entries) => entries.into_iter().map(local_node).collect(),
        Err(e) => {
            app.status.error(format!("{e:#}"));
            Vec::new()
        }
    };

    app.local_tree
        .replace_children(path, children, |obj| obj.path.clone());
    if let Some(data) = app.local_tree.data_mut(path) {
        data.loaded = true;
    }
}

/// Remote counterpart of [`load_local_node`], listing one prefix level.
pub async fn load_remote_node(app: &mut App, path: &[usize]) {
    let (Some(bucket), Some(tree)) = (app.bucket.clone(), app.remote_tree.as_ref()) else {
        return;
    };
    let Some(node) = tree.node(path) else {
        return;
    };
    let prefix = node.data.key.clone();

    let children = match app.store.list_objects(&bucket, &prefix, Some(DELIMITER)).await {
        Ok(listing) => classify_listing(&prefix, listing)
            .into_iter()
            .map(|obj| remote_node(&prefix, obj))
            .collect(),
        Err(e) => {
            app.status.error(format!("{e:#}"));
            Vec::new()
        }
    };

    if let Some(tree) = app.remote_tree.as_mut() {
        tree.replace_children(path, children, |obj| obj.key.clone());
        if let Some(data) = tree.data_mut(path) {
            data.loaded = true;
        }
    }
}

/// Enter/Space on the focused pane: lists a folder the first time, then toggles it.
pub async fn toggle_selected(app: &mut App) {
    match app.focus {
        Focus::Local => {
            let path = app.local_tree.cursor_path();
            let node = app.local_tree.cursor_node();
            if !node.allow_expand {
                return;
            }
            if !node.data.loaded {
                load_local_node(app, &path);
                app.local_tree.set_expanded(&path, true);
            } else {
                app.local_tree.toggle(&path);
            }
        }
        Focus::Remote => {
            let Some(tree) = app.remote_tree.as_ref() else {
                return;
            };
            let path = tree.cursor_path();
            let node = tree.cursor_node();
            if !node.allow_expand {
                return;
            }
            if !node.data.loaded {
                load_remote_node(app, &path).await;
                set_remote_expanded(app, &path, true);
            } else if let Some(tree) = app.remote_tree.as_mut() {
                tree.toggle(&path);
            }
        }
    }
}

fn set_remote_expanded(app: &mut App, path: &[usize], expanded: bool) {
    if let Some(tree) = app.remote_tree.as_mut() {
        tree.set_expanded(path, expanded);
    }
}

pub async fn expand_selected(app: &mut App) {
    let expanded = match app.focus {
        Focus::Local => app.local_tree.cursor_node().expanded,
        Focus::Remote => match app.remote_tree.as_ref() {
            Some(tree) => tree.cursor_node().expanded,
            None => return,
        },
    };
    if !expanded {
        toggle_selected(app).await;
    }
}

/// Collapses an expanded folder, otherwise moves the cursor to the parent node.
pub fn collapse_selected(app: &mut App) {
    match app.focus {
        Focus::Local => collapse_or_ascend(&mut app.local_tree),
        Focus::Remote => {
            if let Some(tree) = app.remote_tree.as_mut() {
                collapse_or_ascend(tree);
            }
        }
    }
}

fn collapse_or_ascend<T>(tree: &mut TreeModel<T>) {
    let path = tree.cursor_path();
    if tree.cursor_node().expanded && !path.is_empty() {
        tree.set_expanded(&path, false);
    } else if !path.is_empty() {
        tree.select_path(&parent_path(&path));
    }
}

/// Re-lists the folder holding the cursor in the focused pane.
pub async fn reload_selected(app: &mut App) {
    match app.focus {
        Focus::Local => {
            let dir = app.selected_local_folder();
            reload_local(app, &dir);
            app.status
                .info(format!("Reloaded files in {}", dir.display()));
        }
        Focus::Remote => {
            if let (Some(bucket), Some(prefix)) = (app.bucket.clone(), app.selected_remote_prefix())
            {
                reload_remote(app, &prefix).await;
                app.status
                    .info(format!("Reloaded objects in {bucket}/{prefix}"));
            }
        }
    }
}

/// Re-lists the local folder node for `dir`, if it is part of the tree.
pub fn reload_local(app: &mut App, dir: &Path) {
    let Some(path) = app.local_tree.find(|obj| obj.is_dir() && obj.path == dir) else {
        tracing::debug!(dir = %dir.display(), "reload skipped, folder not in tree");
        return;
    };
    load_local_node(app, &path);
    app.local_tree.set_expanded(&path, true);
}

/// Re-lists the remote folder node for `prefix`. A non-root prefix that comes back
/// empty no longer exists, so its parent is reloaded instead.
pub async fn reload_remote(app: &mut App, prefix: &str) {
    let mut prefix = prefix.to_string();

    loop {
        let Some(path) = app
            .remote_tree
            .as_ref()
            .and_then(|tree| tree.find(|obj| obj.is_dir() && obj.key == prefix))
        else {
            tracing::debug!(prefix = %prefix, "reload skipped, prefix not in tree");
            return;
        };

        load_remote_node(app, &path).await;

        let is_empty = app
            .remote_tree
            .as_ref()
            .and_then(|tree| tree.node(&path))
            .map(|node| node.children.is_empty())
            .unwrap_or(true);

        if is_empty && !path.is_empty() {
            prefix = parent_prefix(&prefix);
            continue;
        }

        set_remote_expanded(app, &path, true);
        return;
    }
}

/// Replaces the remote pane with a fresh tree rooted at `bucket` and lists its root.
pub async fn open_bucket(app: &mut App, bucket: String) {
    tracing::info!(bucket = %bucket, "opening bucket");

    app.remote_tree = Some(TreeModel::new(TreeNode::branch(
        bucket.clone(),
        S3Object::folder(""),
    )));
    app.bucket = Some(bucket.clone());
    app.focus = Focus::Remote;
    app.status
        .success(format!("You are now connected to bucket {bucket}"));

    load_remote_node(app, &[]).await;
}

pub async fn show_bucket_select(app: &mut App) {
    match app.store.list_buckets().await {
        Ok(buckets) => {
            app.bucket_select = BucketSelectState::new(buckets, app.bucket.as_deref());
            app.show_screen(Screen::BucketSelect);
        }
        Err(e) => app.status.error(format!("{e:#}")),
    }
}

pub async fn commit_bucket_select(app: &mut App) {
    let selected = app.bucket_select.selected_bucket().map(str::to_string);
    app.go_back();
    if let Some(bucket) = selected {
        open_bucket(app, bucket).await;
    }
}
