use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::models::objects::{sort_listing, FileObject, ObjectType};

/// Immediate children of `path`, folders first.
pub fn read_local_directory(path: &Path) -> Result<Vec<FileObject>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(path)
        .with_context(|| format!("Failed to read directory {}", path.display()))?
    {
        let entry = entry?;
        // follow symlinks, dangling ones are listed as plain files
        let metadata = match fs::metadata(entry.path()).or_else(|_| entry.metadata()) {
            Ok(m) => m,
            // vanished between read_dir and stat
            Err(_) => continue,
        };

        entries.push(FileObject {
            path: entry.path(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            object_type: if metadata.is_dir() {
                ObjectType::Folder
            } else {
                ObjectType::File
            },
            loaded: false,
        });
    }

    sort_listing(&mut entries, FileObject::is_dir, FileObject::name);
    Ok(entries)
}

/// Every file below `root` with its path relative to `root`. Symlinks are followed;
/// a directory reached twice through links is walked once, and a dangling link is an error.
pub fn walk_files(root: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();
    let mut visited = HashSet::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let canonical = dir
            .canonicalize()
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;
        if !visited.insert(canonical) {
            tracing::debug!(dir = %dir.display(), "skipping directory already walked");
            continue;
        }

        for entry in fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
        {
            let path = entry?.path();
            let metadata =
                fs::metadata(&path).with_context(|| format!("Failed to read {}", path.display()))?;

            if metadata.is_dir() {
                pending.push(path);
            } else if metadata.is_file() {
                let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                files.push((path, relative));
            }
        }
    }

    files.sort();
    Ok(files)
}

fn part_path(path: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}-{unique}.part", std::process::id()))
}

/// Streams `reader` into a sibling `.part` file and renames it over `path` once
/// complete. On failure `path` is left untouched and the partial file is removed.
pub async fn replace_file<R: AsyncRead + Unpin>(path: &Path, reader: &mut R) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let part = part_path(path);
    let result = async {
        let mut file = tokio::fs::File::create(&part)
            .await
            .with_context(|| format!("Failed to create {}", part.display()))?;
        tokio::io::copy(reader, &mut file)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        file.flush().await?;
        drop(file);
        tokio::fs::rename(&part, path)
            .await
            .with_context(|| format!("Failed to move download into {}", path.display()))
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&part).await;
    }
    result
}

/// Removes a file, or a directory with everything below it.
pub async fn remove_path(path: &Path) -> Result<()> {
    let metadata = tokio::fs::symlink_metadata(path)
        .await
        .with_context(|| format!("Failed to delete path \"{}\"", path.display()))?;

    let result = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    result.with_context(|| format!("Failed to delete path \"{}\"", path.display()))
}
