use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::local::walk_files;
use super::storage::ObjectStore;
use crate::models::objects::{join_key, key_basename};

pub const LOCAL_COPY_UNSUPPORTED: &str = "Copying between local paths is not yet supported";
pub const REMOTE_COPY_UNSUPPORTED: &str = "Copying between buckets is not yet supported";

/// One side of a copy: a bucket key, or a local path when `bucket` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub bucket: Option<String>,
    pub path: String,
}

impl Location {
    pub fn local(path: &Path) -> Self {
        Self {
            bucket: None,
            path: path.display().to_string(),
        }
    }

    pub fn remote(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: Some(bucket.into()),
            path: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CopyPlan {
    Upload {
        source: PathBuf,
        bucket: String,
        key: String,
    },
    Download {
        bucket: String,
        key: String,
        destination: PathBuf,
    },
    Unsupported(&'static str),
}

/// Decides what copying `source` into the folder `destination` means.
pub fn plan_copy(source: &Location, destination: &Location) -> CopyPlan {
    match (&source.bucket, &destination.bucket) {
        (None, None) => CopyPlan::Unsupported(LOCAL_COPY_UNSUPPORTED),
        (None, Some(bucket)) => {
            let source = PathBuf::from(&source.path);
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            CopyPlan::Upload {
                key: join_key(&destination.path, &name),
                bucket: bucket.clone(),
                source,
            }
        }
        (Some(bucket), None) => CopyPlan::Download {
            bucket: bucket.clone(),
            destination: Path::new(&destination.path).join(key_basename(&source.path)),
            key: source.path.clone(),
        },
        (Some(_), Some(_)) => CopyPlan::Unsupported(REMOTE_COPY_UNSUPPORTED),
    }
}

/// Puts a file under `key`, or every file of a directory under `key/<relative path>`.
/// Returns the uploaded keys. A failed put stops the upload; the error says how many
/// files were already stored.
pub async fn upload(
    store: &dyn ObjectStore,
    source: &Path,
    bucket: &str,
    key: &str,
) -> Result<Vec<String>> {
    let metadata = tokio::fs::metadata(source)
        .await
        .with_context(|| format!("Failed to read {}", source.display()))?;

    if !metadata.is_dir() {
        store.put_object(bucket, key, source).await?;
        return Ok(vec![key.to_string()]);
    }

    let root = source.to_path_buf();
    let files = tokio::task::spawn_blocking(move || walk_files(&root)).await??;

    let total = files.len();
    let mut uploaded = Vec::with_capacity(total);
    for (path, relative) in files {
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let object_key = join_key(key, &relative);
        tracing::debug!(path = %path.display(), key = %object_key, "uploading");
        store
            .put_object(bucket, &object_key, &path)
            .await
            .with_context(|| {
                format!(
                    "{} of {total} file(s) uploaded before the failure",
                    uploaded.len()
                )
            })?;
        uploaded.push(object_key);
    }

    Ok(uploaded)
}

pub async fn download(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    destination: &Path,
) -> Result<()> {
    store.get_object(bucket, key, destination).await
}
