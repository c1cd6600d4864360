use chrono::{DateTime, Utc};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    File,
    Folder,
}

/// Entry of the local filesystem tree
#[derive(Debug, Clone, PartialEq)]
pub struct FileObject {
    pub path: PathBuf,
    pub size: u64,
    pub object_type: ObjectType,
    pub loaded: bool,
}

impl FileObject {
    pub fn folder(path: PathBuf) -> Self {
        Self {
            path,
            size: 0,
            object_type: ObjectType::Folder,
            loaded: false,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.object_type == ObjectType::Folder
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Entry of the bucket tree. Folders are common prefixes and keep their trailing `/`.
#[derive(Debug, Clone, PartialEq)]
pub struct S3Object {
    pub key: String,
    pub size: i64,
    pub object_type: ObjectType,
    pub loaded: bool,
    pub last_modified: Option<DateTime<Utc>>,
}

impl S3Object {
    pub fn folder(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: 0,
            object_type: ObjectType::Folder,
            loaded: false,
            last_modified: None,
        }
    }

    pub fn file(key: impl Into<String>, size: i64, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            key: key.into(),
            size,
            object_type: ObjectType::File,
            loaded: false,
            last_modified,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.object_type == ObjectType::Folder
    }
}

/// Folders first, then files, both case-insensitive by name.
pub fn sort_listing<T>(items: &mut [T], is_dir: impl Fn(&T) -> bool, name: impl Fn(&T) -> String) {
    items.sort_by_cached_key(|item| (!is_dir(item), name(item).to_lowercase()));
}

/// Last path segment of a key, ignoring a trailing `/`.
pub fn key_basename(key: &str) -> &str {
    let trimmed = key.trim_end_matches('/');
    trimmed
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(trimmed)
}

/// Prefix that contains `key`: `docs/a.txt` and `docs/sub/` both live in `docs/`.
pub fn parent_prefix(key: &str) -> String {
    key.trim_end_matches('/')
        .rsplit_once('/')
        .map(|(parent, _)| format!("{parent}/"))
        .unwrap_or_default()
}

/// Joins a prefix and a name without producing a leading or doubled `/`.
pub fn join_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
