use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::models::objects::{sort_listing, ObjectType, S3Object};

pub const DELIMITER: &str = "/";

#[derive(Debug, Clone, PartialEq)]
pub struct ListedObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// All pages of one `list_objects` call, concatenated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub common_prefixes: Vec<String>,
    pub objects: Vec<ListedObject>,
}

/// The storage calls the browser needs. `S3Manager` talks to a real service.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// Follows continuation tokens until the listing is complete.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> Result<Listing>;

    async fn get_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<()>;

    async fn put_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<()>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Deletes every object whose key starts with `prefix`. Returns how many were removed.
    async fn delete_prefix(&self, bucket: &str, prefix: &str) -> Result<usize>;
}

/// Turns a delimited listing under `prefix` into tree entries.
///
/// Keys ending in `/` are folders. The placeholder object for `prefix` itself is
/// dropped and folders reported both ways show up once.
pub fn classify_listing(prefix: &str, listing: Listing) -> Vec<S3Object> {
    let mut entries: Vec<S3Object> = listing
        .common_prefixes
        .into_iter()
        .filter(|p| p.as_str() != prefix)
        .map(S3Object::folder)
        .collect();

    for obj in listing.objects {
        if obj.key == prefix {
            continue;
        }
        if obj.key.ends_with('/') {
            if !entries.iter().any(|e| e.key == obj.key) {
                entries.push(S3Object::folder(obj.key));
            }
        } else {
            entries.push(S3Object::file(obj.key, obj.size, obj.last_modified));
        }
    }

    sort_listing(
        &mut entries,
        |e| e.object_type == ObjectType::Folder,
        |e| e.key.clone(),
    );
    entries
}

/// Tree label of `key` below `prefix`.
pub fn relative_label(prefix: &str, key: &str) -> String {
    key.strip_prefix(prefix).unwrap_or(key).to_string()
}
