//! In-memory `ObjectStore` used by the tests. Every call is recorded.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Mutex;

use super::local::replace_file;
use super::storage::{ListedObject, Listing, ObjectStore};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    ListBuckets,
    ListObjects { bucket: String, prefix: String },
    Get { bucket: String, key: String },
    Put { bucket: String, key: String },
    DeleteObject { bucket: String, key: String },
    DeletePrefix { bucket: String, prefix: String },
}

#[derive(Default)]
pub struct MemoryStore {
    buckets: Mutex<BTreeMap<String, BTreeMap<String, Vec<u8>>>>,
    calls: Mutex<Vec<StoreCall>>,
    denied_buckets: BTreeSet<String>,
    denied_keys: BTreeSet<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, bucket: &str) -> Self {
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default();
        self
    }

    pub fn with_object(self, bucket: &str, key: &str, body: &[u8]) -> Self {
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body.to_vec());
        self
    }

    /// Every call against this bucket fails with AccessDenied.
    pub fn deny(mut self, bucket: &str) -> Self {
        self.denied_buckets.insert(bucket.to_string());
        self
    }

    /// Only calls against this one key fail with AccessDenied.
    pub fn deny_key(mut self, bucket: &str, key: &str) -> Self {
        self.denied_keys
            .insert((bucket.to_string(), key.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than listings, i.e. the ones that move or remove data.
    pub fn io_calls(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, StoreCall::ListBuckets | StoreCall::ListObjects { .. }))
            .collect()
    }

    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.buckets
            .lock()
            .unwrap()
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.buckets
            .lock()
            .unwrap()
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_access(&self, bucket: &str) -> Result<()> {
        if self.denied_buckets.contains(bucket) {
            return Err(anyhow!("AccessDenied: Access Denied ({bucket})"));
        }
        if !self.buckets.lock().unwrap().contains_key(bucket) {
            return Err(anyhow!("NoSuchBucket: The specified bucket does not exist"));
        }
        Ok(())
    }

    fn check_key_access(&self, bucket: &str, key: &str) -> Result<()> {
        self.check_access(bucket)?;
        if self
            .denied_keys
            .contains(&(bucket.to_string(), key.to_string()))
        {
            return Err(anyhow!("AccessDenied: Access Denied ({bucket}/{key})"));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        self.record(StoreCall::ListBuckets);
        Ok(self.buckets.lock().unwrap().keys().cloned().collect())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> Result<Listing> {
        self.record(StoreCall::ListObjects {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        });
        self.check_access(bucket)?;

        let buckets = self.buckets.lock().unwrap();
        let mut listing = Listing::default();
        let mut seen_prefixes = BTreeSet::new();

        for (key, body) in buckets.get(bucket).into_iter().flatten() {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            match delimiter.and_then(|d| rest.find(d).map(|i| i + d.len())) {
                Some(end) => {
                    seen_prefixes.insert(format!("{prefix}{}", &rest[..end]));
                }
                None => listing.objects.push(ListedObject {
                    key: key.clone(),
                    size: body.len() as i64,
                    last_modified: None,
                }),
            }
        }

        listing.common_prefixes = seen_prefixes.into_iter().collect();
        Ok(listing)
    }

    async fn get_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<()> {
        self.record(StoreCall::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.check_key_access(bucket, key)?;

        let body = self
            .object(bucket, key)
            .ok_or_else(|| anyhow!("NoSuchKey: The specified key does not exist"))?;
        replace_file(local_path, &mut body.as_slice()).await
    }

    async fn put_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<()> {
        self.record(StoreCall::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.check_key_access(bucket, key)?;

        let body = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("Failed to read local file {}", local_path.display()))?;
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.record(StoreCall::DeleteObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.check_key_access(bucket, key)?;

        if let Some(objects) = self.buckets.lock().unwrap().get_mut(bucket) {
            objects.remove(key);
        }
        Ok(())
    }

    async fn delete_prefix(&self, bucket: &str, prefix: &str) -> Result<usize> {
        self.record(StoreCall::DeletePrefix {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        });
        self.check_access(bucket)?;

        let mut buckets = self.buckets.lock().unwrap();
        let objects = buckets.entry(bucket.to_string()).or_default();
        let before = objects.len();
        objects.retain(|key, _| !key.starts_with(prefix));
        Ok(before - objects.len())
    }
}
