use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;
use chrono::DateTime;
use std::path::Path;

use super::local::replace_file;
use super::storage::{ListedObject, Listing, ObjectStore};
use crate::models::config::Settings;

const DEFAULT_REGION: &str = "us-east-1";
// DeleteObjects accepts at most 1000 keys per request
const DELETE_BATCH_SIZE: usize = 1000;

#[derive(Clone)]
pub struct S3Manager {
    client: Client,
}

fn sdk_error<E: std::error::Error>(action: String, err: E) -> anyhow::Error {
    anyhow!("{action}: {}", DisplayErrorContext(err))
}

impl S3Manager {
    pub async fn new(settings: &Settings) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(creds) = &settings.credentials {
            use aws_credential_types::Credentials;

            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                None,
                None,
                "bucketman-cli",
            ));
        }

        let config = loader.load().await;

        // Build S3 client with optional custom endpoint and path style
        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&config);

        if config.region().is_none() {
            s3_config_builder =
                s3_config_builder.region(aws_sdk_s3::config::Region::new(DEFAULT_REGION));
        }
        if let Some(endpoint) = &settings.endpoint_url {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }
        if settings.path_style {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        let client = Client::from_conf(s3_config_builder.build());
        tracing::debug!(
            endpoint = ?settings.endpoint_url,
            region = ?settings.region,
            "S3 client created"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl ObjectStore for S3Manager {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| sdk_error("Failed to list buckets".to_string(), e))?;

        let mut names: Vec<String> = resp
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> Result<Listing> {
        let mut listing = Listing::default();
        let mut continuation_token: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_delimiter(delimiter.map(str::to_string))
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| {
                    sdk_error(format!("Failed to list objects in {bucket}/{prefix}"), e)
                })?;

            listing.common_prefixes.extend(
                resp.common_prefixes()
                    .iter()
                    .filter_map(|cp| cp.prefix().map(str::to_string)),
            );

            for obj in resp.contents() {
                if let Some(key) = obj.key() {
                    listing.objects.push(ListedObject {
                        key: key.to_string(),
                        size: obj.size().unwrap_or(0),
                        last_modified: obj
                            .last_modified()
                            .and_then(|t| DateTime::from_timestamp(t.secs(), 0)),
                    });
                }
            }

            match resp.next_continuation_token() {
                Some(token) if resp.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::debug!(
            bucket,
            prefix,
            prefixes = listing.common_prefixes.len(),
            objects = listing.objects.len(),
            "listed objects"
        );
        Ok(listing)
    }

    async fn get_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<()> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_error(format!("Failed to get object {bucket}/{key}"), e))?;

        let body = resp.body.into_async_read();
        tokio::pin!(body);
        replace_file(local_path, &mut body)
            .await
            .with_context(|| format!("Failed to download {bucket}/{key}"))
    }

    async fn put_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<()> {
        let body = ByteStream::from_path(local_path)
            .await
            .with_context(|| format!("Failed to read local file {}", local_path.display()))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| sdk_error(format!("Failed to upload object {bucket}/{key}"), e))?;

        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_error(format!("Failed to delete object {bucket}/{key}"), e))?;

        Ok(())
    }

    async fn delete_prefix(&self, bucket: &str, prefix: &str) -> Result<usize> {
        let listing = self.list_objects(bucket, prefix, None).await?;
        let keys: Vec<String> = listing.objects.into_iter().map(|o| o.key).collect();

        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            let identifiers = batch
                .iter()
                .map(|key| ObjectIdentifier::builder().key(key).build())
                .collect::<Result<Vec<_>, _>>()?;
            let delete = Delete::builder()
                .set_objects(Some(identifiers))
                .quiet(true)
                .build()?;

            let resp = self
                .client
                .delete_objects()
                .bucket(bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| {
                    sdk_error(format!("Failed to delete objects in {bucket}/{prefix}"), e)
                })?;

            if let Some(err) = resp.errors().first() {
                return Err(anyhow!(
                    "Failed to delete {}: {}",
                    err.key().unwrap_or_default(),
                    err.message().unwrap_or("unknown error")
                ));
            }
        }

        tracing::info!(bucket, prefix, count = keys.len(), "deleted objects by prefix");
        Ok(keys.len())
    }
}
