//! Name-based command dispatch
//!
//! Runs an operation requested by name, legacy aliases included. Only a
//! small set of bucket and object metadata operations is dispatched; the
//! rest resolve but report as unsupported.

use aws_smithy_types::date_time::Format;
use serde_json::{json, Value};

use bw_core::{BucketStore as _, Error, Operation, Result};

use crate::client::{sdk_error, S3Client};

/// Arguments for a named command
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
    /// Target bucket
    pub bucket: Option<String>,

    /// Target object key
    pub key: Option<String>,

    /// Copy source as `bucket/key`
    pub source: Option<String>,

    /// Key prefix for listings
    pub prefix: Option<String>,

    /// Maximum keys for listings
    pub max_keys: Option<i32>,
}

impl CommandInput {
    pub fn bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: Some(bucket.into()),
            ..Default::default()
        }
    }

    pub fn object(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: Some(bucket.into()),
            key: Some(key.into()),
            ..Default::default()
        }
    }

    fn require_bucket(&self, op: Operation) -> Result<&str> {
        self.bucket
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::Config(format!("{op} requires a bucket")))
    }

    fn require_key(&self, op: Operation) -> Result<&str> {
        self.key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config(format!("{op} requires a key")))
    }

    fn require_source(&self, op: Operation) -> Result<&str> {
        self.source
            .as_deref()
            .filter(|s| s.contains('/'))
            .ok_or_else(|| Error::Config(format!("{op} requires a source as bucket/key")))
    }
}

/// Whether `execute` runs this operation
pub fn is_dispatched(op: Operation) -> bool {
    matches!(
        op,
        Operation::ListBuckets
            | Operation::ListObjects
            | Operation::ListObjectsV2
            | Operation::HeadBucket
            | Operation::HeadObject
            | Operation::GetBucketLocation
            | Operation::GetBucketVersioning
            | Operation::CreateBucket
            | Operation::DeleteBucket
            | Operation::DeleteObject
            | Operation::CopyObject
    )
}

impl S3Client {
    /// Resolve `name` and run the operation it stands for
    ///
    /// The returned document names the requested and canonical operations
    /// alongside a summary of the SDK response.
    pub async fn execute(&self, name: &str, input: &CommandInput) -> Result<Value> {
        let resolution = self.resolver().resolve_detailed(name)?;
        let op = resolution.operation;

        if !is_dispatched(op) {
            return Err(Error::UnsupportedFeature(format!(
                "{op} is not dispatched by name; use the SDK client directly"
            )));
        }

        tracing::debug!(requested = name, operation = %op, "Dispatching command");
        let result = self.run(op, input).await?;

        Ok(json!({
            "requested": name,
            "operation": op,
            "aliased": resolution.aliased,
            "result": result,
        }))
    }

    async fn run(&self, op: Operation, input: &CommandInput) -> Result<Value> {
        let client = self.inner();

        match op {
            Operation::ListBuckets => {
                let response = client.list_buckets().send().await.map_err(sdk_error)?;
                let buckets: Vec<&str> = response.buckets().iter().filter_map(|b| b.name()).collect();
                Ok(json!({ "buckets": buckets }))
            }
            Operation::ListObjects => {
                let bucket = input.require_bucket(op)?;
                let response = client
                    .list_objects()
                    .bucket(bucket)
                    .set_prefix(input.prefix.clone())
                    .set_max_keys(input.max_keys)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                let keys: Vec<&str> = response.contents().iter().filter_map(|o| o.key()).collect();
                Ok(json!({
                    "keys": keys,
                    "truncated": response.is_truncated().unwrap_or(false),
                }))
            }
            Operation::ListObjectsV2 => {
                let bucket = input.require_bucket(op)?;
                let response = client
                    .list_objects_v2()
                    .bucket(bucket)
                    .set_prefix(input.prefix.clone())
                    .set_max_keys(input.max_keys)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                let keys: Vec<&str> = response.contents().iter().filter_map(|o| o.key()).collect();
                Ok(json!({
                    "keys": keys,
                    "truncated": response.is_truncated().unwrap_or(false),
                    "continuation_token": response.next_continuation_token(),
                }))
            }
            Operation::HeadBucket => {
                let bucket = input.require_bucket(op)?;
                let exists = self.bucket_exists(bucket).await?;
                Ok(json!({ "bucket": bucket, "exists": exists }))
            }
            Operation::HeadObject => {
                let bucket = input.require_bucket(op)?;
                let key = input.require_key(op)?;
                let response = client
                    .head_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                Ok(json!({
                    "key": key,
                    "size": response.content_length(),
                    "etag": response.e_tag().map(|e| e.trim_matches('"')),
                    "content_type": response.content_type(),
                    "last_modified": response
                        .last_modified()
                        .and_then(|t| t.fmt(Format::DateTime).ok()),
                }))
            }
            Operation::GetBucketLocation => {
                let bucket = input.require_bucket(op)?;
                let region = self.bucket_region(bucket).await?;
                Ok(json!({ "bucket": bucket, "region": region }))
            }
            Operation::GetBucketVersioning => {
                let bucket = input.require_bucket(op)?;
                let response = client
                    .get_bucket_versioning()
                    .bucket(bucket)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                Ok(json!({
                    "bucket": bucket,
                    "status": response.status().map(|s| s.as_str()),
                }))
            }
            Operation::CreateBucket => {
                let bucket = input.require_bucket(op)?;
                client
                    .create_bucket()
                    .bucket(bucket)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                Ok(json!({ "bucket": bucket, "created": true }))
            }
            Operation::DeleteBucket => {
                let bucket = input.require_bucket(op)?;
                client
                    .delete_bucket()
                    .bucket(bucket)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                Ok(json!({ "bucket": bucket, "deleted": true }))
            }
            Operation::DeleteObject => {
                let bucket = input.require_bucket(op)?;
                let key = input.require_key(op)?;
                client
                    .delete_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                Ok(json!({ "bucket": bucket, "key": key, "deleted": true }))
            }
            Operation::CopyObject => {
                let bucket = input.require_bucket(op)?;
                let key = input.require_key(op)?;
                let source = input.require_source(op)?;
                let response = client
                    .copy_object()
                    .copy_source(source)
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                let etag = response
                    .copy_object_result()
                    .and_then(|r| r.e_tag())
                    .map(|e| e.trim_matches('"'));
                Ok(json!({ "bucket": bucket, "key": key, "source": source, "etag": etag }))
            }
            _ => Err(Error::UnsupportedFeature(op.to_string())),
        }
    }
}
