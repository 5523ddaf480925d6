//! BucketStore trait definition
//!
//! The remote queries bucket validation and region lookup need. Keeps the
//! core crate independent of the storage SDK.

use async_trait::async_trait;

use crate::error::Result;

/// Bucket-level queries against an object storage service
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Whether the bucket exists and is reachable with the current credentials
    ///
    /// A bucket owned by another account reads as `false`: the remote API
    /// does not distinguish it from a missing one.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Region the bucket lives in
    async fn bucket_region(&self, bucket: &str) -> Result<String>;
}
