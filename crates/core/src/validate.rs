//! Bucket validation
//!
//! Confirms a bucket is reachable before a host application starts using
//! it, consulting the existence cache first.

use crate::cache::ExistenceCache;
use crate::error::{Error, Result};
use crate::traits::BucketStore;

/// Check that `bucket` exists and is accessible with the store's credentials
///
/// A cached confirmation short-circuits the remote check. A positive remote
/// result is cached with the cache's lifetime. A negative one fails with
/// [`Error::ConnectionValidation`] and is never cached, so the next call
/// checks again. Other store errors are returned unchanged.
pub async fn validate_bucket(
    bucket: &str,
    store: &dyn BucketStore,
    cache: &ExistenceCache,
) -> Result<()> {
    if cache.is_confirmed(bucket) {
        tracing::debug!(bucket, "Bucket confirmed by cache");
        return Ok(());
    }

    if store.bucket_exists(bucket).await? {
        cache.confirm(bucket);
        tracing::debug!(bucket, lifetime = ?cache.lifetime(), "Bucket confirmed remotely");
        Ok(())
    } else {
        tracing::debug!(bucket, "Bucket not reachable");
        Err(Error::connection_validation())
    }
}
