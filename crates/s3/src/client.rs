//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the BucketStore trait from bw-core.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_smithy_types::timeout::TimeoutConfig;

use bw_core::{
    BucketStore, ClientOptions, CommandResolver, Error, ExistenceCache, Result, Settings,
};

/// Region used when neither caller nor settings name one
pub const DEFAULT_REGION: &str = "us-east-1";

const CREDENTIALS_PROVIDER: &str = "bw-static-credentials";

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    resolver: CommandResolver,
    options: ClientOptions,
}

impl S3Client {
    /// Build a client from caller options completed with site settings
    ///
    /// `bucket`, when known up front, lets the options pick a suitable
    /// addressing style for it.
    pub async fn connect(
        options: ClientOptions,
        settings: &Settings,
        bucket: Option<&str>,
    ) -> Result<Self> {
        let options = options.assemble(settings, bucket);
        Self::from_options(options).await
    }

    /// Build a client from fully assembled options
    pub async fn from_options(options: ClientOptions) -> Result<Self> {
        options.validate()?;

        let region = options
            .region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region))
            .timeout_config(timeout_config(&options));

        if let Some(creds) = &options.credentials {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                creds.access_key.clone(),
                creds.secret_key.clone(),
                None, // session token
                None, // expiry
                CREDENTIALS_PROVIDER,
            ));
        }

        if let Some(endpoint) = &options.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&config);
        if let Some(path_style) = options.force_path_style {
            s3_config = s3_config.force_path_style(path_style);
        }

        tracing::debug!(
            endpoint = options.endpoint.as_deref().unwrap_or("default"),
            region = ?options.region,
            path_style = ?options.force_path_style,
            "Built S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config.build()),
            resolver: CommandResolver::new(),
            options,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Command resolver applied to named requests on this client
    pub fn resolver(&self) -> &CommandResolver {
        &self.resolver
    }

    /// The options this client was built from
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Validate `bucket` against this client, consulting `cache` first
    pub async fn validate(&self, bucket: &str, cache: &ExistenceCache) -> Result<()> {
        bw_core::validate_bucket(bucket, self, cache).await
    }
}

fn timeout_config(options: &ClientOptions) -> TimeoutConfig {
    let mut builder = TimeoutConfig::builder();
    if let Some(connect) = options.connect_timeout {
        builder = builder.connect_timeout(connect);
    }
    if let Some(read) = options.read_timeout {
        builder = builder.read_timeout(read);
    }
    builder.build()
}

/// Convert an SDK failure into the error surfaced to callers, message intact
pub(crate) fn sdk_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    Error::Network(DisplayErrorContext(&err).to_string())
}

/// Region name for a GetBucketLocation constraint
///
/// S3 reports us-east-1 as an empty constraint and eu-west-1 as the legacy
/// `EU` value.
pub fn region_from_constraint(constraint: Option<&str>) -> String {
    match constraint {
        None | Some("") => DEFAULT_REGION.to_string(),
        Some("EU") => "eu-west-1".to_string(),
        Some(region) => region.to_string(),
    }
}

#[async_trait]
impl BucketStore for S3Client {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let status = e.raw_response().map(|r| r.status().as_u16());
                let not_found = e.as_service_error().is_some_and(|se| se.is_not_found());
                // 301: the bucket lives in a region this client isn't set up for
                if not_found || matches!(status, Some(301 | 403 | 404)) {
                    tracing::debug!(bucket, ?status, "HeadBucket reported bucket unavailable");
                    Ok(false)
                } else {
                    Err(sdk_error(e))
                }
            }
        }
    }

    async fn bucket_region(&self, bucket: &str) -> Result<String> {
        let response = self
            .inner
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(region_from_constraint(
            response.location_constraint().map(|c| c.as_str()),
        ))
    }
}
