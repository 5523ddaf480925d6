//! Client option assembly
//!
//! `ClientOptions` is the partial configuration a caller hands to the client
//! factory. `assemble` fills the gaps from site settings without ever
//! replacing a value the caller already set.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Settings;
use crate::error::{Error, Result};

/// Connection timeout applied when neither caller nor settings provide one
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Static access key pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"** redacted **")
            .finish()
    }
}

/// Options used to build a storage client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Static credentials
    pub credentials: Option<Credentials>,

    /// Endpoint URL override for S3-compatible services
    pub endpoint: Option<String>,

    /// Region
    pub region: Option<String>,

    /// Connection timeout
    pub connect_timeout: Option<Duration>,

    /// Read timeout; left to the SDK when unset
    pub read_timeout: Option<Duration>,

    /// Address buckets as `endpoint/bucket` rather than `bucket.endpoint`
    pub force_path_style: Option<bool>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_force_path_style(mut self, enabled: bool) -> Self {
        self.force_path_style = Some(enabled);
        self
    }

    /// Fill every unset option from `settings` and built-in defaults
    ///
    /// Values already present are never overwritten. `bucket`, when known,
    /// decides path-style addressing for names that cannot be used as a
    /// DNS label.
    pub fn assemble(mut self, settings: &Settings, bucket: Option<&str>) -> Self {
        if self.credentials.is_none() {
            self.credentials = settings.credentials();
        }
        if self.endpoint.is_none() {
            self.endpoint = settings.endpoint();
        }
        if self.connect_timeout.is_none() {
            self.connect_timeout = Some(DEFAULT_CONNECT_TIMEOUT);
        }
        if self.region.is_none() {
            self.region = settings.region().map(str::to_string);
        }
        if self.force_path_style.is_none() {
            let incompatible_bucket = bucket.is_some_and(|b| !is_dns_compatible(b));
            if self.endpoint.is_some() || incompatible_bucket {
                self.force_path_style = Some(true);
            }
        }
        self
    }

    /// Check the options before they reach the SDK
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "Endpoint must use http or https: {endpoint}"
                )));
            }
        }
        if let Some(creds) = &self.credentials
            && (creds.access_key.is_empty() || creds.secret_key.is_empty())
        {
            return Err(Error::Config("Credentials must not be empty".into()));
        }
        Ok(())
    }
}

/// Whether a bucket name can be used as a virtual-hosted DNS label
pub fn is_dns_compatible(bucket: &str) -> bool {
    (3..=63).contains(&bucket.len())
        && !bucket.contains('.')
        && !bucket.starts_with('-')
        && !bucket.ends_with('-')
        && bucket
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_settings() -> Settings {
        Settings {
            access_key: Some("site-key".into()),
            secret_key: Some("site-secret".into()),
            hostname: Some("objects.example.com".into()),
            region: Some("eu-central-1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_assemble_fills_missing_values() {
        let options = ClientOptions::new().assemble(&site_settings(), None);

        assert_eq!(
            options.credentials,
            Some(Credentials::new("site-key", "site-secret"))
        );
        assert_eq!(
            options.endpoint.as_deref(),
            Some("https://objects.example.com")
        );
        assert_eq!(options.region.as_deref(), Some("eu-central-1"));
        assert_eq!(options.connect_timeout, Some(DEFAULT_CONNECT_TIMEOUT));
        assert_eq!(options.force_path_style, Some(true));
    }

    #[test]
    fn test_assemble_keeps_caller_credentials() {
        let caller = Credentials::new("caller-key", "caller-secret");
        let options = ClientOptions::new()
            .with_credentials(caller.clone())
            .assemble(&site_settings(), None);

        assert_eq!(options.credentials, Some(caller));
    }

    #[test]
    fn test_assemble_keeps_caller_endpoint() {
        let options = ClientOptions::new()
            .with_endpoint("http://localhost:9000")
            .assemble(&site_settings(), None);

        assert_eq!(options.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_assemble_keeps_caller_region_and_timeout() {
        let options = ClientOptions::new()
            .with_region("ap-southeast-2")
            .with_connect_timeout(Duration::from_secs(3))
            .with_force_path_style(false)
            .assemble(&site_settings(), Some("my.dotted.bucket"));

        assert_eq!(options.region.as_deref(), Some("ap-southeast-2"));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(options.force_path_style, Some(false));
    }

    #[test]
    fn test_assemble_without_settings() {
        let options = ClientOptions::new().assemble(&Settings::default(), Some("assets"));

        assert!(options.credentials.is_none());
        assert!(options.endpoint.is_none());
        assert!(options.region.is_none());
        assert!(options.force_path_style.is_none());
        assert_eq!(options.connect_timeout, Some(DEFAULT_CONNECT_TIMEOUT));
    }

    #[test]
    fn test_assemble_path_style_for_dotted_bucket() {
        let options =
            ClientOptions::new().assemble(&Settings::default(), Some("media.example.com"));
        assert_eq!(options.force_path_style, Some(true));
    }

    #[test]
    fn test_assemble_is_repeatable() {
        let settings = site_settings();
        let once = ClientOptions::new().assemble(&settings, Some("assets"));
        let twice = once.clone().assemble(&settings, Some("assets"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(ClientOptions::new().validate().is_ok());
        assert!(ClientOptions::new()
            .with_endpoint("https://s3.example.com")
            .validate()
            .is_ok());
        assert!(matches!(
            ClientOptions::new().with_endpoint("not a url").validate(),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientOptions::new()
                .with_endpoint("ftp://s3.example.com")
                .validate(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_validate_empty_credentials() {
        let options = ClientOptions::new().with_credentials(Credentials::new("", "secret"));
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("AKID", "very-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_is_dns_compatible() {
        assert!(is_dns_compatible("my-bucket-01"));
        assert!(!is_dns_compatible("My-Bucket"));
        assert!(!is_dns_compatible("with.dots"));
        assert!(!is_dns_compatible("ab"));
        assert!(!is_dns_compatible("-leading"));
        assert!(!is_dns_compatible(&"a".repeat(64)));
    }
}
