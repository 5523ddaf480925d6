//! Site settings management
//!
//! Site-wide credentials, endpoint and cache settings live in a TOML file at
//! `~/.config/bucketwire/settings.toml` (or under `$BW_CONFIG_DIR`). A handful
//! of environment variables override the file so secrets need not be stored
//! on disk.
//!
//! Changes to schema_version require migration support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::Credentials;

/// Current settings schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable that relocates the settings directory
pub const CONFIG_DIR_ENV: &str = "BW_CONFIG_DIR";

const SETTINGS_FILE: &str = "settings.toml";

/// Environment overrides, as (variable, field) pairs
const ENV_OVERRIDES: [(&str, EnvField); 4] = [
    ("BW_ACCESS_KEY", EnvField::AccessKey),
    ("BW_SECRET_KEY", EnvField::SecretKey),
    ("BW_HOSTNAME", EnvField::Hostname),
    ("BW_REGION", EnvField::Region),
];

#[derive(Clone, Copy)]
enum EnvField {
    AccessKey,
    SecretKey,
    Hostname,
    Region,
}

/// Site-wide settings supplied by the host application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Access key ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Secret access key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Custom endpoint hostname for S3-compatible services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Use https when building an endpoint from `hostname`
    #[serde(default = "default_true")]
    pub use_https: bool,

    /// Default region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Bucket existence cache settings
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Which cache provider backs the existence cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local only
    Memory,
    /// JSON file next to the settings file
    File,
    /// Memory in front of the file
    Layered,
}

/// Bucket existence cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Cache positive bucket checks
    #[serde(default)]
    pub enabled: bool,

    /// Entry lifetime in seconds; 0 keeps entries forever
    #[serde(default)]
    pub lifetime_secs: u64,

    /// Provider used when enabled
    #[serde(default = "default_backend")]
    pub backend: CacheBackend,
}

fn default_true() -> bool {
    true
}

fn default_backend() -> CacheBackend {
    CacheBackend::Layered
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            lifetime_secs: 0,
            backend: default_backend(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            access_key: None,
            secret_key: None,
            hostname: None,
            use_https: true,
            region: None,
            cache: CacheSettings::default(),
        }
    }
}

impl Settings {
    /// The configured credential pair, if both halves are present
    pub fn credentials(&self) -> Option<Credentials> {
        let access_key = self.access_key.as_deref().filter(|k| !k.is_empty())?;
        let secret_key = self.secret_key.as_deref().filter(|k| !k.is_empty())?;
        Some(Credentials::new(access_key, secret_key))
    }

    /// Endpoint URL derived from the custom hostname setting
    ///
    /// A hostname that already carries a scheme is used as-is.
    pub fn endpoint(&self) -> Option<String> {
        let hostname = self.hostname.as_deref().map(str::trim).filter(|h| !h.is_empty())?;
        if hostname.contains("://") {
            return Some(hostname.to_string());
        }
        let scheme = if self.use_https { "https" } else { "http" };
        Some(format!("{scheme}://{hostname}"))
    }

    /// Configured region, ignoring blank values
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    /// Apply environment overrides from a lookup function
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, field) in ENV_OVERRIDES {
            let Some(value) = lookup(var) else {
                continue;
            };
            let slot = match field {
                EnvField::AccessKey => &mut self.access_key,
                EnvField::SecretKey => &mut self.secret_key,
                EnvField::Hostname => &mut self.hostname,
                EnvField::Region => &mut self.region,
            };
            *slot = Some(value);
        }
    }
}

/// Settings manager handles loading and saving settings
#[derive(Debug)]
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Create a SettingsManager at `$BW_CONFIG_DIR` or the user config directory
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("bucketwire"),
        };
        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE),
        })
    }

    /// Create a SettingsManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            settings_path: path,
        }
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Directory holding the settings file, also used for the file cache
    pub fn config_dir(&self) -> &Path {
        self.settings_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Load settings from disk and apply environment overrides
    pub fn load(&self) -> Result<Settings> {
        let mut settings = self.load_file()?;
        settings.apply_overrides(|var| std::env::var(var).ok());
        Ok(settings)
    }

    /// Load settings from disk only
    ///
    /// A missing file yields default settings. Older schema versions are migrated.
    pub fn load_file(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.settings_path)?;
        let mut settings: Settings = toml::from_str(&content)?;

        if settings.schema_version < SCHEMA_VERSION {
            settings = self.migrate(settings)?;
        } else if settings.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Settings file version {} is newer than supported version {}. Please upgrade bw.",
                settings.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(settings)?;
        std::fs::write(&self.settings_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.settings_path, permissions)?;
        }

        Ok(())
    }

    fn migrate(&self, settings: Settings) -> Result<Settings> {
        let mut settings = settings;
        settings.schema_version = SCHEMA_VERSION;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_settings_manager() -> (SettingsManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        (SettingsManager::with_path(path), temp_dir)
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, SCHEMA_VERSION);
        assert!(settings.use_https);
        assert!(!settings.cache.enabled);
        assert_eq!(settings.cache.lifetime_secs, 0);
        assert_eq!(settings.cache.backend, CacheBackend::Layered);
        assert!(settings.credentials().is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_settings_manager();
        let settings = manager.load_file().unwrap();
        assert_eq!(settings.schema_version, SCHEMA_VERSION);
        assert!(settings.hostname.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _temp_dir) = temp_settings_manager();

        let settings = Settings {
            access_key: Some("AKIDEXAMPLE".into()),
            secret_key: Some("secret".into()),
            hostname: Some("minio.internal:9000".into()),
            use_https: false,
            region: Some("eu-west-1".into()),
            cache: CacheSettings {
                enabled: true,
                lifetime_secs: 600,
                backend: CacheBackend::File,
            },
            ..Default::default()
        };

        manager.save(&settings).unwrap();
        let loaded = manager.load_file().unwrap();

        assert_eq!(loaded.access_key.as_deref(), Some("AKIDEXAMPLE"));
        assert_eq!(loaded.region(), Some("eu-west-1"));
        assert!(!loaded.use_https);
        assert!(loaded.cache.enabled);
        assert_eq!(loaded.cache.lifetime_secs, 600);
        assert_eq!(loaded.cache.backend, CacheBackend::File);
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_settings_manager();

        let content = format!("schema_version = {}\n", SCHEMA_VERSION + 1);
        std::fs::write(manager.settings_path(), content).unwrap();

        let result = manager.load_file();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let mut settings = Settings {
            access_key: Some("key".into()),
            ..Default::default()
        };
        assert!(settings.credentials().is_none());

        settings.secret_key = Some(String::new());
        assert!(settings.credentials().is_none());

        settings.secret_key = Some("secret".into());
        let creds = settings.credentials().unwrap();
        assert_eq!(creds.access_key, "key");
        assert_eq!(creds.secret_key, "secret");
    }

    #[test]
    fn test_endpoint_from_hostname() {
        let mut settings = Settings {
            hostname: Some("storage.example.com".into()),
            ..Default::default()
        };
        assert_eq!(
            settings.endpoint().as_deref(),
            Some("https://storage.example.com")
        );

        settings.use_https = false;
        assert_eq!(
            settings.endpoint().as_deref(),
            Some("http://storage.example.com")
        );

        settings.hostname = Some("https://already.example.com".into());
        assert_eq!(
            settings.endpoint().as_deref(),
            Some("https://already.example.com")
        );

        settings.hostname = Some("  ".into());
        assert!(settings.endpoint().is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings {
            access_key: Some("file-key".into()),
            region: Some("us-west-2".into()),
            ..Default::default()
        };

        settings.apply_overrides(|var| match var {
            "BW_ACCESS_KEY" => Some("env-key".into()),
            "BW_HOSTNAME" => Some("localhost:9000".into()),
            _ => None,
        });

        assert_eq!(settings.access_key.as_deref(), Some("env-key"));
        assert_eq!(settings.hostname.as_deref(), Some("localhost:9000"));
        assert_eq!(settings.region(), Some("us-west-2"));
        assert!(settings.secret_key.is_none());
    }

    #[test]
    fn test_cache_backend_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            schema_version = 1
            [cache]
            enabled = true
            backend = "memory"
            "#,
        )
        .unwrap();
        assert!(settings.cache.enabled);
        assert_eq!(settings.cache.backend, CacheBackend::Memory);
        assert_eq!(settings.cache.lifetime_secs, 0);
    }
}
