//! Settings management commands
//!
//! Reads and writes the site settings file. Environment overrides are shown
//! by `show` but never written back.

use clap::Subcommand;
use serde::Serialize;

use bw_core::{CacheBackend, Settings, SettingsManager};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show effective settings (secret redacted)
    Show,

    /// Change stored settings
    Set(SetArgs),
}

/// Arguments for the `settings set` command
#[derive(clap::Args, Debug, Default)]
pub struct SetArgs {
    /// Access key ID
    #[arg(long)]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Custom endpoint hostname (empty string clears it)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Use http instead of https for the custom hostname
    #[arg(long)]
    pub http: Option<bool>,

    /// Default region (empty string clears it)
    #[arg(long)]
    pub region: Option<String>,

    /// Enable the bucket existence cache
    #[arg(long)]
    pub cache: Option<bool>,

    /// Cache entry lifetime in seconds, 0 for no expiry
    #[arg(long)]
    pub cache_lifetime: Option<u64>,

    /// Cache backend
    #[arg(long, value_parser = parse_backend)]
    pub cache_backend: Option<CacheBackend>,
}

fn parse_backend(value: &str) -> Result<CacheBackend, String> {
    match value {
        "memory" => Ok(CacheBackend::Memory),
        "file" => Ok(CacheBackend::File),
        "layered" => Ok(CacheBackend::Layered),
        other => Err(format!(
            "unknown cache backend '{other}' (expected memory, file or layered)"
        )),
    }
}

/// Settings view without the secret
#[derive(Debug, Serialize)]
struct SettingsView {
    settings_path: String,
    access_key: Option<String>,
    secret_key_set: bool,
    endpoint: Option<String>,
    region: Option<String>,
    cache_enabled: bool,
    cache_lifetime_secs: u64,
    cache_backend: CacheBackend,
}

impl SettingsView {
    fn new(manager: &SettingsManager, settings: &Settings) -> Self {
        Self {
            settings_path: manager.settings_path().display().to_string(),
            access_key: settings.access_key.clone(),
            secret_key_set: settings.secret_key.as_deref().is_some_and(|s| !s.is_empty()),
            endpoint: settings.endpoint(),
            region: settings.region().map(str::to_string),
            cache_enabled: settings.cache.enabled,
            cache_lifetime_secs: settings.cache.lifetime_secs,
            cache_backend: settings.cache.backend,
        }
    }
}

/// Execute a settings subcommand
pub fn execute(cmd: SettingsCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match cmd {
        SettingsCommands::Show => {
            let (manager, settings) = match super::load_settings(&formatter) {
                Ok(loaded) => loaded,
                Err(code) => return code,
            };
            show(&formatter, &SettingsView::new(&manager, &settings));
            ExitCode::Success
        }
        SettingsCommands::Set(args) => {
            let manager = match SettingsManager::new() {
                Ok(m) => m,
                Err(e) => {
                    formatter.error(&format!("Failed to locate settings: {e}"));
                    return ExitCode::from_error(&e);
                }
            };
            match set(&manager, args) {
                Ok(()) => {
                    formatter.success(&format!(
                        "Settings saved to {}",
                        manager.settings_path().display()
                    ));
                    ExitCode::Success
                }
                Err(e) => {
                    formatter.error(&format!("Failed to save settings: {e}"));
                    ExitCode::from_error(&e)
                }
            }
        }
    }
}

fn show(formatter: &Formatter, view: &SettingsView) {
    if formatter.is_json() {
        formatter.json(view);
        return;
    }

    let unset = || "(unset)".to_string();
    formatter.println(&format!("File      : {}", view.settings_path));
    formatter.println(&format!(
        "Access key: {}",
        view.access_key.clone().unwrap_or_else(unset)
    ));
    formatter.println(&format!(
        "Secret key: {}",
        if view.secret_key_set { "********" } else { "(unset)" }
    ));
    formatter.println(&format!(
        "Endpoint  : {}",
        view.endpoint.clone().unwrap_or_else(|| "(SDK default)".to_string())
    ));
    formatter.println(&format!(
        "Region    : {}",
        view.region.clone().unwrap_or_else(unset)
    ));
    let lifetime = match view.cache_lifetime_secs {
        0 => "no expiry".to_string(),
        secs => format!("{secs}s"),
    };
    formatter.println(&format!(
        "Cache     : {} ({:?}, {lifetime})",
        if view.cache_enabled { "enabled" } else { "disabled" },
        view.cache_backend
    ));
}

/// Apply `args` to the stored settings file
fn set(manager: &SettingsManager, args: SetArgs) -> bw_core::Result<()> {
    let mut settings = manager.load_file()?;
    apply(&mut settings, args);
    manager.save(&settings)
}

fn apply(settings: &mut Settings, args: SetArgs) {
    let non_empty = |v: String| if v.is_empty() { None } else { Some(v) };

    if let Some(key) = args.access_key {
        settings.access_key = non_empty(key);
    }
    if let Some(secret) = args.secret_key {
        settings.secret_key = non_empty(secret);
    }
    if let Some(hostname) = args.hostname {
        settings.hostname = non_empty(hostname);
    }
    if let Some(http) = args.http {
        settings.use_https = !http;
    }
    if let Some(region) = args.region {
        settings.region = non_empty(region);
    }
    if let Some(enabled) = args.cache {
        settings.cache.enabled = enabled;
    }
    if let Some(lifetime) = args.cache_lifetime {
        settings.cache.lifetime_secs = lifetime;
    }
    if let Some(backend) = args.cache_backend {
        settings.cache.backend = backend;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_writes_only_given_fields() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::with_path(temp_dir.path().join("settings.toml"));

        set(
            &manager,
            SetArgs {
                access_key: Some("AKID".into()),
                secret_key: Some("secret".into()),
                region: Some("eu-west-1".into()),
                ..Default::default()
            },
        )
        .unwrap();
        set(
            &manager,
            SetArgs {
                cache: Some(true),
                cache_lifetime: Some(120),
                cache_backend: Some(CacheBackend::File),
                ..Default::default()
            },
        )
        .unwrap();

        let settings = manager.load_file().unwrap();
        assert_eq!(settings.access_key.as_deref(), Some("AKID"));
        assert_eq!(settings.region(), Some("eu-west-1"));
        assert!(settings.cache.enabled);
        assert_eq!(settings.cache.lifetime_secs, 120);
        assert_eq!(settings.cache.backend, CacheBackend::File);
    }

    #[test]
    fn test_empty_value_clears_field() {
        let mut settings = Settings {
            hostname: Some("minio.local".into()),
            ..Default::default()
        };
        apply(
            &mut settings,
            SetArgs {
                hostname: Some(String::new()),
                http: Some(true),
                ..Default::default()
            },
        );
        assert!(settings.hostname.is_none());
        assert!(!settings.use_https);
    }

    #[test]
    fn test_view_redacts_secret() {
        let manager = SettingsManager::with_path("/tmp/bw/settings.toml".into());
        let settings = Settings {
            access_key: Some("AKID".into()),
            secret_key: Some("very-secret".into()),
            ..Default::default()
        };
        let view = SettingsView::new(&manager, &settings);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("AKID"));
        assert!(!json.contains("very-secret"));
        assert!(view.secret_key_set);
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!(parse_backend("memory"), Ok(CacheBackend::Memory));
        assert_eq!(parse_backend("layered"), Ok(CacheBackend::Layered));
        assert!(parse_backend("redis").is_err());
    }
}
