//! CLI command definitions and execution
//!
//! Every command that talks to the storage service goes through
//! [`connect`], which assembles client options from the global flags and
//! the site settings.

use clap::{Parser, Subcommand};

use bw_core::{ClientOptions, Settings, SettingsManager};
use bw_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod call;
mod check;
mod commands_table;
pub mod completions;
mod region;
mod resolve;
mod settings;

/// bw - pre-configured S3 clients from site settings
///
/// Builds storage clients from site-wide credentials and endpoint settings,
/// validates buckets with an optional existence cache, and runs operations
/// by name, legacy names included.
#[derive(Parser, Debug)]
#[command(name = "bw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Endpoint URL, overriding the hostname setting
    #[arg(long, global = true, env = "BW_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Region, overriding the region setting
    #[arg(long, global = true)]
    pub region: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a bucket exists and is accessible
    Check(check::CheckArgs),

    /// Show the region a bucket lives in
    Region(region::RegionArgs),

    /// Run an operation by name
    Call(call::CallArgs),

    /// Show which operation a name resolves to
    Resolve(resolve::ResolveArgs),

    /// List legacy command names and their canonical operations
    Commands,

    /// Show or change site settings
    #[command(subcommand)]
    Settings(settings::SettingsCommands),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Connection overrides taken from global flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub region: Option<String>,
}

impl Overrides {
    /// Caller-side options; values set here win over site settings
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
            ..Default::default()
        }
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };
    let overrides = Overrides {
        endpoint: cli.endpoint,
        region: cli.region,
    };

    match cli.command {
        Commands::Check(args) => check::execute(args, &overrides, output_config).await,
        Commands::Region(args) => region::execute(args, &overrides, output_config).await,
        Commands::Call(args) => call::execute(args, &overrides, output_config).await,
        Commands::Resolve(args) => resolve::execute(args, output_config),
        Commands::Commands => commands_table::execute(output_config),
        Commands::Settings(cmd) => settings::execute(cmd, output_config),
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Load site settings, reporting failures through the formatter
pub(crate) fn load_settings(
    formatter: &Formatter,
) -> std::result::Result<(SettingsManager, Settings), ExitCode> {
    let manager = SettingsManager::new().map_err(|e| {
        formatter.error(&format!("Failed to locate settings: {e}"));
        ExitCode::from_error(&e)
    })?;
    let settings = manager.load().map_err(|e| {
        formatter.error(&format!("Failed to load settings: {e}"));
        ExitCode::from_error(&e)
    })?;
    Ok((manager, settings))
}

/// Build a client for `bucket` from overrides and site settings
pub(crate) async fn connect(
    overrides: &Overrides,
    settings: &Settings,
    bucket: Option<&str>,
    formatter: &Formatter,
) -> std::result::Result<S3Client, ExitCode> {
    if settings.credentials().is_none() {
        formatter.warning("No credentials in site settings; using the default AWS provider chain");
    }

    S3Client::connect(overrides.client_options(), settings, bucket)
        .await
        .map_err(|e| {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            ExitCode::from_error(&e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "bw",
            "--endpoint",
            "http://localhost:9000",
            "--region",
            "eu-west-1",
            "check",
            "assets",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_overrides_become_caller_options() {
        let overrides = Overrides {
            endpoint: Some("http://localhost:9000".into()),
            region: None,
        };
        let settings = Settings {
            hostname: Some("ignored.example.com".into()),
            region: Some("eu-north-1".into()),
            ..Default::default()
        };

        let options = overrides.client_options().assemble(&settings, None);
        assert_eq!(options.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(options.region.as_deref(), Some("eu-north-1"));
    }
}
