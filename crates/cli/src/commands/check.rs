//! check command - Validate a bucket
//!
//! Confirms a bucket exists and is accessible with the configured
//! credentials, using the existence cache from site settings.

use clap::Args;
use serde::Serialize;

use bw_core::ExistenceCache;

use super::Overrides;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Check a bucket
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Bucket name
    pub bucket: String,

    /// Skip the existence cache and always ask the service
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    status: &'static str,
    bucket: String,
    cache_enabled: bool,
}

/// Execute the check command
pub async fn execute(args: CheckArgs, overrides: &Overrides, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (manager, settings) = match super::load_settings(&formatter) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let client = match super::connect(overrides, &settings, Some(&args.bucket), &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let cache = if args.no_cache {
        ExistenceCache::disabled()
    } else {
        ExistenceCache::from_settings(&settings.cache, manager.config_dir())
    };
    let cache_enabled = settings.cache.enabled && !args.no_cache;

    match client.validate(&args.bucket, &cache).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&CheckOutput {
                    status: "success",
                    bucket: args.bucket,
                    cache_enabled,
                });
            } else {
                formatter.success(&format!("Bucket '{}' is accessible.", args.bucket));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Bucket '{}': {e}", args.bucket));
            ExitCode::from_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_output_json() {
        let output = CheckOutput {
            status: "success",
            bucket: "assets".into(),
            cache_enabled: true,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["bucket"], "assets");
        assert_eq!(json["cache_enabled"], true);
    }
}
