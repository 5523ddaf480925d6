//! region command - Show bucket region

use clap::Args;
use serde::Serialize;

use bw_core::BucketStore as _;

use super::Overrides;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show the region of a bucket
#[derive(Args, Debug)]
pub struct RegionArgs {
    /// Bucket name
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct RegionOutput {
    bucket: String,
    region: String,
}

/// Execute the region command
pub async fn execute(args: RegionArgs, overrides: &Overrides, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (_, settings) = match super::load_settings(&formatter) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let client = match super::connect(overrides, &settings, Some(&args.bucket), &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.bucket_region(&args.bucket).await {
        Ok(region) => {
            if formatter.is_json() {
                formatter.json(&RegionOutput {
                    bucket: args.bucket,
                    region,
                });
            } else {
                formatter.println(&region);
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to get region of '{}': {e}", args.bucket));
            ExitCode::from_error(&e)
        }
    }
}
