//! call command - Run an operation by name
//!
//! Accepts canonical operation names as well as legacy aliases such as
//! `GetService` or `GetBucketHeaders`.

use clap::Args;

use bw_s3::CommandInput;

use super::Overrides;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Run an operation by name
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Operation name (canonical or legacy)
    pub operation: String,

    /// Target bucket
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Target object key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Copy source as bucket/key
    #[arg(long)]
    pub source: Option<String>,

    /// Key prefix for listings
    #[arg(long)]
    pub prefix: Option<String>,

    /// Maximum keys for listings
    #[arg(long)]
    pub max_keys: Option<i32>,
}

impl CallArgs {
    fn input(&self) -> CommandInput {
        CommandInput {
            bucket: self.bucket.clone(),
            key: self.key.clone(),
            source: self.source.clone(),
            prefix: self.prefix.clone(),
            max_keys: self.max_keys,
        }
    }
}

/// Execute the call command
pub async fn execute(args: CallArgs, overrides: &Overrides, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (_, settings) = match super::load_settings(&formatter) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let client = match super::connect(overrides, &settings, args.bucket.as_deref(), &formatter).await
    {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.execute(&args.operation, &args.input()).await {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                if output["aliased"] == true {
                    formatter.println(&format!(
                        "{} -> {}",
                        args.operation,
                        output["operation"].as_str().unwrap_or_default()
                    ));
                }
                formatter.println(
                    &serde_json::to_string_pretty(&output["result"]).unwrap_or_default(),
                );
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("{}: {e}", args.operation));
            ExitCode::from_error(&e)
        }
    }
}
