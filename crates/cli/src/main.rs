//! bw - pre-configured S3 clients from site settings
//!
//! Command-line front end for bucketwire: bucket checks, region lookup and
//! operations by name, all driven by the site settings file.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bucketwire::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
