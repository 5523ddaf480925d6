//! resolve command - Show command name resolution
//!
//! Works offline: only the alias table and operation names are consulted.

use clap::Args;
use serde::Serialize;

use bw_core::{CommandResolver, Operation};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show which operation a name resolves to
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Operation name (canonical or legacy)
    pub name: String,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    requested: String,
    operation: Operation,
    aliased: bool,
    dispatched: bool,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match CommandResolver::new().resolve_detailed(&args.name) {
        Ok(resolution) => {
            let output = ResolveOutput {
                requested: args.name,
                operation: resolution.operation,
                aliased: resolution.aliased,
                dispatched: bw_s3::is_dispatched(resolution.operation),
            };
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                let via = if output.aliased { "alias" } else { "default" };
                formatter.println(&format!(
                    "{} -> {} ({via})",
                    output.requested, output.operation
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_alias() {
        let code = execute(
            ResolveArgs {
                name: "GetService".into(),
            },
            OutputConfig {
                quiet: true,
                ..Default::default()
            },
        );
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let code = execute(
            ResolveArgs {
                name: "FrobnicateBucket".into(),
            },
            OutputConfig {
                quiet: true,
                ..Default::default()
            },
        );
        assert_eq!(code, ExitCode::UsageError);
    }
}
