//! commands command - Print the alias table

use comfy_table::{presets, Table};
use serde::Serialize;

use bw_core::{Operation, COMMAND_ALIASES};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct AliasEntry {
    alias: &'static str,
    operation: Operation,
}

fn render_table(color: bool) -> String {
    let mut table = Table::new();
    table.load_preset(if color {
        presets::UTF8_FULL
    } else {
        presets::ASCII_FULL
    });
    table.set_header(vec!["Legacy name", "Operation"]);
    for (alias, op) in COMMAND_ALIASES {
        table.add_row(vec![alias.to_string(), op.to_string()]);
    }
    table.to_string()
}

/// Execute the commands command
pub fn execute(output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if formatter.is_json() {
        let entries: Vec<AliasEntry> = COMMAND_ALIASES
            .iter()
            .map(|&(alias, operation)| AliasEntry { alias, operation })
            .collect();
        formatter.json(&entries);
    } else {
        formatter.println(&render_table(formatter.colors_enabled()));
    }
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_alias() {
        let rendered = render_table(false);
        for (alias, op) in COMMAND_ALIASES {
            assert!(rendered.contains(alias));
            assert!(rendered.contains(op.as_str()));
        }
    }
}
