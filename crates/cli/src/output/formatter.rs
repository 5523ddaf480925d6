//! Human-readable and JSON output
//!
//! In JSON mode stdout carries only JSON documents; status lines are either
//! suppressed or, for errors, emitted as a JSON object on stderr.

use serde::Serialize;

use super::OutputConfig;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes command results and status lines
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// ANSI colors are off under `--no-color` and in JSON mode
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    fn status_line(&self, symbol: &str, color: &str, message: &str) -> String {
        if self.colors_enabled() {
            format!("{color}{symbol}{RESET} {message}")
        } else {
            format!("{symbol} {message}")
        }
    }

    fn emit(&self, stream: Stream, line: &str) {
        match stream {
            Stream::Stdout => println!("{line}"),
            Stream::Stderr => eprintln!("{line}"),
        }
    }

    /// Status line that quiet and JSON modes suppress
    fn notice(&self, stream: Stream, symbol: &str, color: &str, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        self.emit(stream, &self.status_line(symbol, color, message));
    }

    pub fn success(&self, message: &str) {
        self.notice(Stream::Stdout, "✓", GREEN, message);
    }

    pub fn warning(&self, message: &str) {
        self.notice(Stream::Stderr, "⚠", YELLOW, message);
    }

    /// Errors print even in quiet mode
    pub fn error(&self, message: &str) {
        if self.config.json {
            let body = serde_json::json!({ "error": message });
            match serde_json::to_string_pretty(&body) {
                Ok(json) => self.emit(Stream::Stderr, &json),
                Err(_) => self.emit(Stream::Stderr, message),
            }
        } else {
            self.emit(Stream::Stderr, &self.status_line("✗", RED, message));
        }
    }

    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => self.emit(Stream::Stdout, &json),
            Err(e) => self.emit(Stream::Stderr, &format!("Error serializing output: {e}")),
        }
    }

    /// Plain stdout line, suppressed by `--quiet`
    pub fn println(&self, message: &str) {
        if !self.config.quiet {
            self.emit(Stream::Stdout, message);
        }
    }
}
