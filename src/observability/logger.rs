//! Structured JSON logger
//!
//! Lifecycle runs are driven by an external scheduler and their output is
//! consumed by log collectors, so every line must stand alone:
//! - one event per line, valid JSON
//! - `event` first, `severity` second, remaining fields sorted by key
//! - synchronous writes, no buffering
//! - errors and fatal events go to stderr

use std::fmt;
use std::io::{self, Write};

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Diagnostic detail
    Debug = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues (e.g. a collected grant failure)
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Run aborts
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger writing one JSON event per line.
pub struct Logger;

impl Logger {
    /// Log an event to stdout.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::write_event(severity, event, fields, &mut io::stdout());
    }

    /// Log at DEBUG level.
    pub fn debug(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Debug, event, fields);
    }

    /// Log at INFO level.
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level.
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level (stderr).
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::write_event(Severity::Error, event, fields, &mut io::stderr());
    }

    /// Log at FATAL level (stderr).
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::write_event(Severity::Fatal, event, fields, &mut io::stderr());
    }

    fn write_event<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = String::with_capacity(128);
        line.push('{');
        push_pair(&mut line, "event", event);
        line.push(',');
        push_pair(&mut line, "severity", severity.as_str());

        // Sorted keys keep output deterministic regardless of call-site order
        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);
        for (key, value) in sorted {
            line.push(',');
            push_pair(&mut line, key, value);
        }

        line.push('}');
        line.push('\n');

        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

fn push_pair(line: &mut String, key: &str, value: &str) {
    line.push('"');
    escape_into(line, key);
    line.push_str("\":\"");
    escape_into(line, value);
    line.push('"');
}

fn escape_into(line: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => line.push_str("\\\""),
            '\\' => line.push_str("\\\\"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            c if c.is_control() => {
                line.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => line.push(c),
        }
    }
}

#[cfg(test)]
fn capture(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::write_event(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
