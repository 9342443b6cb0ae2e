//! Terminal output for CLI handlers.
//!
//! In JSON mode every line is an object `{"type": ..., "payload": ...}` so
//! scripts can follow along. Quiet mode keeps warnings and errors only.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::{const_rwlock, RwLock};
use serde_json::{json, Value};

/// Output settings taken from the global CLI flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    fn shows(self, level: Level) -> bool {
        level == Level::Notice || !self.quiet
    }
}

static CONFIG: RwLock<OutputConfig> = const_rwlock(OutputConfig::new(false, false));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    /// Dropped in quiet mode.
    Regular,
    Notice,
}

fn envelope(kind: &str, payload: Value) -> Value {
    json!({ "type": kind, "payload": payload })
}

fn emit(kind: &str, payload: Value, level: Level, text: impl FnOnce() -> String) {
    let config = *CONFIG.read();
    if config.json {
        println!("{}", envelope(kind, payload));
    } else if config.shows(level) {
        println!("{}", text());
    }
}

fn styled(value: impl Display, style: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        style(&value)
    }
}

pub fn configure(config: OutputConfig) {
    *CONFIG.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    CONFIG.read().json
}

/// Application name and version, followed by a blank line.
pub fn header(version: &str) {
    emit(
        "header",
        json!({ "app": "bushtalk-bridge", "version": version }),
        Level::Regular,
        || format!("{} {}\n", "bushtalk-bridge".bold(), version.dimmed()),
    );
}

pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Level::Regular,
        || format!("  {:<12} {}", label.dimmed(), value),
    );
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Level::Regular, || {
        format!("\n{}", title.bold())
    });
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), Level::Regular, || {
        format!("  {} {}", "✓".green(), message)
    });
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), Level::Regular, || {
        format!("  {}", message.dimmed())
    });
}

pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), Level::Regular, || {
        format!("  {}: {}", "hint".cyan().dimmed(), message.dimmed())
    });
}

pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), Level::Notice, || {
        format!("  {} {}", "⚠".yellow(), message)
    });
}

/// Errors go to stderr in both modes.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", json!({ "message": message })));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

/// Print a whole JSON document as one line, without the envelope.
pub fn document(value: &Value) {
    println!("{value}");
}

pub fn positive(value: impl Display) -> String {
    styled(value, |v| v.green().to_string())
}

pub fn negative(value: impl Display) -> String {
    styled(value, |v| v.red().to_string())
}

pub fn muted(value: impl Display) -> String {
    styled(value, |v| v.dimmed().to_string())
}
