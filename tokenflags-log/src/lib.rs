//! Logging for the tokenflags workspace.
//!
//! Every crate in the workspace logs through the macros exported here.
//! The active level and output format are read once from the environment
//! and can be adjusted at runtime (the CLI does this for `-v` and `-q`).
//!
//! # Usage
//!
//! ```rust
//! use tokenflags_log::{debug, info, warn};
//!
//! debug!("registered {} controls", 42);
//! info!(target: "tokenflags::engine", "randomizing with seed {}", 1234);
//! warn!("token has {} stray symbols", 2);
//! ```
//!
//! # Environment Variables
//!
//! - `TOKENFLAGS_DEBUG=1` - Enable debug logging
//! - `TOKENFLAGS_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `TOKENFLAGS_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `TOKENFLAGS_LOG_COLOR=1|0` - Enable/disable colors
//! - `TOKENFLAGS_LOG_TIMESTAMPS=1|0` - Include timestamps

use once_cell::sync::Lazy;
use std::env;
use std::fmt::Write as _;
use std::io::Write as _;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Prefix shared by every logging environment variable.
pub const ENV_PREFIX: &str = "TOKENFLAGS";

// ============================================================================
// Levels and Formats
// ============================================================================

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables all output.
    Off = 5,
}

impl Level {
    /// Upper-case name used in rendered lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a rendered log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Timestamp, padded level, bracketed target.
    Pretty,
    /// Short time and a single-letter level.
    Compact,
    /// One JSON object per line.
    Json,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration, read from `TOKENFLAGS_*` variables.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// `lookup` receives full variable names such as `TOKENFLAGS_LOG_LEVEL`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{}_{}", ENV_PREFIX, suffix));
        let switch = |suffix: &str| var(suffix).map(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        let debug = switch("DEBUG").unwrap_or(false);
        let level = var("LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Info });
        let format = var("LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Json);
        let color = switch("LOG_COLOR")
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());
        let timestamps = switch("LOG_TIMESTAMPS").unwrap_or(true);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Read the environment now instead of on the first log line.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Whether `TOKENFLAGS_DEBUG` (or [`set_debug`]) turned debug output on.
#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Whether lines at `level` are currently emitted.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode. Enabling it lowers the level to at least `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Rendering
// ============================================================================

/// A single log event before rendering.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    pub target: &'a str,
    pub message: &'a str,
}

/// Render a record into one line (without the trailing newline).
pub fn render(record: &Record<'_>, config: &LogConfig) -> String {
    match config.format {
        Format::Pretty => render_pretty(record, config),
        Format::Compact => render_compact(record, config),
        Format::Json => render_json(record),
    }
}

fn render_pretty(record: &Record<'_>, config: &LogConfig) -> String {
    let mut line = String::new();
    if config.timestamps {
        let _ = write!(line, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"));
    }

    #[cfg(feature = "color")]
    if config.color {
        let _ = write!(line, "{:5} ", record.level.colored());
    } else {
        let _ = write!(line, "{:5} ", record.level.as_str());
    }
    #[cfg(not(feature = "color"))]
    let _ = write!(line, "{:5} ", record.level.as_str());

    if !record.target.is_empty() {
        let _ = write!(line, "[{}] ", record.target);
    }
    line.push_str(record.message);
    line
}

fn render_compact(record: &Record<'_>, config: &LogConfig) -> String {
    let mut line = String::new();
    if config.timestamps {
        let _ = write!(line, "{} ", chrono::Local::now().format("%H:%M:%S"));
    }
    let initial = record.level.as_str().chars().next().unwrap_or('?');
    let _ = write!(line, "{} ", initial);
    if !record.target.is_empty() {
        let _ = write!(line, "{}: ", record.target);
    }
    line.push_str(record.message);
    line
}

#[cfg(feature = "json")]
fn render_json(record: &Record<'_>) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Entry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = Entry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: record.level.as_str(),
        target: record.target,
        message: record.message,
    };
    serde_json::to_string(&entry).unwrap_or_default()
}

#[cfg(not(feature = "json"))]
fn render_json(record: &Record<'_>) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        record.level.as_str(),
        escape_json(record.target),
        escape_json(record.message)
    )
}

#[cfg(not(feature = "json"))]
fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Emit a message. The macros check the level before calling this.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    let config = config();
    let line = render(
        &Record {
            level,
            target,
            message,
        },
        config,
    );
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, $target, &format!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log at trace level.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Trace, $($arg)+) };
}

/// Log at debug level. Also emitted when `TOKENFLAGS_DEBUG` is set.
///
/// ```rust
/// use tokenflags_log::debug;
///
/// let key = "fast-text";
/// debug!("pulled {}", key);
/// debug!(target: "tokenflags::panel", "pulled {}", key);
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log at info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Info, $($arg)+) };
}

/// Log at warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Warn, $($arg)+) };
}

/// Log at error level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Error, $($arg)+) };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber honoring the `TOKENFLAGS_*` level.

    use super::*;

    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let level = config.level.as_str().to_lowercase();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }
}
