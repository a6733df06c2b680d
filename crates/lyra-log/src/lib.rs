//! A minimal, zero-dependency logging crate for the Lyra toolchain.
//!
//! Provides leveled log macros over a single global logger with an atomic
//! minimum level, colored level tags, and automatic module-path capture.
//! Log output goes to stderr so it never interleaves with tool output on
//! stdout (the CLI prints syntax trees there).
//!
//! # Example
//!
//! ```
//! use lyra_log::{debug, info, Level};
//!
//! lyra_log::set_level(Level::Debug);
//! info!("parsing {} bytes", 120);
//! debug!("lookahead refilled");
//! ```

use std::fmt::Arguments;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log levels, ordered from most severe (`Error`) to least severe (`Trace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Critical failures.
    Error = 0,
    /// Potentially harmful situations.
    Warn = 1,
    /// High-level progress messages.
    Info = 2,
    /// Diagnostic detail for development.
    Debug = 3,
    /// Per-step tracing.
    Trace = 4,
}

impl Level {
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Returns the upper-case tag for this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    /// Parses a level name, case-insensitively.
    ///
    /// ```
    /// use lyra_log::Level;
    ///
    /// assert_eq!(Level::parse("warn"), Some(Level::Warn));
    /// assert_eq!(Level::parse("TRACE"), Some(Level::Trace));
    /// assert_eq!(Level::parse("loud"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Some(Level::Error),
            "WARN" => Some(Level::Warn),
            "INFO" => Some(Level::Info),
            "DEBUG" => Some(Level::Debug),
            "TRACE" => Some(Level::Trace),
            _ => None,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

/// The global logger. Holds only the minimum level, as an atomic so any
/// thread may adjust or query it.
pub struct Logger {
    level: AtomicU8,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger { level: AtomicU8::new(level as u8) }
    }

    /// Sets the minimum level; messages below it are discarded.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current minimum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Returns whether a message at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, initializing it at `Level::Warn` on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the global minimum log level.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Configures the global level from an environment variable.
///
/// Unset or unrecognized values leave the level unchanged. Returns the level
/// in effect afterwards.
///
/// ```
/// let level = lyra_log::init_from_env("LYRA_LOG");
/// ```
pub fn init_from_env(var: &str) -> Level {
    if let Ok(value) = std::env::var(var) {
        if let Some(level) = Level::parse(&value) {
            set_level(level);
        }
    }
    get_logger().level()
}

/// Writes one formatted record. Called by the macros after the level check.
#[doc(hidden)]
pub fn __emit(level: Level, target: &str, args: Arguments) {
    const RESET: &str = "\x1b[0m";

    if !get_logger().enabled(level) {
        return;
    }

    eprintln!("{}[{}]{} {}: {}", level.color_code(), level.as_str(), RESET, target, args);
}

/// Logs at an explicit level, capturing the calling module path.
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        if $crate::get_logger().enabled($level) {
            $crate::__emit($level, module_path!(), format_args!($($arg)*));
        }
    };
}

/// Logs a message at the `Error` level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Error, $($arg)*) };
}

/// Logs a message at the `Warn` level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Warn, $($arg)*) };
}

/// Logs a message at the `Info` level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Info, $($arg)*) };
}

/// Logs a message at the `Debug` level.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Debug, $($arg)*) };
}

/// Logs a message at the `Trace` level.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Trace, $($arg)*) };
}
