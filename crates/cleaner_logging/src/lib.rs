#![deny(missing_docs)]
//! Shared logging utilities for the history cleaner workspace.
//!
//! This crate provides the `cleaner_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every record is
//! emitted under [`LOG_TARGET`] so host consoles can filter the cleaner's
//! output from the page's own logging.

#[doc(hidden)]
pub use log;

/// Log target shared by every `cleaner_*` macro.
pub const LOG_TARGET: &str = "history_cleaner";

/// Logs a trace-level message under the cleaner target.
#[macro_export]
macro_rules! cleaner_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the cleaner target.
#[macro_export]
macro_rules! cleaner_info {
    ($($arg:tt)*) => {{
        $crate::log::info!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the cleaner target.
#[macro_export]
macro_rules! cleaner_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the cleaner target.
#[macro_export]
macro_rules! cleaner_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the cleaner target.
#[macro_export]
macro_rules! cleaner_error {
    ($($arg:tt)*) => {{
        $crate::log::error!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
