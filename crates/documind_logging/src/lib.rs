#![deny(missing_docs)]
//! Shared logging utilities for the DocuMind workspace.
//!
//! This crate provides the `dm_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.
//!
//! When a simulation drives the state machine on a virtual clock it records the
//! current virtual time here, and every `dm_*` line on that thread is prefixed
//! with it (`[t=1500ms] ...`). Threads without a virtual clock log unprefixed.

use std::cell::Cell;

thread_local! {
    /// Thread-local virtual clock reading in milliseconds, if a simulation is active.
    static VIRTUAL_MS: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Records the virtual clock reading for the current thread.
/// The simulation driver calls this whenever its clock moves.
pub fn set_virtual_ms(ms: u64) {
    VIRTUAL_MS.with(|v| v.set(Some(ms)));
}

/// Forgets the virtual clock reading for the current thread.
pub fn clear_virtual_ms() {
    VIRTUAL_MS.with(|v| v.set(None));
}

/// Retrieves the virtual clock reading for the current thread, if any.
pub fn virtual_ms() -> Option<u64> {
    VIRTUAL_MS.with(|v| v.get())
}

/// Returns the line prefix used by the `dm_*` macros.
#[doc(hidden)]
pub fn clock_prefix() -> String {
    match virtual_ms() {
        Some(ms) => format!("[t={ms}ms] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! dm_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::clock_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! dm_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::clock_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! dm_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::clock_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! dm_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::clock_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! dm_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::clock_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
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
