//! FILENAME: core/gridvis/src/logging.rs
// PURPOSE: Category-tagged logging on top of the `log` facade.

use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// CATEGORY LOGGING
// ============================================================================

/// Sequence counter shared by every log line of the process.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Formats the message part of a log line: `seq|message`.
pub fn format_line(seq: u64, message: &str) -> String {
    format!("{}|{}", seq, message)
}

/// Writes one log line. The category becomes the `log` target so hosts can
/// filter by it; no logger is installed here.
pub fn write_log(level: log::Level, category: &str, message: &str) {
    if !log::log_enabled!(target: category, level) {
        return;
    }
    let line = format_line(next_seq(), message);
    log::log!(target: category, level, "{}", line);
}

/// Writes an ENTER line for a pipeline stage.
pub fn write_log_enter(level: log::Level, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

/// Writes an EXIT line for a pipeline stage.
pub fn write_log_exit(level: log::Level, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(level, category, &message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Info, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Warn, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_enter;
pub use log_exit;
pub use log_info;
pub use log_warn;
