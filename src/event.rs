//! Log and pass-event callback system.
//!
//! The engine never writes to stdout/stderr on its own. Hosts that want
//! visibility into spellcheck passes register callbacks here; everything is
//! best-effort and a missing callback is not an error.

use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type PassCallback = Box<dyn Fn(&crate::engine::PassStats) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn pass_callback() -> &'static Mutex<Option<PassCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<PassCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global pass-statistics callback, invoked once per completed update.
pub fn set_pass_callback<F>(callback: F)
where
    F: Fn(&crate::engine::PassStats) + Send + Sync + 'static,
{
    if let Ok(mut guard) = pass_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit pass statistics to the registered callback.
pub fn emit_pass_stats(stats: &crate::engine::PassStats) {
    if let Ok(guard) = pass_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(stats);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit a log event.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
