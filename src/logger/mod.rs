//! Structured logging for the swap info cache
//!
//! ## Usage
//!
//! ```rust
//! use swapcache::logger::{self, LogTag};
//!
//! logger::error(LogTag::Decoder, "Route payload rejected");
//! logger::warning(LogTag::Store, "Background write failed");
//! logger::info(LogTag::System, "Cache opened");
//! logger::debug(LogTag::Cache, "Cache hit"); // Only if "cache" is in debug_tags
//! logger::verbose(LogTag::Jupiter, "Raw response: ..."); // Only at Verbose level
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, update_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Enable debug output for the given tag keys (e.g. `"cache"`, `"store"`)
pub fn enable_debug_tags<I, S>(tags: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    update_logger_config(|cfg| {
        cfg.debug_tags
            .extend(tags.into_iter().map(|t| t.into().to_lowercase()));
    });
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, shown only when the tag has debug enabled
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
