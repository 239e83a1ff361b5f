//! Configuration access for logging
//!
//! Buffer and message limits are compile-time constants; level and output
//! format are runtime preferences.

use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::{LoggingPreferences, MapperPreferences};
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static LOGGING_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();
static MAPPER_PREFERENCES: OnceLock<MapperPreferences> = OnceLock::new();

/// Initialize logging preferences (first call wins)
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    LOGGING_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn logging_preferences() -> &'static LoggingPreferences {
    LOGGING_PREFERENCES.get_or_init(LoggingPreferences::default)
}

/// Mapper preferences, read from the environment once
pub fn mapper_preferences() -> &'static MapperPreferences {
    MAPPER_PREFERENCES.get_or_init(MapperPreferences::default)
}

/// Get minimum log level
pub fn get_min_log_level() -> EventsLogLevel {
    logging_preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    logging_preferences().use_structured_logging
}

/// Check if console logging is enabled
pub fn use_console_logging() -> bool {
    logging_preferences().enable_console_logging
}

/// Get in-memory buffer size (compile-time constant)
pub fn get_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log message length (compile-time constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = logging_preferences();
    let mapper = mapper_preferences();

    format!(
        "Logging Configuration:\n\
         - Log buffer size: {}\n\
         - Max message length: {}\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Log pattern matches: {}\n\
         - Log unmatched errors: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        mapper.log_pattern_matches,
        mapper.log_unmatched_errors,
    )
}
