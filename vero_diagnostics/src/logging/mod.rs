//! Global logging module for the diagnostics core
//!
//! Provides a thread-safe, optionally-initialized logging service with a
//! small macro interface. Nothing in the crate requires the service to be
//! initialized: until `init_global_logging` runs, events are dropped.

#[macro_use]
pub mod macros;
pub mod config;
pub mod events;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    // Refuse to start with a broken code catalog
    crate::registry::validate_registry()
        .map_err(|e| format!("Error code registry is inconsistent: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    logging_service.log_event(
        LogEvent::info("Diagnostics logging initialized")
            .with_context("profile", crate::config::build_info::profile()),
    );

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Attach context pairs and hand the event to the global logger (used by the macros)
pub fn log_with_context(event: LogEvent, context: Vec<(&str, String)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let event = context
        .into_iter()
        .fold(event, |event, (key, value)| event.with_context(key, &value));

    logger.log_event(event);
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push_str(&format!(
        "Config source: {}\n",
        crate::config::build_info::source_info()
    ));
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_with_context_without_logger_is_noop() {
        log_with_context(LogEvent::info("dropped"), vec![("key", "value".to_string())]);
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Initialized:"));
        assert!(diagnostics.contains("Config source:"));
    }
}
