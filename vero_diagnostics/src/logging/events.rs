//! Event system for diagnostics logging

use crate::registry::Code;
use std::collections::HashMap;
use std::time::SystemTime;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    /// Diagnostic code the event is about, if any
    pub code: Option<Code>,
    pub message: String,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Option<Code>, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: truncate_message(message),
            context: HashMap::new(),
        }
    }

    /// Create a new error event
    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, Some(code), message)
    }

    /// Create a new warning event
    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, None, message)
    }

    /// Create warning with specific code
    pub fn warning_with_code(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, Some(code), message)
    }

    /// Create a new info event
    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, None, message)
    }

    /// Create a debug event
    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, None, message)
    }

    /// Create debug with specific code
    pub fn debug_with_code(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Debug, Some(code), message)
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    /// Registry category of the attached code, if the code is known
    pub fn category(&self) -> Option<&'static str> {
        self.code
            .and_then(|code| crate::registry::get_definition(code.as_str()))
            .map(|definition| definition.category.as_str())
    }

    /// Format for display
    pub fn format(&self) -> String {
        match self.code {
            Some(code) => format!("[{}] {} - {}", self.level.as_str(), code, self.message),
            None => format!("[{}] {}", self.level.as_str(), self.message),
        }
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let timestamp = self
            .timestamp
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut json = serde_json::json!({
            "timestamp": timestamp,
            "level": self.level.as_str(),
            "message": self.message,
        });

        if let Some(code) = self.code {
            json["code"] = serde_json::Value::String(code.to_string());
        }

        if let Some(category) = self.category() {
            json["category"] = serde_json::Value::String(category.to_string());
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::Value::Object(
                self.context
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            );
        }

        serde_json::to_string(&json)
    }
}

fn truncate_message(message: &str) -> String {
    let limit = super::config::get_max_log_message_length();
    if message.len() <= limit {
        return message.to_string();
    }
    let mut end = limit;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}
