//! Runtime error mapper
//!
//! Maps raw engine errors to diagnostics: pull a generated-code line out of
//! the text, resolve it through the source map, then classify the text with
//! the first matching rule of the pattern table. Unrecognized text degrades
//! to the `VERO-499` fallback; mapping never fails for well-formed input.
//!
//! A mapper owns its source map. Concurrent executions of different script
//! versions each build their own mapper (cheap: the compiled pattern table
//! is shared) or call [`map_error_with`] with an explicit map.

pub mod extract;
pub mod heuristics;
pub mod patterns;
pub mod raw_error;

pub use heuristics::category_heuristic;
pub use patterns::{Classify, CompiledPattern, PatternMatch, PatternRule, PatternTable};
pub use raw_error::RawError;

use crate::config::runtime::MapperPreferences;
use crate::diagnostic::{Diagnostic, DiagnosticContext, Location, UNKNOWN_STATEMENT};
use crate::logging::config::mapper_preferences;
use crate::logging::{LogEvent, LoggingService};
use crate::registry::{ErrorCategory, FALLBACK_CODE};
use crate::source_map::{ResolvedLocation, SourceMap};
use regex::Regex;
use std::sync::{Arc, OnceLock};

#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("Malformed raw error: {reason}")]
    MalformedInput { reason: String },

    #[error("Batch of {count} errors exceeds the limit of {max}")]
    TooManyErrors { count: usize, max: usize },

    #[error("Pattern '{id}' is not a valid regular expression: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },
}

impl MapperError {
    pub fn malformed_input(reason: &str) -> Self {
        Self::MalformedInput {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_pattern(id: &str, source: regex::Error) -> Self {
        Self::InvalidPattern {
            id: id.to_string(),
            source,
        }
    }
}

// ============================================================================
// MAPPER
// ============================================================================

#[derive(Clone)]
pub struct RuntimeErrorMapper {
    source_map: Arc<SourceMap>,
    patterns: Arc<PatternTable>,
    /// Where hit/fallback events go; the global logger when unset
    logger: Option<Arc<LoggingService>>,
    preferences: MapperPreferences,
}

impl std::fmt::Debug for RuntimeErrorMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeErrorMapper")
            .field("source_map", &self.source_map)
            .field("patterns", &self.patterns.len())
            .field("own_logger", &self.logger.is_some())
            .field("preferences", &self.preferences)
            .finish()
    }
}

impl Default for RuntimeErrorMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeErrorMapper {
    /// Built-in patterns, empty source map
    pub fn new() -> Self {
        Self {
            source_map: Arc::new(SourceMap::empty()),
            patterns: PatternTable::builtin(),
            logger: None,
            preferences: mapper_preferences().clone(),
        }
    }

    pub fn with_source_map(mut self, source_map: impl Into<Arc<SourceMap>>) -> Self {
        self.source_map = source_map.into();
        self
    }

    pub fn with_patterns(mut self, patterns: impl Into<Arc<PatternTable>>) -> Self {
        self.patterns = patterns.into();
        self
    }

    /// Send mapping events to this service instead of the global logger
    pub fn with_logging(mut self, service: Arc<LoggingService>) -> Self {
        self.logger = Some(service);
        self
    }

    pub fn with_preferences(mut self, preferences: MapperPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Replace the source map wholesale
    pub fn set_source_map(&mut self, source_map: impl Into<Arc<SourceMap>>) {
        self.source_map = source_map.into();
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Process-wide mapper with built-in patterns and no source map.
    ///
    /// Immutable: callers needing a source map build their own mapper.
    pub fn global() -> &'static RuntimeErrorMapper {
        static GLOBAL: OnceLock<RuntimeErrorMapper> = OnceLock::new();
        GLOBAL.get_or_init(RuntimeErrorMapper::new)
    }

    /// First `:<line>:<col>` line number in the message or stack
    pub fn extract_generated_line(raw: &RawError) -> Option<u32> {
        generated_line_in(&scan_text(raw))
    }

    pub fn resolve_source_location(&self, generated_line: u32) -> Option<ResolvedLocation<'_>> {
        self.source_map.resolve(generated_line)
    }

    /// Classify one raw error; an explicit statement overrides the source map's
    pub fn map_error(&self, raw: &RawError, statement: Option<&str>) -> Diagnostic {
        let log = MappingLog {
            service: self.logger.as_deref(),
            preferences: &self.preferences,
        };
        map_with(&self.patterns, &self.source_map, raw, statement, &log)
    }

    /// Element-wise [`map_error`](Self::map_error), pairing statement hints by position
    pub fn map_errors(&self, raws: &[RawError], statements: Option<&[&str]>) -> Vec<Diagnostic> {
        raws.iter()
            .enumerate()
            .map(|(i, raw)| {
                let statement = statements.and_then(|s| s.get(i)).copied();
                self.map_error(raw, statement)
            })
            .collect()
    }

    /// True iff some pattern recognizes the message
    pub fn is_known_error(&self, message: &str) -> bool {
        self.patterns.is_match(&extract::strip_ansi(message))
    }

    pub fn category_heuristic(message: &str) -> ErrorCategory {
        heuristics::category_heuristic(message)
    }
}

/// Map with an explicit source map and the built-in patterns
pub fn map_error_with(source_map: &SourceMap, raw: &RawError, statement: Option<&str>) -> Diagnostic {
    let log = MappingLog {
        service: None,
        preferences: mapper_preferences(),
    };
    map_with(&PatternTable::builtin(), source_map, raw, statement, &log)
}

// ============================================================================
// CORE
// ============================================================================

const PATTERN_HIT: &str = "Runtime error matched pattern";
const NO_PATTERN: &str = "Runtime error matched no pattern";

/// Mapping event sink: an injected service, or the global logger via the macros
struct MappingLog<'a> {
    service: Option<&'a LoggingService>,
    preferences: &'a MapperPreferences,
}

impl MappingLog<'_> {
    fn pattern_hit(&self, diagnostic: &Diagnostic, pattern: &CompiledPattern) {
        if !self.preferences.log_pattern_matches {
            return;
        }
        match self.service {
            Some(service) => service.log_event(
                LogEvent::debug_with_code(diagnostic.code(), PATTERN_HIT)
                    .with_context("pattern", pattern.id())
                    .with_context("priority", &pattern.priority().to_string()),
            ),
            None => {
                log_debug!(code = diagnostic.code(), PATTERN_HIT,
                    "pattern" => pattern.id(),
                    "priority" => pattern.priority()
                );
            }
        }
    }

    fn unmatched(&self, raw: &RawError) {
        if !self.preferences.log_unmatched_errors {
            return;
        }
        match self.service {
            Some(service) => service.log_event(
                LogEvent::warning_with_code(FALLBACK_CODE, NO_PATTERN)
                    .with_context("length", &raw.message.len().to_string())
                    .with_context("has_stack", &raw.stack.is_some().to_string()),
            ),
            None => log_warning!(code = FALLBACK_CODE, NO_PATTERN,
                "length" => raw.message.len(),
                "has_stack" => raw.stack.is_some()
            ),
        }
    }
}

fn map_with(
    patterns: &PatternTable,
    source_map: &SourceMap,
    raw: &RawError,
    explicit_statement: Option<&str>,
    log: &MappingLog<'_>,
) -> Diagnostic {
    let full_text = scan_text(raw);
    let resolved = generated_line_in(&full_text).and_then(|line| source_map.resolve(line));

    let statement = explicit_statement
        .or(resolved.map(|r| r.statement))
        .unwrap_or(UNKNOWN_STATEMENT);
    let context = DiagnosticContext::new(statement, resolved.map(|r| Location::line(r.line)));

    match patterns.first_match(&full_text) {
        Some(hit) => {
            let diagnostic = hit.symptom.diagnose(context);
            log.pattern_hit(&diagnostic, hit.pattern);
            diagnostic
        }
        None => {
            log.unmatched(raw);
            Diagnostic::unclassified(&raw.message, context)
        }
    }
}

/// [`RawError::full_text`] with terminal colors removed
fn scan_text(raw: &RawError) -> String {
    let full_text = raw.full_text();
    extract::strip_ansi(&full_text).into_owned()
}

fn generated_line_in(text: &str) -> Option<u32> {
    static LINE_COLUMN: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = LINE_COLUMN
        .get_or_init(|| Regex::new(r":(\d+):(\d+)").ok())
        .as_ref()?;
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
