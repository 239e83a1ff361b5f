//! The diagnostic value type
//!
//! A [`Diagnostic`] is one classified, source-located error occurrence.
//! It is immutable once built; the only ways to build one are the category
//! factories (through [`crate::factories::Diagnose`]), the upstream
//! compile-error constructor, and [`Diagnostic::unclassified`].

use crate::registry::{Code, ErrorCategory, ErrorCodeDefinition, Flakiness, FALLBACK_CODE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder statement for diagnostics with no resolved source line
pub const UNKNOWN_STATEMENT: &str = "Unknown statement";

// ============================================================================
// SUPPORTING TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position in the DSL source (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl Location {
    pub fn line(line: u32) -> Self {
        Self { line, column: None }
    }

    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column: Some(column),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}", self.line, column),
            None => write!(f, "{}", self.line),
        }
    }
}

/// What a suggestion asks the consumer to do. A tag, not a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionAction {
    CheckSelector,
    RefineSelector,
    AddWait,
    IncreaseTimeout,
    ScrollIntoView,
    DismissOverlay,
    CheckUrl,
    CheckServer,
    CheckNetwork,
    CheckCertificate,
    UpdateExpected,
    InstallBrowser,
    RetryTest,
    FixSyntax,
    DefineName,
    RemoveDefinition,
    InspectOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub action: SuggestionAction,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, action: SuggestionAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }
}

/// Flakiness and retry budget of one diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub flakiness: Flakiness,
    pub retryable: bool,
    pub suggested_retries: u8,
}

impl RetryPolicy {
    /// Deterministic failure: never retry
    pub const PERMANENT: RetryPolicy = RetryPolicy {
        flakiness: Flakiness::Permanent,
        retryable: false,
        suggested_retries: 0,
    };

    /// Policy for errors nothing recognized: one cautious retry
    pub const UNCLASSIFIED: RetryPolicy = RetryPolicy {
        flakiness: Flakiness::Unknown,
        retryable: true,
        suggested_retries: 1,
    };
}

impl From<&ErrorCodeDefinition> for RetryPolicy {
    fn from(definition: &ErrorCodeDefinition) -> Self {
        Self {
            flakiness: definition.flakiness,
            retryable: definition.retryable,
            suggested_retries: definition.default_retries,
        }
    }
}

/// The DSL statement and location a diagnostic is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticContext {
    pub statement: String,
    pub location: Option<Location>,
}

impl DiagnosticContext {
    pub fn new(statement: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            statement: statement.into(),
            location,
        }
    }

    /// No statement and no location
    pub fn unresolved() -> Self {
        Self::new(UNKNOWN_STATEMENT, None)
    }
}

impl Default for DiagnosticContext {
    fn default() -> Self {
        Self::unresolved()
    }
}

// ============================================================================
// DIAGNOSTIC
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    code: Code,
    category: ErrorCategory,
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    title: String,
    what_went_wrong: String,
    how_to_fix: String,
    flakiness: Flakiness,
    retryable: bool,
    suggested_retries: u8,
    vero_statement: String,
    suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// Start from a registry entry; text and policy default to the entry's
    pub(crate) fn from_definition(
        definition: &ErrorCodeDefinition,
        context: DiagnosticContext,
    ) -> Self {
        Self {
            code: definition.code,
            category: definition.category,
            severity: Severity::Error,
            location: context.location,
            title: definition.title.to_string(),
            what_went_wrong: definition.description.to_string(),
            how_to_fix: definition.how_to_fix.to_string(),
            flakiness: definition.flakiness,
            retryable: definition.retryable,
            suggested_retries: definition.default_retries,
            vero_statement: context.statement,
            suggestions: Vec::new(),
        }
    }

    pub(crate) fn with_what_went_wrong(mut self, text: String) -> Self {
        self.what_went_wrong = text;
        self
    }

    pub(crate) fn with_how_to_fix(mut self, text: String) -> Self {
        self.how_to_fix = text;
        self
    }

    pub(crate) fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub(crate) fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.flakiness = policy.flakiness;
        self.retryable = policy.retryable;
        self.suggested_retries = if policy.retryable {
            policy.suggested_retries
        } else {
            0
        };
        self
    }

    pub(crate) fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Fallback diagnostic for runtime errors no pattern recognizes.
    ///
    /// The raw message is kept verbatim as `whatWentWrong`.
    pub fn unclassified(message: &str, context: DiagnosticContext) -> Self {
        Self {
            code: FALLBACK_CODE,
            category: ErrorCategory::Script,
            severity: Severity::Error,
            location: context.location,
            title: "Unexpected error".to_string(),
            what_went_wrong: message.to_string(),
            how_to_fix: "Vero could not classify this error. Check the test output and the failing step for details.".to_string(),
            flakiness: RetryPolicy::UNCLASSIFIED.flakiness,
            retryable: RetryPolicy::UNCLASSIFIED.retryable,
            suggested_retries: RetryPolicy::UNCLASSIFIED.suggested_retries,
            vero_statement: context.statement,
            suggestions: vec![Suggestion::new(
                "Inspect the browser engine output for the full error",
                SuggestionAction::InspectOutput,
            )],
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn what_went_wrong(&self) -> &str {
        &self.what_went_wrong
    }

    pub fn how_to_fix(&self) -> &str {
        &self.how_to_fix
    }

    pub fn flakiness(&self) -> Flakiness {
        self.flakiness
    }

    pub fn retryable(&self) -> bool {
        self.retryable
    }

    pub fn suggested_retries(&self) -> u8 {
        self.suggested_retries
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            flakiness: self.flakiness,
            retryable: self.retryable,
            suggested_retries: self.suggested_retries,
        }
    }

    pub fn vero_statement(&self) -> &str {
        &self.vero_statement
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// True for the `VERO-499` fallback
    pub fn is_unclassified(&self) -> bool {
        self.code == FALLBACK_CODE
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    /// One-line form for list views
    pub fn format(&self) -> String {
        match self.location {
            Some(location) => format!(
                "{}[{}] line {}: {}",
                self.severity, self.code, location, self.title
            ),
            None => format!("{}[{}]: {}", self.severity, self.code, self.title),
        }
    }

    /// Multi-line, cargo-style form for detail views
    pub fn format_detailed(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}[{}]: {}\n",
            self.severity, self.code, self.title
        ));

        let gutter = self
            .location
            .map(|l| l.line.to_string().len())
            .unwrap_or(1);
        let pad = " ".repeat(gutter);

        if let Some(location) = self.location {
            output.push_str(&format!("{} --> line {}\n", pad, location));
            output.push_str(&format!("{} |\n", pad));
            output.push_str(&format!(
                "{} | {}\n",
                location.line, self.vero_statement
            ));
            output.push_str(&format!("{} |\n", pad));
        } else {
            output.push_str(&format!("{} = statement: {}\n", pad, self.vero_statement));
        }

        output.push_str(&format!("{} = {}\n", pad, self.what_went_wrong));
        output.push_str(&format!("{} = help: {}\n", pad, self.how_to_fix));

        let retry = if self.retryable {
            format!(
                "{}, retryable (suggested retries: {})",
                self.flakiness.as_str(),
                self.suggested_retries
            )
        } else {
            format!("{}, not retryable", self.flakiness.as_str())
        };
        output.push_str(&format!("{} = note: {}\n", pad, retry));

        for suggestion in &self.suggestions {
            output.push_str(&format!("{} = suggestion: {}\n", pad, suggestion.text));
        }

        output
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.format(), self.what_went_wrong)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::codes;

    #[test]
    fn test_unclassified_keeps_raw_message() {
        let diagnostic = Diagnostic::unclassified("banana", DiagnosticContext::unresolved());

        assert_eq!(diagnostic.code().as_str(), "VERO-499");
        assert_eq!(diagnostic.category(), ErrorCategory::Script);
        assert_eq!(diagnostic.severity(), Severity::Error);
        assert_eq!(diagnostic.what_went_wrong(), "banana");
        assert_eq!(diagnostic.flakiness(), Flakiness::Unknown);
        assert!(diagnostic.retryable());
        assert_eq!(diagnostic.suggested_retries(), 1);
        assert_eq!(diagnostic.vero_statement(), UNKNOWN_STATEMENT);
        assert_eq!(diagnostic.suggestions().len(), 1);
        assert_eq!(
            diagnostic.suggestions()[0].action,
            SuggestionAction::InspectOutput
        );
        assert!(diagnostic.is_unclassified());
    }

    #[test]
    fn test_from_definition_copies_registry_policy() {
        let ctx = DiagnosticContext::new("click \"Login\"", Some(Location::line(4)));
        let diagnostic = Diagnostic::from_definition(&codes::locator::NOT_FOUND, ctx);

        assert_eq!(diagnostic.code(), codes::locator::NOT_FOUND.code);
        assert_eq!(diagnostic.retry_policy(), RetryPolicy::from(&codes::locator::NOT_FOUND));
        assert_eq!(diagnostic.location(), Some(Location::line(4)));
    }

    #[test]
    fn test_non_retryable_policy_zeroes_budget() {
        let diagnostic = Diagnostic::from_definition(
            &codes::navigation::HTTP_ERROR,
            DiagnosticContext::unresolved(),
        )
        .with_retry_policy(RetryPolicy {
            flakiness: Flakiness::Permanent,
            retryable: false,
            suggested_retries: 2,
        });

        assert!(!diagnostic.retryable());
        assert_eq!(diagnostic.suggested_retries(), 0);
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let ctx = DiagnosticContext::new("open \"/login\"", Some(Location::new(3, 5)));
        let diagnostic = Diagnostic::from_definition(&codes::timeout::PAGE_LOAD, ctx);
        let json: serde_json::Value = serde_json::from_str(&diagnostic.to_json().unwrap()).unwrap();

        assert_eq!(json["code"], "VERO-501");
        assert_eq!(json["category"], "timeout");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["location"]["line"], 3);
        assert_eq!(json["location"]["column"], 5);
        assert_eq!(json["flakiness"], "flaky");
        assert_eq!(json["suggestedRetries"], 2);
        assert_eq!(json["veroStatement"], "open \"/login\"");
        assert!(json.get("whatWentWrong").is_some());
        assert!(json.get("howToFix").is_some());
    }

    #[test]
    fn test_json_omits_absent_location() {
        let diagnostic = Diagnostic::unclassified("boom", DiagnosticContext::unresolved());
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert!(json.get("location").is_none());
        assert_eq!(json["suggestions"][0]["action"], "inspect_output");
    }

    #[test]
    fn test_formatting() {
        let ctx = DiagnosticContext::new("click \"Login\"", Some(Location::line(12)));
        let diagnostic = Diagnostic::from_definition(&codes::locator::DISABLED, ctx);

        assert_eq!(
            diagnostic.format(),
            "error[VERO-404] line 12: Element is disabled"
        );

        let detailed = diagnostic.format_detailed();
        assert!(detailed.starts_with("error[VERO-404]: Element is disabled\n"));
        assert!(detailed.contains("   --> line 12\n"));
        assert!(detailed.contains("12 | click \"Login\"\n"));
        assert!(detailed.contains("= note: permanent, not retryable"));

        let display = diagnostic.to_string();
        assert!(display.contains("disabled and cannot be used"));
    }
}
