//! Category factories
//!
//! Each category is a `thiserror` enum with one variant per failure shape.
//! The variant's `Display` text is the interpolated "what went wrong"; the
//! [`Diagnose`] trait turns a variant plus its statement context into a
//! [`Diagnostic`] carrying the registry entry's code and retry policy, or
//! an override where the variant knows better.

pub mod assertion;
pub mod browser;
pub mod compile;
pub mod locator;
pub mod navigation;
pub mod network;
pub mod timeout;

pub use assertion::AssertionError;
pub use browser::BrowserError;
pub use compile::{from_upstream, LexerError, ParserError, ValidationError};
pub use locator::LocatorError;
pub use navigation::NavigationError;
pub use network::NetworkError;
pub use timeout::TimeoutError;

use crate::diagnostic::{Diagnostic, DiagnosticContext, RetryPolicy, Severity, Suggestion};
use crate::registry::{Code, ErrorCategory, ErrorCodeDefinition};

/// Failures in building a diagnostic from upstream input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticError {
    #[error("Unknown diagnostic code '{code}'")]
    UnknownCode { code: String },

    #[error("Code '{code}' belongs to the {category} category, expected a compile-time code")]
    NotCompileTime {
        code: String,
        category: ErrorCategory,
    },
}

impl DiagnosticError {
    pub fn unknown_code(code: &str) -> Self {
        Self::UnknownCode {
            code: code.to_string(),
        }
    }

    pub fn not_compile_time(code: &str, category: ErrorCategory) -> Self {
        Self::NotCompileTime {
            code: code.to_string(),
            category,
        }
    }
}

/// A failure shape that can be turned into a [`Diagnostic`]
pub trait Diagnose: std::error::Error {
    /// Registry entry backing this failure
    fn definition(&self) -> &'static ErrorCodeDefinition;

    fn code(&self) -> Code {
        self.definition().code
    }

    fn how_to_fix(&self) -> String {
        self.definition().how_to_fix.to_string()
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        Vec::new()
    }

    /// Registry default unless the variant has stronger evidence
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from(self.definition())
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn diagnose(&self, context: DiagnosticContext) -> Diagnostic {
        Diagnostic::from_definition(self.definition(), context)
            .with_what_went_wrong(self.to_string())
            .with_how_to_fix(self.how_to_fix())
            .with_severity(self.severity())
            .with_retry_policy(self.retry_policy())
            .with_suggestions(self.suggestions())
    }
}

/// A classified runtime failure, one variant per runtime category.
///
/// Pattern rules produce a symptom from engine text; the symptom is then
/// diagnosed against the statement it happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSymptom {
    Locator(LocatorError),
    Timeout(TimeoutError),
    Navigation(NavigationError),
    Assertion(AssertionError),
    Browser(BrowserError),
    Network(NetworkError),
}

impl RuntimeSymptom {
    fn as_diagnose(&self) -> &dyn Diagnose {
        match self {
            Self::Locator(e) => e,
            Self::Timeout(e) => e,
            Self::Navigation(e) => e,
            Self::Assertion(e) => e,
            Self::Browser(e) => e,
            Self::Network(e) => e,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Locator(_) => ErrorCategory::Locator,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Navigation(_) => ErrorCategory::Navigation,
            Self::Assertion(_) => ErrorCategory::Assertion,
            Self::Browser(_) => ErrorCategory::Browser,
            Self::Network(_) => ErrorCategory::Network,
        }
    }

    pub fn code(&self) -> Code {
        self.as_diagnose().code()
    }

    pub fn diagnose(&self, context: DiagnosticContext) -> Diagnostic {
        self.as_diagnose().diagnose(context)
    }
}

impl std::fmt::Display for RuntimeSymptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_diagnose(), f)
    }
}

macro_rules! impl_symptom_from {
    ($($error:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RuntimeSymptom {
                fn from(error: $error) -> Self {
                    Self::$variant(error)
                }
            }
        )+
    };
}

impl_symptom_from! {
    LocatorError => Locator,
    TimeoutError => Timeout,
    NavigationError => Navigation,
    AssertionError => Assertion,
    BrowserError => Browser,
    NetworkError => Network,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    /// Every runtime shape, with representative parameters
    fn all_runtime_symptoms() -> Vec<RuntimeSymptom> {
        vec![
            LocatorError::not_found(".btn").into(),
            LocatorError::ambiguous(".btn", 3).into(),
            LocatorError::not_visible("#menu").into(),
            LocatorError::disabled("#submit").into(),
            LocatorError::detached("#row").into(),
            LocatorError::covered("#save", Some("<div class=\"overlay\">")).into(),
            LocatorError::outside_viewport("#footer").into(),
            LocatorError::not_editable("#label").into(),
            TimeoutError::page_load(Some("https://example.com"), 30000).into(),
            TimeoutError::element_wait(Some(".btn"), 5000).into(),
            TimeoutError::navigation(10000).into(),
            TimeoutError::network_idle(15000).into(),
            TimeoutError::action("click", Some("#save"), 5000).into(),
            TimeoutError::test(60000).into(),
            NavigationError::invalid_url("htp:/broken").into(),
            NavigationError::dns_not_resolved("https://nope.invalid").into(),
            NavigationError::connection_refused("http://localhost:3000").into(),
            NavigationError::ssl_error("https://self-signed.local").into(),
            NavigationError::http_error("https://example.com/api", 503, "Service Unavailable").into(),
            NavigationError::not_found("https://example.com/missing").into(),
            NavigationError::offline().into(),
            NavigationError::aborted("https://example.com").into(),
            AssertionError::visibility_failed(".toast", "visible", "hidden").into(),
            AssertionError::text_mismatch("h1", "Welcome", "Sign in").into(),
            AssertionError::value_mismatch("#email", "a@b.c", "").into(),
            AssertionError::count_mismatch("li", 3, 2).into(),
            AssertionError::url_mismatch("/home", "/login").into(),
            AssertionError::title_mismatch("Home", "Login").into(),
            AssertionError::attribute_mismatch("a", "href", "/a", "/b").into(),
            AssertionError::mismatch("true", "false").into(),
            BrowserError::crashed().into(),
            BrowserError::not_installed("chromium").into(),
            BrowserError::context_closed().into(),
            BrowserError::page_closed().into(),
            BrowserError::frame_detached().into(),
            BrowserError::popup_not_found().into(),
            BrowserError::launch_failed("missing libnss3").into(),
            NetworkError::offline().into(),
            NetworkError::request_failed(Some("https://api.example.com")).into(),
            NetworkError::cors_blocked(Some("https://api.example.com")).into(),
            NetworkError::request_timeout(None).into(),
            NetworkError::websocket_error(Some("wss://example.com/socket")).into(),
        ]
    }

    #[test]
    fn test_every_runtime_shape_uses_a_registry_code_in_its_category() {
        for symptom in all_runtime_symptoms() {
            let diagnostic = symptom.diagnose(DiagnosticContext::unresolved());
            let definition = registry::get_definition(diagnostic.code().as_str())
                .unwrap_or_else(|| panic!("{} is not registered", diagnostic.code()));

            assert_eq!(definition.category, symptom.category(), "{symptom:?}");
            assert_eq!(diagnostic.category(), symptom.category());
            assert!(!diagnostic.what_went_wrong().is_empty());
            assert!(!diagnostic.how_to_fix().is_empty());
        }
    }

    #[test]
    fn test_runtime_shapes_keep_registry_policy_unless_overridden() {
        for symptom in all_runtime_symptoms() {
            let diagnostic = symptom.diagnose(DiagnosticContext::unresolved());
            let definition = registry::get_definition(diagnostic.code().as_str()).unwrap();
            assert_eq!(
                diagnostic.retry_policy(),
                RetryPolicy::from(definition),
                "{symptom:?}"
            );
        }
    }

    #[test]
    fn test_every_runtime_code_has_a_shape() {
        let produced: std::collections::HashSet<Code> =
            all_runtime_symptoms().iter().map(|s| s.code()).collect();
        for definition in registry::all_definitions() {
            if definition.category.is_runtime() {
                assert!(produced.contains(&definition.code), "{}", definition.code);
            }
        }
    }

    #[test]
    fn test_symptom_display_matches_diagnostic_text() {
        let symptom: RuntimeSymptom = LocatorError::ambiguous(".btn", 3).into();
        let diagnostic = symptom.diagnose(DiagnosticContext::unresolved());
        assert_eq!(symptom.to_string(), diagnostic.what_went_wrong());
    }

    #[test]
    fn test_diagnostic_error_messages() {
        assert_eq!(
            DiagnosticError::unknown_code("VERO-000").to_string(),
            "Unknown diagnostic code 'VERO-000'"
        );
        assert!(DiagnosticError::not_compile_time("VERO-401", ErrorCategory::Locator)
            .to_string()
            .contains("locator"));
    }
}
