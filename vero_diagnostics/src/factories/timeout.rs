//! Timeout failures (VERO-5xx)

use super::Diagnose;
use crate::diagnostic::{Suggestion, SuggestionAction};
use crate::registry::{codes::timeout, ErrorCodeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeoutError {
    #[error("{} did not finish loading within {ms}ms", .url.as_deref().unwrap_or("The page"))]
    PageLoad { url: Option<String>, ms: u64 },

    #[error("Waited {ms}ms for {} but it never became ready", .selector.as_deref().unwrap_or("the element"))]
    ElementWait { selector: Option<String>, ms: u64 },

    #[error("The page did not navigate within {ms}ms")]
    Navigation { ms: u64 },

    #[error("The page did not become network idle within {ms}ms")]
    NetworkIdle { ms: u64 },

    #[error("The {verb} action on {} did not complete within {ms}ms", .selector.as_deref().unwrap_or("the element"))]
    Action {
        verb: String,
        selector: Option<String>,
        ms: u64,
    },

    #[error("The scenario exceeded its time limit of {ms}ms")]
    Test { ms: u64 },
}

impl TimeoutError {
    pub fn page_load(url: Option<&str>, ms: u64) -> Self {
        Self::PageLoad {
            url: url.map(str::to_string),
            ms,
        }
    }

    pub fn element_wait(selector: Option<&str>, ms: u64) -> Self {
        Self::ElementWait {
            selector: selector.map(str::to_string),
            ms,
        }
    }

    pub fn navigation(ms: u64) -> Self {
        Self::Navigation { ms }
    }

    pub fn network_idle(ms: u64) -> Self {
        Self::NetworkIdle { ms }
    }

    pub fn action(verb: &str, selector: Option<&str>, ms: u64) -> Self {
        Self::Action {
            verb: verb.to_string(),
            selector: selector.map(str::to_string),
            ms,
        }
    }

    pub fn test(ms: u64) -> Self {
        Self::Test { ms }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::PageLoad { ms, .. }
            | Self::ElementWait { ms, .. }
            | Self::Navigation { ms }
            | Self::NetworkIdle { ms }
            | Self::Action { ms, .. }
            | Self::Test { ms } => *ms,
        }
    }
}

impl Diagnose for TimeoutError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::PageLoad { .. } => &timeout::PAGE_LOAD,
            Self::ElementWait { .. } => &timeout::ELEMENT_WAIT,
            Self::Navigation { .. } => &timeout::NAVIGATION,
            Self::NetworkIdle { .. } => &timeout::NETWORK_IDLE,
            Self::Action { .. } => &timeout::ACTION,
            Self::Test { .. } => &timeout::TEST,
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        let increase = Suggestion::new(
            format!("Increase the timeout above {}ms", self.duration_ms()),
            SuggestionAction::IncreaseTimeout,
        );
        match self {
            Self::ElementWait { .. } | Self::Action { .. } => vec![
                Suggestion::new("Verify the selector matches the element", SuggestionAction::CheckSelector),
                increase,
            ],
            Self::PageLoad { .. } => vec![
                Suggestion::new("Check that the site is up", SuggestionAction::CheckServer),
                increase,
            ],
            Self::NetworkIdle { .. } => vec![Suggestion::new(
                "Wait for a specific element instead of network idle",
                SuggestionAction::AddWait,
            )],
            Self::Navigation { .. } | Self::Test { .. } => vec![increase],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticContext;

    #[test]
    fn test_element_wait_interpolates_duration() {
        let error = TimeoutError::element_wait(None, 30000);
        assert_eq!(
            error.to_string(),
            "Waited 30000ms for the element but it never became ready"
        );
        assert_eq!(error.duration_ms(), 30000);

        let diagnostic = error.diagnose(DiagnosticContext::unresolved());
        assert_eq!(diagnostic.code().as_str(), "VERO-502");
        assert_eq!(diagnostic.suggested_retries(), 3);
        assert!(diagnostic.suggestions()[1].text.contains("30000ms"));
    }

    #[test]
    fn test_action_names_verb_and_selector() {
        let error = TimeoutError::action("click", Some("#save"), 5000);
        assert_eq!(
            error.to_string(),
            "The click action on #save did not complete within 5000ms"
        );
    }

    #[test]
    fn test_page_load_without_url() {
        assert_eq!(
            TimeoutError::page_load(None, 100).to_string(),
            "The page did not finish loading within 100ms"
        );
    }
}
