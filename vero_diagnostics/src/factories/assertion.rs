//! Assertion failures (VERO-7xx)

use super::Diagnose;
use crate::diagnostic::{Suggestion, SuggestionAction};
use crate::registry::{codes::assertion, ErrorCodeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssertionError {
    #[error("Expected '{selector}' to be {expected_state}, but it was {actual_state}")]
    Visibility {
        selector: String,
        expected_state: String,
        actual_state: String,
    },

    #[error("Expected '{selector}' to have text \"{expected}\", but found \"{actual}\"")]
    TextMismatch {
        selector: String,
        expected: String,
        actual: String,
    },

    #[error("Expected '{selector}' to have value \"{expected}\", but found \"{actual}\"")]
    ValueMismatch {
        selector: String,
        expected: String,
        actual: String,
    },

    #[error("Expected {expected} elements matching '{selector}', but found {actual}")]
    CountMismatch {
        selector: String,
        expected: usize,
        actual: usize,
    },

    #[error("Expected the page address to be \"{expected}\", but it was \"{actual}\"")]
    UrlMismatch { expected: String, actual: String },

    #[error("Expected the page title to be \"{expected}\", but it was \"{actual}\"")]
    TitleMismatch { expected: String, actual: String },

    #[error("Expected attribute '{attribute}' of '{selector}' to be \"{expected}\", but found \"{actual}\"")]
    AttributeMismatch {
        selector: String,
        attribute: String,
        expected: String,
        actual: String,
    },

    #[error("Expected \"{expected}\", but received \"{actual}\"")]
    Mismatch { expected: String, actual: String },
}

impl AssertionError {
    pub fn visibility_failed(selector: &str, expected_state: &str, actual_state: &str) -> Self {
        Self::Visibility {
            selector: selector.to_string(),
            expected_state: expected_state.to_string(),
            actual_state: actual_state.to_string(),
        }
    }

    pub fn text_mismatch(selector: &str, expected: &str, actual: &str) -> Self {
        Self::TextMismatch {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn value_mismatch(selector: &str, expected: &str, actual: &str) -> Self {
        Self::ValueMismatch {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn count_mismatch(selector: &str, expected: usize, actual: usize) -> Self {
        Self::CountMismatch {
            selector: selector.to_string(),
            expected,
            actual,
        }
    }

    pub fn url_mismatch(expected: &str, actual: &str) -> Self {
        Self::UrlMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn title_mismatch(expected: &str, actual: &str) -> Self {
        Self::TitleMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn attribute_mismatch(selector: &str, attribute: &str, expected: &str, actual: &str) -> Self {
        Self::AttributeMismatch {
            selector: selector.to_string(),
            attribute: attribute.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Generic expected/received failure with no more specific shape
    pub fn mismatch(expected: &str, actual: &str) -> Self {
        Self::Mismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl Diagnose for AssertionError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::Visibility { .. } => &assertion::VISIBILITY,
            Self::TextMismatch { .. } => &assertion::TEXT_MISMATCH,
            Self::ValueMismatch { .. } => &assertion::VALUE_MISMATCH,
            Self::CountMismatch { .. } => &assertion::COUNT_MISMATCH,
            Self::UrlMismatch { .. } => &assertion::URL_MISMATCH,
            Self::TitleMismatch { .. } => &assertion::TITLE_MISMATCH,
            Self::AttributeMismatch { .. } => &assertion::ATTRIBUTE_MISMATCH,
            Self::Mismatch { .. } => &assertion::MISMATCH,
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        let update = Suggestion::new(
            "Update the expected value if the application changed on purpose",
            SuggestionAction::UpdateExpected,
        );
        match self {
            Self::Visibility { .. } | Self::CountMismatch { .. } | Self::UrlMismatch { .. } => vec![
                Suggestion::new("Wait for the page to finish updating before checking", SuggestionAction::AddWait),
                update,
            ],
            _ => vec![update],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticContext;
    use crate::registry::Flakiness;

    #[test]
    fn test_text_mismatch_interpolates_expected_and_actual() {
        let diagnostic = AssertionError::text_mismatch("h1", "Welcome", "Sign in")
            .diagnose(DiagnosticContext::unresolved());

        assert_eq!(diagnostic.code().as_str(), "VERO-702");
        assert_eq!(
            diagnostic.what_went_wrong(),
            "Expected 'h1' to have text \"Welcome\", but found \"Sign in\""
        );
        assert_eq!(diagnostic.flakiness(), Flakiness::Unknown);
        assert_eq!(diagnostic.suggested_retries(), 1);
    }

    #[test]
    fn test_count_mismatch() {
        let error = AssertionError::count_mismatch("li.item", 3, 2);
        assert_eq!(
            error.to_string(),
            "Expected 3 elements matching 'li.item', but found 2"
        );
        assert_eq!(error.suggestions().len(), 2);
    }

    #[test]
    fn test_generic_mismatch_uses_its_own_code() {
        let diagnostic =
            AssertionError::mismatch("true", "false").diagnose(DiagnosticContext::unresolved());
        assert_eq!(diagnostic.code().as_str(), "VERO-708");
    }
}
