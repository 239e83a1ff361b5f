//! Locator failures (VERO-4xx)

use super::Diagnose;
use crate::diagnostic::{Suggestion, SuggestionAction};
use crate::registry::{codes::locator, ErrorCodeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocatorError {
    #[error("No element matches the selector '{selector}'")]
    NotFound { selector: String },

    #[error("The selector '{selector}' matches {count} elements, but the step needs exactly one")]
    Ambiguous { selector: String, count: usize },

    #[error("The element '{selector}' is on the page but hidden")]
    NotVisible { selector: String },

    #[error("The element '{selector}' is disabled and cannot be used")]
    Disabled { selector: String },

    #[error("The element '{selector}' was removed from the page before the action finished")]
    Detached { selector: String },

    #[error("The element '{selector}' is covered by {}", .covering.as_deref().unwrap_or("another element"))]
    Covered {
        selector: String,
        covering: Option<String>,
    },

    #[error("The element '{selector}' is outside the visible area of the page")]
    OutsideViewport { selector: String },

    #[error("The element '{selector}' cannot be typed into")]
    NotEditable { selector: String },
}

impl LocatorError {
    pub fn not_found(selector: &str) -> Self {
        Self::NotFound {
            selector: selector.to_string(),
        }
    }

    pub fn ambiguous(selector: &str, count: usize) -> Self {
        Self::Ambiguous {
            selector: selector.to_string(),
            count,
        }
    }

    pub fn not_visible(selector: &str) -> Self {
        Self::NotVisible {
            selector: selector.to_string(),
        }
    }

    pub fn disabled(selector: &str) -> Self {
        Self::Disabled {
            selector: selector.to_string(),
        }
    }

    pub fn detached(selector: &str) -> Self {
        Self::Detached {
            selector: selector.to_string(),
        }
    }

    pub fn covered(selector: &str, covering: Option<&str>) -> Self {
        Self::Covered {
            selector: selector.to_string(),
            covering: covering.map(str::to_string),
        }
    }

    pub fn outside_viewport(selector: &str) -> Self {
        Self::OutsideViewport {
            selector: selector.to_string(),
        }
    }

    pub fn not_editable(selector: &str) -> Self {
        Self::NotEditable {
            selector: selector.to_string(),
        }
    }

    pub fn selector(&self) -> &str {
        match self {
            Self::NotFound { selector }
            | Self::Ambiguous { selector, .. }
            | Self::NotVisible { selector }
            | Self::Disabled { selector }
            | Self::Detached { selector }
            | Self::Covered { selector, .. }
            | Self::OutsideViewport { selector }
            | Self::NotEditable { selector } => selector,
        }
    }
}

impl Diagnose for LocatorError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::NotFound { .. } => &locator::NOT_FOUND,
            Self::Ambiguous { .. } => &locator::AMBIGUOUS,
            Self::NotVisible { .. } => &locator::NOT_VISIBLE,
            Self::Disabled { .. } => &locator::DISABLED,
            Self::Detached { .. } => &locator::DETACHED,
            Self::Covered { .. } => &locator::COVERED,
            Self::OutsideViewport { .. } => &locator::OUTSIDE_VIEWPORT,
            Self::NotEditable { .. } => &locator::NOT_EDITABLE,
        }
    }

    fn how_to_fix(&self) -> String {
        match self {
            Self::NotFound { selector } => format!(
                "Check that '{}' is spelled correctly and that the element is on the page at this step. If it appears later, wait for it first.",
                selector
            ),
            Self::Ambiguous { count, .. } => format!(
                "Make the selector match one element instead of {}: add visible text, a role, or a parent container.",
                count
            ),
            _ => self.definition().how_to_fix.to_string(),
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        match self {
            Self::NotFound { .. } => vec![
                Suggestion::new("Verify the selector in the page definition", SuggestionAction::CheckSelector),
                Suggestion::new("Wait for the element before using it", SuggestionAction::AddWait),
            ],
            Self::Ambiguous { .. } => vec![Suggestion::new(
                "Use a more specific selector",
                SuggestionAction::RefineSelector,
            )],
            Self::NotVisible { .. } => vec![Suggestion::new(
                "Wait for the element to become visible",
                SuggestionAction::AddWait,
            )],
            Self::Disabled { .. } => vec![Suggestion::new(
                "Complete the steps that enable this element first",
                SuggestionAction::UpdateExpected,
            )],
            Self::Detached { .. } => vec![Suggestion::new(
                "Wait for the page to finish updating",
                SuggestionAction::AddWait,
            )],
            Self::Covered { .. } => vec![Suggestion::new(
                "Close the overlay covering the element",
                SuggestionAction::DismissOverlay,
            )],
            Self::OutsideViewport { .. } => vec![Suggestion::new(
                "Scroll the element into view",
                SuggestionAction::ScrollIntoView,
            )],
            Self::NotEditable { .. } => vec![Suggestion::new(
                "Point the field at an input element",
                SuggestionAction::CheckSelector,
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{DiagnosticContext, Location};
    use crate::registry::Flakiness;

    #[test]
    fn test_not_found_is_retryable_three_times() {
        let ctx = DiagnosticContext::new("click \"Login\"", Some(Location::line(4)));
        let diagnostic = LocatorError::not_found("#login").diagnose(ctx);

        assert_eq!(diagnostic.code().as_str(), "VERO-401");
        assert!(diagnostic.retryable());
        assert_eq!(diagnostic.suggested_retries(), 3);
        assert_eq!(diagnostic.flakiness(), Flakiness::Flaky);
        assert!(diagnostic.what_went_wrong().contains("#login"));
        assert_eq!(diagnostic.vero_statement(), "click \"Login\"");
    }

    #[test]
    fn test_disabled_is_not_retryable() {
        let diagnostic = LocatorError::disabled("#submit").diagnose(DiagnosticContext::unresolved());

        assert_eq!(diagnostic.code().as_str(), "VERO-404");
        assert!(!diagnostic.retryable());
        assert_eq!(diagnostic.suggested_retries(), 0);
        assert_eq!(diagnostic.flakiness(), Flakiness::Permanent);
    }

    #[test]
    fn test_ambiguous_interpolates_count() {
        let error = LocatorError::ambiguous(".btn", 3);
        assert_eq!(
            error.to_string(),
            "The selector '.btn' matches 3 elements, but the step needs exactly one"
        );
        assert!(error.how_to_fix().contains("instead of 3"));
        assert_eq!(error.selector(), ".btn");
    }

    #[test]
    fn test_covered_names_the_covering_element() {
        assert!(LocatorError::covered("#save", Some("<div class=\"modal\">"))
            .to_string()
            .ends_with("covered by <div class=\"modal\">"));
        assert!(LocatorError::covered("#save", None)
            .to_string()
            .ends_with("covered by another element"));
    }
}
