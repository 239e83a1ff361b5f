//! Browser failures (VERO-8xx)

use super::Diagnose;
use crate::diagnostic::{Suggestion, SuggestionAction};
use crate::registry::{codes::browser, ErrorCodeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowserError {
    #[error("The browser crashed during the test")]
    Crashed,

    #[error("The {engine} browser is not installed")]
    NotInstalled { engine: String },

    #[error("The browser context was closed while the test was running")]
    ContextClosed,

    #[error("The page was closed while the test was using it")]
    PageClosed,

    #[error("The frame the step was working in was detached from the page")]
    FrameDetached,

    #[error("The expected popup window never opened")]
    PopupNotFound,

    #[error("The browser failed to start: {reason}")]
    LaunchFailed { reason: String },
}

impl BrowserError {
    pub fn crashed() -> Self {
        Self::Crashed
    }

    pub fn not_installed(engine: &str) -> Self {
        Self::NotInstalled {
            engine: engine.to_string(),
        }
    }

    pub fn context_closed() -> Self {
        Self::ContextClosed
    }

    pub fn page_closed() -> Self {
        Self::PageClosed
    }

    pub fn frame_detached() -> Self {
        Self::FrameDetached
    }

    pub fn popup_not_found() -> Self {
        Self::PopupNotFound
    }

    pub fn launch_failed(reason: &str) -> Self {
        Self::LaunchFailed {
            reason: reason.trim().to_string(),
        }
    }
}

impl Diagnose for BrowserError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::Crashed => &browser::CRASHED,
            Self::NotInstalled { .. } => &browser::NOT_INSTALLED,
            Self::ContextClosed => &browser::CONTEXT_CLOSED,
            Self::PageClosed => &browser::PAGE_CLOSED,
            Self::FrameDetached => &browser::FRAME_DETACHED,
            Self::PopupNotFound => &browser::POPUP_NOT_FOUND,
            Self::LaunchFailed { .. } => &browser::LAUNCH_FAILED,
        }
    }

    fn how_to_fix(&self) -> String {
        match self {
            Self::NotInstalled { engine } => {
                format!("Install {} with `npx playwright install {}`.", engine, engine)
            }
            _ => self.definition().how_to_fix.to_string(),
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        match self {
            Self::NotInstalled { .. } => vec![Suggestion::new(
                "Install the browser binaries",
                SuggestionAction::InstallBrowser,
            )],
            Self::LaunchFailed { .. } => vec![Suggestion::new(
                "Inspect the browser launch output",
                SuggestionAction::InspectOutput,
            )],
            _ => vec![Suggestion::new("Re-run the test", SuggestionAction::RetryTest)],
        }
    }
}
