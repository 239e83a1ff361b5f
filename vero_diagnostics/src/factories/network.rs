//! Network failures (VERO-9xx)

use super::Diagnose;
use crate::diagnostic::{Suggestion, SuggestionAction};
use crate::registry::{codes::network, ErrorCodeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("The network connection dropped during the test")]
    Offline,

    #[error("The request to {} failed", .url.as_deref().unwrap_or("the server"))]
    RequestFailed { url: Option<String> },

    #[error("The browser blocked a cross-origin request to {}", .url.as_deref().unwrap_or("another origin"))]
    CorsBlocked { url: Option<String> },

    #[error("The request to {} timed out", .url.as_deref().unwrap_or("the server"))]
    RequestTimeout { url: Option<String> },

    #[error("The WebSocket connection to {} failed", .url.as_deref().unwrap_or("the server"))]
    WebSocketError { url: Option<String> },
}

impl NetworkError {
    pub fn offline() -> Self {
        Self::Offline
    }

    pub fn request_failed(url: Option<&str>) -> Self {
        Self::RequestFailed {
            url: url.map(str::to_string),
        }
    }

    pub fn cors_blocked(url: Option<&str>) -> Self {
        Self::CorsBlocked {
            url: url.map(str::to_string),
        }
    }

    pub fn request_timeout(url: Option<&str>) -> Self {
        Self::RequestTimeout {
            url: url.map(str::to_string),
        }
    }

    pub fn websocket_error(url: Option<&str>) -> Self {
        Self::WebSocketError {
            url: url.map(str::to_string),
        }
    }
}

impl Diagnose for NetworkError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::Offline => &network::OFFLINE,
            Self::RequestFailed { .. } => &network::REQUEST_FAILED,
            Self::CorsBlocked { .. } => &network::CORS_BLOCKED,
            Self::RequestTimeout { .. } => &network::REQUEST_TIMEOUT,
            Self::WebSocketError { .. } => &network::WEBSOCKET,
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        match self {
            Self::Offline => vec![Suggestion::new(
                "Check the network connection of the test machine",
                SuggestionAction::CheckNetwork,
            )],
            _ => vec![Suggestion::new(
                "Check the backend service the page calls",
                SuggestionAction::CheckServer,
            )],
        }
    }
}
