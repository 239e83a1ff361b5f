//! Navigation failures (VERO-6xx)
//!
//! HTTP status policy lives here rather than in the registry: client errors
//! other than 408 and 429 will not change on retry, so they are reported as
//! permanent even though the registry entry defaults to retryable.

use super::Diagnose;
use crate::diagnostic::{RetryPolicy, Suggestion, SuggestionAction};
use crate::registry::{codes::navigation, ErrorCodeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("'{url}' is not a valid address")]
    InvalidUrl { url: String },

    #[error("The host of '{url}' could not be found")]
    DnsNotResolved { url: String },

    #[error("The server at '{url}' refused the connection")]
    ConnectionRefused { url: String },

    #[error("The security certificate of '{url}' was rejected")]
    SslError { url: String },

    #[error("'{url}' answered with HTTP {status} {status_text}")]
    HttpError {
        url: String,
        status: u16,
        status_text: String,
    },

    #[error("'{url}' does not exist (HTTP 404)")]
    NotFound { url: String },

    #[error("The browser has no internet connection")]
    Offline,

    #[error("Navigation to '{url}' was interrupted before it finished")]
    Aborted { url: String },
}

impl NavigationError {
    pub fn invalid_url(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
        }
    }

    pub fn dns_not_resolved(url: &str) -> Self {
        Self::DnsNotResolved {
            url: url.to_string(),
        }
    }

    pub fn connection_refused(url: &str) -> Self {
        Self::ConnectionRefused {
            url: url.to_string(),
        }
    }

    pub fn ssl_error(url: &str) -> Self {
        Self::SslError {
            url: url.to_string(),
        }
    }

    /// HTTP error status; 404 becomes [`NavigationError::NotFound`]
    pub fn http_error(url: &str, status: u16, status_text: &str) -> Self {
        if status == 404 {
            return Self::not_found(url);
        }
        Self::HttpError {
            url: url.to_string(),
            status,
            status_text: status_text.trim().to_string(),
        }
    }

    pub fn not_found(url: &str) -> Self {
        Self::NotFound {
            url: url.to_string(),
        }
    }

    pub fn offline() -> Self {
        Self::Offline
    }

    pub fn aborted(url: &str) -> Self {
        Self::Aborted {
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidUrl { url }
            | Self::DnsNotResolved { url }
            | Self::ConnectionRefused { url }
            | Self::SslError { url }
            | Self::HttpError { url, .. }
            | Self::NotFound { url }
            | Self::Aborted { url } => Some(url),
            Self::Offline => None,
        }
    }
}

/// 4xx client errors are permanent, except request timeout and rate limiting
pub fn is_permanent_status(status: u16) -> bool {
    (400..500).contains(&status) && status != 408 && status != 429
}

impl Diagnose for NavigationError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::InvalidUrl { .. } => &navigation::INVALID_URL,
            Self::DnsNotResolved { .. } => &navigation::DNS_NOT_RESOLVED,
            Self::ConnectionRefused { .. } => &navigation::CONNECTION_REFUSED,
            Self::SslError { .. } => &navigation::SSL_ERROR,
            Self::HttpError { .. } => &navigation::HTTP_ERROR,
            Self::NotFound { .. } => &navigation::NOT_FOUND,
            Self::Offline => &navigation::OFFLINE,
            Self::Aborted { .. } => &navigation::ABORTED,
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::HttpError { status, .. } if is_permanent_status(*status) => RetryPolicy::PERMANENT,
            _ => RetryPolicy::from(self.definition()),
        }
    }

    fn how_to_fix(&self) -> String {
        match self {
            Self::HttpError { status, .. } if is_permanent_status(*status) => format!(
                "HTTP {} is a client error. Check the address, credentials and request the step makes.",
                status
            ),
            Self::HttpError { status, .. } if *status >= 500 => format!(
                "HTTP {} is a server error. Check the server logs; the page may work on a later attempt.",
                status
            ),
            _ => self.definition().how_to_fix.to_string(),
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        match self {
            Self::InvalidUrl { .. } | Self::NotFound { .. } => vec![Suggestion::new(
                "Check the address in the script",
                SuggestionAction::CheckUrl,
            )],
            Self::DnsNotResolved { .. } | Self::Offline => vec![Suggestion::new(
                "Check the network connection of the test machine",
                SuggestionAction::CheckNetwork,
            )],
            Self::ConnectionRefused { .. } | Self::HttpError { .. } => vec![Suggestion::new(
                "Make sure the application under test is running",
                SuggestionAction::CheckServer,
            )],
            Self::SslError { .. } => vec![Suggestion::new(
                "Fix or trust the site's certificate",
                SuggestionAction::CheckCertificate,
            )],
            Self::Aborted { .. } => vec![Suggestion::new(
                "Wait for the page to load before navigating again",
                SuggestionAction::AddWait,
            )],
        }
    }
}
