//! Error categories and the code ranges that imply them
//!
//! | Range      | Category     | Tier         |
//! |------------|--------------|--------------|
//! | VERO-1xx   | Lexer        | compile-time |
//! | VERO-2xx   | Parser       | compile-time |
//! | VERO-3xx   | Validation   | compile-time |
//! | VERO-4xx   | Locator      | runtime      |
//! | VERO-5xx   | Timeout      | runtime      |
//! | VERO-6xx   | Navigation   | runtime      |
//! | VERO-7xx   | Assertion    | runtime      |
//! | VERO-8xx   | Browser      | runtime      |
//! | VERO-9xx   | Network      | runtime      |
//!
//! `Script` has no range of its own; it only labels the reserved fallback
//! code `VERO-499`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category corresponding to code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Lexer,
    Parser,
    Validation,
    Locator,
    Timeout,
    Navigation,
    Assertion,
    Browser,
    Network,
    Script,
}

impl ErrorCategory {
    /// All categories, in range order
    pub const ALL: [ErrorCategory; 10] = [
        Self::Lexer,
        Self::Parser,
        Self::Validation,
        Self::Locator,
        Self::Timeout,
        Self::Navigation,
        Self::Assertion,
        Self::Browser,
        Self::Network,
        Self::Script,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexer => "lexer",
            Self::Parser => "parser",
            Self::Validation => "validation",
            Self::Locator => "locator",
            Self::Timeout => "timeout",
            Self::Navigation => "navigation",
            Self::Assertion => "assertion",
            Self::Browser => "browser",
            Self::Network => "network",
            Self::Script => "script",
        }
    }

    /// Parse a category name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }

    /// Numeric code range owned by this category
    #[must_use]
    pub const fn code_range(&self) -> Option<(u16, u16)> {
        match self {
            Self::Lexer => Some((100, 199)),
            Self::Parser => Some((200, 299)),
            Self::Validation => Some((300, 399)),
            Self::Locator => Some((400, 499)),
            Self::Timeout => Some((500, 599)),
            Self::Navigation => Some((600, 699)),
            Self::Assertion => Some((700, 799)),
            Self::Browser => Some((800, 899)),
            Self::Network => Some((900, 999)),
            Self::Script => None,
        }
    }

    /// Category implied by the numeric part of a code.
    ///
    /// Accepts any spelling `normalize_code` accepts. The reserved fallback
    /// code maps to `Script`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = super::normalize_code(code);
        if normalized == super::FALLBACK_CODE.as_str() {
            return Some(Self::Script);
        }
        let num = code_number(&normalized)?;
        Self::from_number(num)
    }

    pub(crate) fn from_number(num: u16) -> Option<Self> {
        match num {
            100..=199 => Some(Self::Lexer),
            200..=299 => Some(Self::Parser),
            300..=399 => Some(Self::Validation),
            400..=499 => Some(Self::Locator),
            500..=599 => Some(Self::Timeout),
            600..=699 => Some(Self::Navigation),
            700..=799 => Some(Self::Assertion),
            800..=899 => Some(Self::Browser),
            900..=999 => Some(Self::Network),
            _ => None,
        }
    }

    /// Lexer, parser and validation errors: always permanent
    pub fn is_compile_time(&self) -> bool {
        matches!(self, Self::Lexer | Self::Parser | Self::Validation)
    }

    pub fn is_runtime(&self) -> bool {
        !self.is_compile_time()
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric part of an already-normalized `VERO-ddd` code
pub(crate) fn code_number(normalized: &str) -> Option<u16> {
    let digits = normalized.strip_prefix("VERO-")?;
    if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
