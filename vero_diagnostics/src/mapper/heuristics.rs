//! Keyword-based category guess
//!
//! Much cheaper than the pattern table and much less precise. Used only
//! where a full mapping is not needed, such as grouping raw log lines.

use crate::registry::ErrorCategory;

/// Buckets are checked in order; the first bucket with a hit wins
const BUCKETS: &[(ErrorCategory, &[&str])] = &[
    (
        ErrorCategory::Locator,
        &["strict mode", "locator", "selector", "element"],
    ),
    (ErrorCategory::Timeout, &["timeout", "timed out"]),
    (
        ErrorCategory::Navigation,
        &["net::err", "navigat", "goto", "url"],
    ),
    (
        ErrorCategory::Assertion,
        &["expect(", "expected", "received", "assert"],
    ),
    (
        ErrorCategory::Browser,
        &["browser", "crash", "target closed", "context"],
    ),
    (
        ErrorCategory::Network,
        &["network", "fetch", "cors", "websocket", "request"],
    ),
];

pub fn category_heuristic(message: &str) -> ErrorCategory {
    let lowered = message.to_lowercase();
    BUCKETS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(ErrorCategory::Script)
}
