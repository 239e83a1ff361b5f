//! Error code registry
//!
//! Single source of truth for every `VERO-ddd` code: its category, human
//! text and default retry policy. Definitions are declared once in
//! [`codes`] and listed in declaration order in [`codes::REGISTRY`];
//! lookups go through a lazily-built index.

pub mod category;
pub mod codes;

pub use category::ErrorCategory;

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Diagnostic code wrapper (`VERO-ddd`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// Reserved code for runtime errors no pattern recognizes.
///
/// Deliberately absent from the registry: it sits in the locator range
/// numerically but is labelled [`ErrorCategory::Script`].
pub const FALLBACK_CODE: Code = Code::new("VERO-499");

// ============================================================================
// DEFINITION TYPES
// ============================================================================

/// Whether a failure is expected to go away on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flakiness {
    /// Deterministic; retrying will not help
    Permanent,
    /// Transient; a retry may pass
    Flaky,
    Unknown,
}

impl Flakiness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flakiness::Permanent => "permanent",
            Flakiness::Flaky => "flaky",
            Flakiness::Unknown => "unknown",
        }
    }
}

/// A complete error code definition
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCodeDefinition {
    pub code: Code,
    pub category: ErrorCategory,
    /// Short title for list views
    pub title: &'static str,
    /// Generic explanation of what went wrong
    pub description: &'static str,
    /// Generic remediation
    pub how_to_fix: &'static str,
    pub flakiness: Flakiness,
    pub retryable: bool,
    /// Suggested retry budget when `retryable`
    pub default_retries: u8,
}

impl ErrorCodeDefinition {
    /// Format the definition as a help page
    #[must_use]
    pub fn format_plain(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}: {}\n\n", self.code, self.title));
        output.push_str(self.description);
        output.push_str("\n\n");
        output.push_str(&format!("Category:   {}\n", self.category));
        output.push_str(&format!("Flakiness:  {}\n", self.flakiness.as_str()));
        if self.retryable {
            output.push_str(&format!(
                "Retryable:  yes (suggested retries: {})\n",
                self.default_retries
            ));
        } else {
            output.push_str("Retryable:  no\n");
        }
        output.push_str(&format!("\nHow to fix:\n  {}\n", self.how_to_fix));
        output
    }
}

// ============================================================================
// REGISTRY ERRORS
// ============================================================================

/// Consistency violations in the code catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Malformed error code '{code}': expected VERO-ddd")]
    MalformedCode { code: String },

    #[error("Duplicate error code '{code}'")]
    DuplicateCode { code: String },

    #[error("Error code '{code}' is declared as {declared} but its range implies {implied}")]
    CategoryMismatch {
        code: String,
        declared: ErrorCategory,
        implied: ErrorCategory,
    },

    #[error("Error code '{code}' uses the reserved fallback code")]
    ReservedCode { code: String },

    #[error("Error code '{code}' has an inconsistent retry policy: {reason}")]
    InconsistentRetryPolicy { code: String, reason: &'static str },
}

// ============================================================================
// LOOKUP
// ============================================================================

static REGISTRY_INDEX: OnceLock<HashMap<&'static str, &'static ErrorCodeDefinition>> =
    OnceLock::new();

fn registry_index() -> &'static HashMap<&'static str, &'static ErrorCodeDefinition> {
    REGISTRY_INDEX.get_or_init(|| {
        let mut index = HashMap::with_capacity(codes::REGISTRY.len());
        for &definition in codes::REGISTRY {
            // First declaration wins; duplicates are reported by validate_registry
            index.entry(definition.code.as_str()).or_insert(definition);
        }
        index
    })
}

/// Normalize a code for lookup: trim, uppercase, `_` becomes `-`
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase().replace('_', "-")
}

/// Get the definition for a code, case- and separator-insensitively
pub fn get_definition(code: &str) -> Option<&'static ErrorCodeDefinition> {
    registry_index().get(normalize_code(code).as_str()).copied()
}

/// True when the code names a registry entry
pub fn is_valid_code(code: &str) -> bool {
    get_definition(code).is_some()
}

/// All entries of a category, in declaration order
pub fn codes_for_category(category: ErrorCategory) -> Vec<&'static ErrorCodeDefinition> {
    codes::REGISTRY
        .iter()
        .copied()
        .filter(|definition| definition.category == category)
        .collect()
}

/// Every registry entry, in declaration order
pub fn all_definitions() -> &'static [&'static ErrorCodeDefinition] {
    codes::REGISTRY
}

/// Get category for a code, falling back to the numeric range
pub fn get_category(code: &str) -> Option<ErrorCategory> {
    get_definition(code)
        .map(|definition| definition.category)
        .or_else(|| ErrorCategory::from_code(code))
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate the built-in catalog
pub fn validate_registry() -> Result<(), RegistryError> {
    validate_definitions(codes::REGISTRY)
}

/// Check a set of definitions for format, uniqueness, range and policy violations
pub fn validate_definitions(definitions: &[&ErrorCodeDefinition]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();

    for definition in definitions {
        let code = definition.code.as_str();

        if code == FALLBACK_CODE.as_str() {
            return Err(RegistryError::ReservedCode {
                code: code.to_string(),
            });
        }

        let number = category::code_number(code).ok_or_else(|| RegistryError::MalformedCode {
            code: code.to_string(),
        })?;

        if !seen.insert(code) {
            return Err(RegistryError::DuplicateCode {
                code: code.to_string(),
            });
        }

        let implied = ErrorCategory::from_number(number).ok_or_else(|| {
            RegistryError::MalformedCode {
                code: code.to_string(),
            }
        })?;
        if implied != definition.category {
            return Err(RegistryError::CategoryMismatch {
                code: code.to_string(),
                declared: definition.category,
                implied,
            });
        }

        if !definition.retryable && definition.default_retries != 0 {
            return Err(RegistryError::InconsistentRetryPolicy {
                code: code.to_string(),
                reason: "non-retryable entries must suggest zero retries",
            });
        }

        if definition.retryable && definition.default_retries == 0 {
            return Err(RegistryError::InconsistentRetryPolicy {
                code: code.to_string(),
                reason: "retryable entries must suggest at least one retry",
            });
        }

        if definition.category.is_compile_time()
            && (definition.retryable || definition.flakiness != Flakiness::Permanent)
        {
            return Err(RegistryError::InconsistentRetryPolicy {
                code: code.to_string(),
                reason: "compile-time errors are permanent and never retryable",
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        assert_eq!(validate_registry(), Ok(()));
    }

    #[test]
    fn test_lookup_is_case_and_separator_insensitive() {
        let canonical = get_definition("VERO-401").unwrap();
        for spelling in ["vero_401", "Vero-401", " VERO_401 ", "vero-401"] {
            let found = get_definition(spelling).unwrap();
            assert!(std::ptr::eq(canonical, found), "{spelling}");
        }
    }

    #[test]
    fn test_every_code_round_trips_through_normalization() {
        for definition in all_definitions() {
            let code = definition.code.as_str();
            let mangled = code.to_lowercase().replacen('-', "_", 1);
            let a = get_definition(code).unwrap();
            let b = get_definition(&mangled).unwrap();
            assert!(std::ptr::eq(a, b), "{code}");
        }
    }

    #[test]
    fn test_code_range_matches_declared_category() {
        for definition in all_definitions() {
            assert_eq!(
                ErrorCategory::from_code(definition.code.as_str()),
                Some(definition.category),
                "{}",
                definition.code
            );
        }
    }

    #[test]
    fn test_fallback_code_is_not_registered() {
        assert!(!is_valid_code("VERO-499"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("VERO-000"));
        assert_eq!(get_category("VERO-499"), Some(ErrorCategory::Script));
    }

    #[test]
    fn test_codes_for_category_preserves_declaration_order() {
        let locator: Vec<&str> = codes_for_category(ErrorCategory::Locator)
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(
            locator,
            vec![
                "VERO-401", "VERO-402", "VERO-403", "VERO-404", "VERO-405", "VERO-406",
                "VERO-407", "VERO-408"
            ]
        );
        assert!(codes_for_category(ErrorCategory::Script).is_empty());
        for category in ErrorCategory::ALL {
            if category != ErrorCategory::Script {
                assert!(!codes_for_category(category).is_empty(), "{category}");
            }
        }
    }

    #[test]
    fn test_validation_rejects_duplicates() {
        let defs = [&codes::locator::NOT_FOUND, &codes::locator::NOT_FOUND];
        assert_eq!(
            validate_definitions(&defs),
            Err(RegistryError::DuplicateCode {
                code: "VERO-401".to_string()
            })
        );
    }

    #[test]
    fn test_validation_rejects_range_mismatch() {
        let wrong = ErrorCodeDefinition {
            category: ErrorCategory::Network,
            ..codes::locator::NOT_FOUND.clone()
        };
        let result = validate_definitions(&[&wrong]);
        assert!(matches!(
            result,
            Err(RegistryError::CategoryMismatch {
                declared: ErrorCategory::Network,
                implied: ErrorCategory::Locator,
                ..
            })
        ));
    }

    #[test]
    fn test_validation_rejects_malformed_and_reserved_codes() {
        let malformed = ErrorCodeDefinition {
            code: Code::new("VERO-41"),
            ..codes::locator::NOT_FOUND.clone()
        };
        assert!(matches!(
            validate_definitions(&[&malformed]),
            Err(RegistryError::MalformedCode { .. })
        ));

        let reserved = ErrorCodeDefinition {
            code: FALLBACK_CODE,
            ..codes::locator::NOT_FOUND.clone()
        };
        assert!(matches!(
            validate_definitions(&[&reserved]),
            Err(RegistryError::ReservedCode { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_retryable_compile_errors() {
        let retryable_lexer = ErrorCodeDefinition {
            retryable: true,
            default_retries: 1,
            ..codes::lexer::UNEXPECTED_CHARACTER.clone()
        };
        assert!(matches!(
            validate_definitions(&[&retryable_lexer]),
            Err(RegistryError::InconsistentRetryPolicy { .. })
        ));
    }

    #[test]
    fn test_format_plain() {
        let page = codes::locator::DISABLED.format_plain();
        assert!(page.starts_with("VERO-404: Element is disabled"));
        assert!(page.contains("Retryable:  no"));
        assert!(page.contains("How to fix:"));
    }

    #[test]
    fn test_definition_serializes_code_as_string() {
        let json = serde_json::to_value(&codes::network::CORS_BLOCKED).unwrap();
        assert_eq!(json["code"], "VERO-903");
        assert_eq!(json["category"], "network");
        assert_eq!(json["flakiness"], "permanent");
        assert_eq!(json["defaultRetries"], 0);
    }
}
