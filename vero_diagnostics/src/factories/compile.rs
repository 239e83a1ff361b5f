//! Compile-time failures (VERO-1xx to VERO-3xx)
//!
//! These never go through pattern matching: the lexer, parser and validator
//! already know what went wrong. They either construct the typed shapes
//! below or hand over a `(code, location, message)` tuple to
//! [`from_upstream`].

use super::{Diagnose, DiagnosticError};
use crate::diagnostic::{Diagnostic, DiagnosticContext, Location, Severity, Suggestion, SuggestionAction};
use crate::registry::{self, codes, ErrorCategory, ErrorCodeDefinition};

// ============================================================================
// LEXER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unexpected character '{character}'")]
    UnexpectedCharacter { character: char },

    #[error("Text value is missing its closing quote")]
    UnterminatedString,

    #[error("'{text}' is not a valid number")]
    InvalidNumber { text: String },

    #[error("'\\{sequence}' is not a valid escape sequence")]
    InvalidEscape { sequence: char },
}

impl LexerError {
    pub fn unexpected_character(character: char) -> Self {
        Self::UnexpectedCharacter { character }
    }

    pub fn unterminated_string() -> Self {
        Self::UnterminatedString
    }

    pub fn invalid_number(text: &str) -> Self {
        Self::InvalidNumber {
            text: text.to_string(),
        }
    }

    pub fn invalid_escape(sequence: char) -> Self {
        Self::InvalidEscape { sequence }
    }
}

impl Diagnose for LexerError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::UnexpectedCharacter { .. } => &codes::lexer::UNEXPECTED_CHARACTER,
            Self::UnterminatedString => &codes::lexer::UNTERMINATED_STRING,
            Self::InvalidNumber { .. } => &codes::lexer::INVALID_NUMBER,
            Self::InvalidEscape { .. } => &codes::lexer::INVALID_ESCAPE,
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        fix_syntax()
    }
}

// ============================================================================
// PARSER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("Expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    #[error("The {block} block is never closed")]
    UnclosedBlock { block: String },

    #[error("The script ended while expecting {expected}")]
    UnexpectedEnd { expected: String },

    #[error("'{text}' is not a valid statement")]
    InvalidStatement { text: String },
}

impl ParserError {
    pub fn unexpected_token(expected: &str, found: &str) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn unclosed_block(block: &str) -> Self {
        Self::UnclosedBlock {
            block: block.to_string(),
        }
    }

    pub fn unexpected_end(expected: &str) -> Self {
        Self::UnexpectedEnd {
            expected: expected.to_string(),
        }
    }

    pub fn invalid_statement(text: &str) -> Self {
        Self::InvalidStatement {
            text: text.trim().to_string(),
        }
    }
}

impl Diagnose for ParserError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::UnexpectedToken { .. } => &codes::parser::UNEXPECTED_TOKEN,
            Self::UnclosedBlock { .. } => &codes::parser::UNCLOSED_BLOCK,
            Self::UnexpectedEnd { .. } => &codes::parser::UNEXPECTED_END,
            Self::InvalidStatement { .. } => &codes::parser::INVALID_STATEMENT,
        }
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        fix_syntax()
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Page '{name}' is not defined")]
    UndefinedPage { name: String },

    #[error("Page '{page}' has no field named '{field}'")]
    UndefinedField { page: String, field: String },

    #[error("Variable '{name}' is used before it is defined")]
    UndefinedVariable { name: String },

    #[error("'{name}' is defined more than once")]
    DuplicateDefinition { name: String },

    #[error("Selector '{selector}' is invalid: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("'{name}' is defined but never used")]
    UnusedDefinition { name: String },
}

impl ValidationError {
    pub fn undefined_page(name: &str) -> Self {
        Self::UndefinedPage {
            name: name.to_string(),
        }
    }

    pub fn undefined_field(page: &str, field: &str) -> Self {
        Self::UndefinedField {
            page: page.to_string(),
            field: field.to_string(),
        }
    }

    pub fn undefined_variable(name: &str) -> Self {
        Self::UndefinedVariable {
            name: name.to_string(),
        }
    }

    pub fn duplicate_definition(name: &str) -> Self {
        Self::DuplicateDefinition {
            name: name.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unused_definition(name: &str) -> Self {
        Self::UnusedDefinition {
            name: name.to_string(),
        }
    }
}

impl Diagnose for ValidationError {
    fn definition(&self) -> &'static ErrorCodeDefinition {
        match self {
            Self::UndefinedPage { .. } => &codes::validation::UNDEFINED_PAGE,
            Self::UndefinedField { .. } => &codes::validation::UNDEFINED_FIELD,
            Self::UndefinedVariable { .. } => &codes::validation::UNDEFINED_VARIABLE,
            Self::DuplicateDefinition { .. } => &codes::validation::DUPLICATE_DEFINITION,
            Self::InvalidSelector { .. } => &codes::validation::INVALID_SELECTOR,
            Self::UnusedDefinition { .. } => &codes::validation::UNUSED_DEFINITION,
        }
    }

    fn severity(&self) -> Severity {
        severity_for(self.definition())
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        suggestions_for(self.definition())
    }
}

// ============================================================================
// UPSTREAM TUPLES
// ============================================================================

/// Build a diagnostic from an already-classified compile-time error.
///
/// The upstream message becomes `whatWentWrong`; an empty message falls
/// back to the registry description. Runtime codes are rejected: those
/// must come through the mapper.
pub fn from_upstream(
    code: &str,
    location: Option<Location>,
    message: &str,
    statement: &str,
) -> Result<Diagnostic, DiagnosticError> {
    let definition =
        registry::get_definition(code).ok_or_else(|| DiagnosticError::unknown_code(code))?;

    if !definition.category.is_compile_time() {
        return Err(DiagnosticError::not_compile_time(code, definition.category));
    }

    let what_went_wrong = match message.trim() {
        "" => definition.description.to_string(),
        text => text.to_string(),
    };

    Ok(
        Diagnostic::from_definition(definition, DiagnosticContext::new(statement, location))
            .with_what_went_wrong(what_went_wrong)
            .with_severity(severity_for(definition))
            .with_suggestions(suggestions_for(definition)),
    )
}

fn severity_for(definition: &ErrorCodeDefinition) -> Severity {
    if definition.code == codes::validation::UNUSED_DEFINITION.code {
        Severity::Warning
    } else {
        Severity::Error
    }
}

fn suggestions_for(definition: &ErrorCodeDefinition) -> Vec<Suggestion> {
    let code = definition.code;
    match definition.category {
        ErrorCategory::Lexer | ErrorCategory::Parser => fix_syntax(),
        ErrorCategory::Validation
            if code == codes::validation::DUPLICATE_DEFINITION.code
                || code == codes::validation::UNUSED_DEFINITION.code =>
        {
            vec![Suggestion::new(
                "Remove or rename the extra definition",
                SuggestionAction::RemoveDefinition,
            )]
        }
        ErrorCategory::Validation if code == codes::validation::INVALID_SELECTOR.code => {
            vec![Suggestion::new(
                "Fix the selector syntax",
                SuggestionAction::CheckSelector,
            )]
        }
        ErrorCategory::Validation => vec![Suggestion::new(
            "Define the name or fix its spelling",
            SuggestionAction::DefineName,
        )],
        _ => Vec::new(),
    }
}

fn fix_syntax() -> Vec<Suggestion> {
    vec![Suggestion::new(
        "Fix the syntax at the highlighted position",
        SuggestionAction::FixSyntax,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Flakiness;
    use assert_matches::assert_matches;

    #[test]
    fn test_compile_time_shapes_are_permanent() {
        let shapes: Vec<Box<dyn Diagnose>> = vec![
            Box::new(LexerError::unexpected_character('@')),
            Box::new(LexerError::unterminated_string()),
            Box::new(LexerError::invalid_number("1.2.3")),
            Box::new(LexerError::invalid_escape('q')),
            Box::new(ParserError::unexpected_token("a string", "}")),
            Box::new(ParserError::unclosed_block("scenario")),
            Box::new(ParserError::unexpected_end("a selector")),
            Box::new(ParserError::invalid_statement("jump around")),
            Box::new(ValidationError::undefined_page("LoginPage")),
            Box::new(ValidationError::undefined_field("LoginPage", "email")),
            Box::new(ValidationError::undefined_variable("user")),
            Box::new(ValidationError::duplicate_definition("LoginPage")),
            Box::new(ValidationError::invalid_selector("div[", "unclosed bracket")),
            Box::new(ValidationError::unused_definition("HomePage")),
        ];

        for shape in shapes {
            let diagnostic = shape.diagnose(DiagnosticContext::unresolved());
            assert!(diagnostic.category().is_compile_time(), "{}", diagnostic.code());
            assert_eq!(diagnostic.flakiness(), Flakiness::Permanent);
            assert!(!diagnostic.retryable());
            assert_eq!(diagnostic.suggested_retries(), 0);
        }
    }

    #[test]
    fn test_unused_definition_is_a_warning() {
        let diagnostic = ValidationError::unused_definition("HomePage")
            .diagnose(DiagnosticContext::unresolved());
        assert_eq!(diagnostic.severity(), Severity::Warning);
        assert_eq!(diagnostic.code().as_str(), "VERO-306");
    }

    #[test]
    fn test_lexer_display() {
        assert_eq!(
            LexerError::invalid_escape('q').to_string(),
            "'\\q' is not a valid escape sequence"
        );
    }

    #[test]
    fn test_from_upstream_uses_message_and_location() {
        let diagnostic = from_upstream(
            "vero_302",
            Some(Location::new(7, 12)),
            "Page 'Login' has no field named 'emial'",
            "fill Login.emial with \"a@b.c\"",
        )
        .unwrap();

        assert_eq!(diagnostic.code().as_str(), "VERO-302");
        assert_eq!(diagnostic.location(), Some(Location::new(7, 12)));
        assert_eq!(
            diagnostic.what_went_wrong(),
            "Page 'Login' has no field named 'emial'"
        );
        assert_eq!(
            diagnostic.suggestions()[0].action,
            SuggestionAction::DefineName
        );
    }

    #[test]
    fn test_from_upstream_empty_message_uses_description() {
        let diagnostic = from_upstream("VERO-102", None, "  ", "open \"/login").unwrap();
        assert_eq!(
            diagnostic.what_went_wrong(),
            codes::lexer::UNTERMINATED_STRING.description
        );
    }

    #[test]
    fn test_from_upstream_rejects_unknown_and_runtime_codes() {
        assert_matches!(
            from_upstream("VERO-199", None, "x", "y"),
            Err(DiagnosticError::UnknownCode { .. })
        );
        assert_matches!(
            from_upstream("VERO-401", None, "x", "y"),
            Err(DiagnosticError::NotCompileTime {
                category: ErrorCategory::Locator,
                ..
            })
        );
    }
}
