//! Raw runtime errors as handed over by the execution engine

use super::MapperError;
use crate::config::compile_time::mapper::{MAX_BATCH_ERRORS, MAX_STACK_BYTES};
use serde::Deserialize;

/// Free-text error from the engine: a message and an optional stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawError {
    pub message: String,
    pub stack: Option<String>,
}

/// Accepted JSON shapes: `"text"` or `{"message": "...", "stack": "..."}`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawErrorRepr {
    Text(String),
    Object {
        message: String,
        #[serde(default)]
        stack: Option<String>,
    },
}

impl From<RawErrorRepr> for RawError {
    fn from(repr: RawErrorRepr) -> Self {
        match repr {
            RawErrorRepr::Text(message) => Self::new(message),
            RawErrorRepr::Object { message, stack } => Self { message, stack },
        }
    }
}

impl RawError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: Some(stack.into()),
        }
    }

    /// Parse one error; anything but a string or message object is a caller bug
    pub fn from_json(json: &str) -> Result<Self, MapperError> {
        let repr: RawErrorRepr = serde_json::from_str(json).map_err(|e| {
            MapperError::malformed_input(&format!(
                "expected a string or an object with a \"message\" field: {}",
                e
            ))
        })?;
        Ok(repr.into())
    }

    /// Parse a JSON array of errors
    pub fn batch_from_json(json: &str) -> Result<Vec<Self>, MapperError> {
        let reprs: Vec<RawErrorRepr> = serde_json::from_str(json).map_err(|e| {
            MapperError::malformed_input(&format!(
                "expected an array of strings or message objects: {}",
                e
            ))
        })?;

        if reprs.len() > MAX_BATCH_ERRORS {
            return Err(MapperError::TooManyErrors {
                count: reprs.len(),
                max: MAX_BATCH_ERRORS,
            });
        }

        Ok(reprs.into_iter().map(RawError::from).collect())
    }

    /// Message and stack joined the way patterns see them.
    ///
    /// The stack is cut to `MAX_STACK_BYTES`; the message is never cut.
    pub fn full_text(&self) -> String {
        let stack = self
            .stack
            .as_deref()
            .map(|stack| truncate_at_char_boundary(stack, MAX_STACK_BYTES))
            .unwrap_or_default();
        format!("{}\n{}", self.message, stack)
    }
}

fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl From<&str> for RawError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for RawError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl<M: Into<String>, S: Into<String>> From<(M, S)> for RawError {
    fn from((message, stack): (M, S)) -> Self {
        Self::with_stack(message, stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_json_accepts_string_and_object() {
        assert_eq!(RawError::from_json(r#""banana""#).unwrap(), RawError::new("banana"));
        assert_eq!(
            RawError::from_json(r#"{"message": "boom", "stack": "at x:1:2"}"#).unwrap(),
            RawError::with_stack("boom", "at x:1:2")
        );
        assert_eq!(
            RawError::from_json(r#"{"message": "boom"}"#).unwrap().stack,
            None
        );
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        for input in ["null", "42", r#"{"stack": "only"}"#, "not json"] {
            assert_matches!(
                RawError::from_json(input),
                Err(MapperError::MalformedInput { .. }),
                "{input}"
            );
        }
    }

    #[test]
    fn test_batch_from_json() {
        let batch = RawError::batch_from_json(r#"["a", {"message": "b", "stack": "s"}]"#).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].stack.as_deref(), Some("s"));

        assert_matches!(
            RawError::batch_from_json(r#""a""#),
            Err(MapperError::MalformedInput { .. })
        );
    }

    #[test]
    fn test_full_text_joins_message_and_stack() {
        assert_eq!(RawError::from(("m", "s")).full_text(), "m\ns");
        assert_eq!(RawError::from("m").full_text(), "m\n");
    }

    #[test]
    fn test_full_text_caps_stack_only() {
        let message = "m".repeat(MAX_STACK_BYTES + 10);
        let raw = RawError::with_stack(message.clone(), "s".repeat(MAX_STACK_BYTES + 10));
        assert_eq!(raw.full_text().len(), message.len() + 1 + MAX_STACK_BYTES);
        assert!(raw.full_text().starts_with(&message));
    }

    #[test]
    fn test_truncate_at_char_boundary() {
        assert_eq!(truncate_at_char_boundary("héllo", 2), "h");
        assert_eq!(truncate_at_char_boundary("héllo", 3), "hé");
        assert_eq!(truncate_at_char_boundary("abc", 10), "abc");
    }
}
