//! Diagnostic to editor marker conversion
//!
//! Stateless. A diagnostic without a location lands on line 1, column 1.

use crate::diagnostic::{Diagnostic, Severity};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerSeverity {
    Error,
    Warning,
    Info,
}

impl From<Severity> for MarkerSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => MarkerSeverity::Error,
            Severity::Warning => MarkerSeverity::Warning,
            Severity::Info => MarkerSeverity::Info,
        }
    }
}

/// Squiggle range with a message, 1-based and end-exclusive on columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorMarker {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub severity: MarkerSeverity,
    pub message: String,
    pub code: String,
}

pub fn to_editor_marker(diagnostic: &Diagnostic) -> EditorMarker {
    let (line, column) = diagnostic
        .location()
        .map(|location| (location.line.max(1), location.column.unwrap_or(1).max(1)))
        .unwrap_or((1, 1));

    let span = if diagnostic.location().is_some() {
        diagnostic.vero_statement().chars().count() as u32
    } else {
        0
    };

    EditorMarker {
        start_line: line,
        start_column: column,
        end_line: line,
        end_column: column.saturating_add(span.max(1)),
        severity: diagnostic.severity().into(),
        message: format!("{}: {}", diagnostic.title(), diagnostic.what_went_wrong()),
        code: diagnostic.code().to_string(),
    }
}

pub fn to_editor_markers<'a>(
    diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
) -> Vec<EditorMarker> {
    diagnostics.into_iter().map(to_editor_marker).collect()
}
