//! Diagnostics core for the Vero test DSL: the error code catalog, the
//! diagnostic value type, runtime error mapping and editor/report output.

#[macro_use]
pub mod logging;
pub mod config;
pub mod diagnostic;
pub mod editor;
pub mod error;
pub mod factories;
pub mod mapper;
pub mod registry;
pub mod report;
pub mod source_map;

// Re-export key types for library consumers
pub use diagnostic::{Diagnostic, DiagnosticContext, Location, Severity, Suggestion};
pub use editor::{to_editor_marker, to_editor_markers, EditorMarker, MarkerSeverity};
pub use error::VeroError;
pub use factories::{Diagnose, RuntimeSymptom};
pub use mapper::{map_error_with, RawError, RuntimeErrorMapper};
pub use registry::{Code, ErrorCategory, ErrorCodeDefinition, Flakiness, FALLBACK_CODE};
pub use report::{DiagnosticCollector, ReportSummary, RetryRecommendation};
pub use source_map::{SourceMap, SourceMapEntry};
