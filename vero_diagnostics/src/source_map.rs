//! Generated-line to DSL-line correlation
//!
//! Built once per compiled script by the code generator and never mutated
//! afterwards; a recompilation produces a new map.

use crate::config::compile_time::source_map::MAX_ENTRIES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SourceMapError {
    #[error("Source map has {count} entries, limit is {max}")]
    TooManyEntries { count: usize, max: usize },

    #[error("Invalid source map JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read source map '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One instrumentation point emitted by the code generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapEntry {
    pub generated_line: u32,
    pub source_line: u32,
    pub source_statement: String,
}

impl SourceMapEntry {
    pub fn new(generated_line: u32, source_line: u32, source_statement: impl Into<String>) -> Self {
        Self {
            generated_line,
            source_line,
            source_statement: source_statement.into(),
        }
    }
}

/// Result of a source map lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocation<'a> {
    pub line: u32,
    pub statement: &'a str,
}

/// Read-only table sorted by generated line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    entries: Vec<SourceMapEntry>,
}

impl SourceMap {
    /// Build a map from generator output in any order.
    ///
    /// Entries are stable-sorted by generated line, so on equal generated
    /// lines the first declared entry is the one lookups return.
    pub fn new(mut entries: Vec<SourceMapEntry>) -> Result<Self, SourceMapError> {
        if entries.len() > MAX_ENTRIES {
            return Err(SourceMapError::TooManyEntries {
                count: entries.len(),
                max: MAX_ENTRIES,
            });
        }

        entries.sort_by_key(|entry| entry.generated_line);
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON array of `{generatedLine, sourceLine, sourceStatement}`
    pub fn from_json(json: &str) -> Result<Self, SourceMapError> {
        let entries: Vec<SourceMapEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn load(path: &Path) -> Result<Self, SourceMapError> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn entries(&self) -> &[SourceMapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest preceding instrumentation point for a generated line
    pub fn resolve(&self, generated_line: u32) -> Option<ResolvedLocation<'_>> {
        let after = self
            .entries
            .partition_point(|entry| entry.generated_line <= generated_line);
        let nearest = self.entries.get(after.checked_sub(1)?)?.generated_line;

        // First declared among entries sharing that generated line
        let first = self
            .entries
            .partition_point(|entry| entry.generated_line < nearest);
        let entry = &self.entries[first];

        Some(ResolvedLocation {
            line: entry.source_line,
            statement: &entry.source_statement,
        })
    }
}
