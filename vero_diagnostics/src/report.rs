//! # Diagnostic Report Collection
//!
//! Gathers diagnostics per script for a test-report writer and derives a
//! retry recommendation per script for the execution controller. The
//! collector is shared between workers, so all state sits behind a mutex.

use crate::config::compile_time::report::MAX_DIAGNOSTICS_PER_SCRIPT;
use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::{Code, ErrorCategory, Flakiness};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// What the execution controller should do with a failed script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RetryRecommendation {
    /// No diagnostics were recorded
    NotNeeded,
    /// At least one diagnostic is permanent; a retry cannot pass
    DoNotRetry { blocking_code: Code },
    Retry { attempts: u8 },
}

impl RetryRecommendation {
    /// Decide from a script's diagnostics
    pub fn for_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        if diagnostics.is_empty() {
            return RetryRecommendation::NotNeeded;
        }

        let blocking = diagnostics.iter().find(|d| {
            d.severity() == Severity::Error
                && (d.flakiness() == Flakiness::Permanent || !d.retryable())
        });
        if let Some(diagnostic) = blocking {
            return RetryRecommendation::DoNotRetry {
                blocking_code: diagnostic.code(),
            };
        }

        let attempts = diagnostics
            .iter()
            .map(Diagnostic::suggested_retries)
            .max()
            .unwrap_or(0);
        if attempts == 0 {
            RetryRecommendation::NotNeeded
        } else {
            RetryRecommendation::Retry { attempts }
        }
    }

    pub fn should_retry(&self) -> bool {
        matches!(self, RetryRecommendation::Retry { .. })
    }
}

#[derive(Debug, Default)]
struct ScriptEntry {
    diagnostics: Vec<Diagnostic>,
    dropped: usize,
}

/// Aggregate counts over every collected diagnostic
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub scripts: usize,
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Diagnostics discarded after a script hit its cap
    pub dropped: usize,
    pub by_category: BTreeMap<ErrorCategory, usize>,
    pub by_flakiness: BTreeMap<&'static str, usize>,
    pub retries: BTreeMap<String, RetryRecommendation>,
}

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    scripts: Mutex<BTreeMap<String, ScriptEntry>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one diagnostic; returns false once the script is at its cap
    pub fn record(&self, script: &str, diagnostic: Diagnostic) -> bool {
        let mut scripts = self.lock();
        let entry = scripts.entry(script.to_string()).or_default();

        if entry.diagnostics.len() >= MAX_DIAGNOSTICS_PER_SCRIPT {
            entry.dropped += 1;
            if entry.dropped == 1 {
                log_warning!("Diagnostic cap reached, further diagnostics dropped",
                    "script" => script,
                    "max" => MAX_DIAGNOSTICS_PER_SCRIPT
                );
            }
            return false;
        }

        entry.diagnostics.push(diagnostic);
        true
    }

    /// Record many; returns how many were kept
    pub fn record_all(
        &self,
        script: &str,
        diagnostics: impl IntoIterator<Item = Diagnostic>,
    ) -> usize {
        diagnostics
            .into_iter()
            .map(|d| self.record(script, d))
            .filter(|kept| *kept)
            .count()
    }

    pub fn diagnostics_for(&self, script: &str) -> Vec<Diagnostic> {
        self.lock()
            .get(script)
            .map(|entry| entry.diagnostics.clone())
            .unwrap_or_default()
    }

    /// Script names in sorted order
    pub fn scripts(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn total(&self) -> usize {
        self.lock().values().map(|e| e.diagnostics.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn retry_recommendation(&self, script: &str) -> RetryRecommendation {
        self.lock()
            .get(script)
            .map(|entry| RetryRecommendation::for_diagnostics(&entry.diagnostics))
            .unwrap_or(RetryRecommendation::NotNeeded)
    }

    pub fn summary(&self) -> ReportSummary {
        let scripts = self.lock();

        let mut summary = ReportSummary {
            generated_at: Utc::now(),
            scripts: scripts.len(),
            total: 0,
            errors: 0,
            warnings: 0,
            dropped: 0,
            by_category: BTreeMap::new(),
            by_flakiness: BTreeMap::new(),
            retries: BTreeMap::new(),
        };

        for (name, entry) in scripts.iter() {
            summary.dropped += entry.dropped;
            for diagnostic in &entry.diagnostics {
                summary.total += 1;
                match diagnostic.severity() {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Info => {}
                }
                *summary.by_category.entry(diagnostic.category()).or_default() += 1;
                *summary
                    .by_flakiness
                    .entry(diagnostic.flakiness().as_str())
                    .or_default() += 1;
            }
            summary.retries.insert(
                name.clone(),
                RetryRecommendation::for_diagnostics(&entry.diagnostics),
            );
        }

        summary
    }

    /// Cargo-style listing of every diagnostic, grouped by script
    pub fn render_text(&self) -> String {
        let scripts = self.lock();
        let mut out = String::new();

        for (name, entry) in scripts.iter() {
            if entry.diagnostics.is_empty() {
                continue;
            }
            out.push_str(&format!("==> {}\n", name));
            for diagnostic in &entry.diagnostics {
                out.push_str(&diagnostic.format_detailed());
                out.push('\n');
            }
            if entry.dropped > 0 {
                out.push_str(&format!("... {} more diagnostics not shown\n", entry.dropped));
            }
        }

        let total: usize = scripts.values().map(|e| e.diagnostics.len()).sum();
        out.push_str(&format!(
            "{} diagnostic{} across {} script{}\n",
            total,
            if total == 1 { "" } else { "s" },
            scripts.len(),
            if scripts.len() == 1 { "" } else { "s" },
        ));
        out
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, ScriptEntry>> {
        // Entries are plain values; a panic mid-record cannot leave them torn
        self.scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
