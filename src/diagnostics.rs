//! Deduplicated, severity-gated reporting for best-effort computations.
//!
//! Batch operations re-run on every edit, so the same bad curve would
//! otherwise warn on every keystroke. A report is keyed by `(tag, subject)`
//! and accepted at most once per [`Diagnostics`] instance.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, error, info, warn};

/// Report severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// An accepted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category, e.g. `"inverse"`.
    pub tag: &'static str,
    /// What the report is about, usually a curve expression.
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.severity, self.tag, self.message, self.subject)
    }
}

/// Collects diagnostics for one document.
#[derive(Debug)]
pub struct Diagnostics {
    min_severity: Severity,
    seen: HashSet<(&'static str, String)>,
    records: Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Severity::Warning)
    }
}

impl Diagnostics {
    /// Creates a channel that drops reports below `min_severity`.
    #[must_use]
    pub fn new(min_severity: Severity) -> Self {
        Self {
            min_severity,
            seen: HashSet::new(),
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Files a report. Returns `true` if it was accepted, `false` if it was
    /// below the severity gate or a duplicate of an earlier `(tag, subject)`.
    pub fn report(
        &mut self,
        severity: Severity,
        tag: &'static str,
        subject: &str,
        message: impl fmt::Display,
    ) -> bool {
        if severity < self.min_severity {
            return false;
        }
        if !self.seen.insert((tag, subject.to_string())) {
            return false;
        }

        let message = message.to_string();
        match severity {
            Severity::Debug => debug!(tag, subject, "{message}"),
            Severity::Info => info!(tag, subject, "{message}"),
            Severity::Warning => warn!(tag, subject, "{message}"),
            Severity::Error => error!(tag, subject, "{message}"),
        }
        self.records.push(Diagnostic {
            severity,
            tag,
            subject: subject.to_string(),
            message,
        });
        true
    }

    /// Shorthand for a [`Severity::Warning`] report.
    pub fn warn(&mut self, tag: &'static str, subject: &str, message: impl fmt::Display) -> bool {
        self.report(Severity::Warning, tag, subject, message)
    }

    /// Accepted reports, oldest first.
    #[must_use]
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Forgets everything, so previously seen reports can fire again.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.records.clear();
    }
}
