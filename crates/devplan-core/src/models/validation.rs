//! Validation findings produced by plan and agent checks.

use serde::{Deserialize, Serialize};

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Recommended practice not followed; fatal only in strict mode
    Warning,
    /// Structural problem
    Error,
}

/// A single human-readable, field-qualified validation finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Prefix the message with the owning entity, e.g. `Task 1.2: `.
    pub fn within(mut self, owner: &str) -> Self {
        self.message = format!("{owner}: {}", self.message);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Ordered collection of findings. Building one never fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether the report is acceptable. Strict mode treats warnings as
    /// errors.
    pub fn passes(&self, strict: bool) -> bool {
        if strict {
            self.issues.is_empty()
        } else {
            self.error_count() == 0
        }
    }

    /// Flat list of messages in report order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }
}

/// Machine-readable verdict on a report, as returned in JSON responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationSummary<'a> {
    pub valid: bool,
    pub strict: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: &'a [ValidationIssue],
}

impl ValidationReport {
    pub fn summary(&self, strict: bool) -> ValidationSummary<'_> {
        ValidationSummary {
            valid: self.passes(strict),
            strict,
            error_count: self.error_count(),
            warning_count: self.warning_count(),
            issues: &self.issues,
        }
    }
}
