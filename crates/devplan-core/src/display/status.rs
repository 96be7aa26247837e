//! One-line outcome messages for commands.

use std::fmt;
use std::path::Path;

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Finished, but something deserves attention
    Warning,
    Failure,
}

/// A single outcome line such as `Success: Wrote CLAUDE.md`.
pub struct OperationStatus {
    pub message: String,
    pub outcome: Outcome,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Warning,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Failure,
        }
    }

    /// Confirmation that a generated document was written to `path`.
    pub fn written(path: &Path) -> Self {
        Self::success(format!("Wrote {}", path.display()))
    }

    pub fn is_success(&self) -> bool {
        self.outcome != Outcome::Failure
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.outcome {
            Outcome::Success => "Success:",
            Outcome::Warning => "Warning:",
            Outcome::Failure => "Error:",
        };
        writeln!(f, "{prefix} {}", self.message)
    }
}
