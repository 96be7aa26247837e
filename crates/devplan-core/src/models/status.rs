//! Status enumeration for subtasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of subtask statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum SubtaskStatus {
    /// Subtask has not been started
    #[default]
    Pending,

    /// Subtask is being worked on
    InProgress,

    /// Subtask has been completed
    Completed,

    /// Subtask cannot proceed
    Blocked,
}

impl SubtaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [SubtaskStatus; 4] = [
        SubtaskStatus::Pending,
        SubtaskStatus::InProgress,
        SubtaskStatus::Completed,
        SubtaskStatus::Blocked,
    ];

    /// Wire and markdown representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SubtaskStatus::Pending => "pending",
            SubtaskStatus::InProgress => "in_progress",
            SubtaskStatus::Completed => "completed",
            SubtaskStatus::Blocked => "blocked",
        }
    }

    /// Comma-separated list of accepted values, for error messages.
    pub fn expected() -> String {
        Self::ALL
            .iter()
            .map(SubtaskStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for SubtaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(SubtaskStatus::Pending),
            "in_progress" => Ok(SubtaskStatus::InProgress),
            "completed" => Ok(SubtaskStatus::Completed),
            "blocked" => Ok(SubtaskStatus::Blocked),
            _ => Err(format!(
                "Status '{}' is invalid. Must be one of: {}",
                s.trim(),
                Self::expected()
            )),
        }
    }
}
