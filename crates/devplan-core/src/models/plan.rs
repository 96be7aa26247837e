//! Plan hierarchy: phases own tasks, tasks own subtasks.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{OrderedMap, SubtaskStatus, TechStack, ValidationIssue};

static TASK_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("valid regex"));
static SUBTASK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid regex"));

/// Marker every subtask title is expected to carry.
pub const SINGLE_SESSION: &str = "(Single Session)";

/// Recommended bounds on subtask deliverables.
pub const MIN_DELIVERABLES: usize = 3;
pub const MAX_DELIVERABLES: usize = 7;

/// Whether `id` has the `X.Y` task form.
pub fn is_task_id(id: &str) -> bool {
    TASK_ID.is_match(id)
}

/// Whether `id` has the `X.Y.Z` subtask form.
pub fn is_subtask_id(id: &str) -> bool {
    SUBTASK_ID.is_match(id)
}

/// Smallest unit of work, sized for a single working session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Subtask {
    /// Dotted id, `X.Y.Z`
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub deliverables: Vec<String>,
    /// Ids of subtasks that must be completed first
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub files_to_create: Vec<String>,
    #[serde(default)]
    pub files_to_modify: Vec<String>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
    #[serde(default)]
    pub technology_decisions: Vec<String>,
    #[serde(default)]
    pub status: SubtaskStatus,
    #[serde(default)]
    pub completion_notes: OrderedMap<String>,
}

impl Subtask {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SubtaskStatus::Completed
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !is_subtask_id(&self.id) {
            issues.push(ValidationIssue::error(format!(
                "Subtask ID '{}' must be in format X.Y.Z",
                self.id
            )));
        }

        if !self.title.contains(SINGLE_SESSION) {
            issues.push(ValidationIssue::warning(format!(
                "Subtask title should include '{SINGLE_SESSION}' suffix"
            )));
        }

        let count = self.deliverables.len();
        if count < MIN_DELIVERABLES {
            issues.push(ValidationIssue::warning(format!(
                "Subtask has {count} deliverables, recommended minimum is {MIN_DELIVERABLES}"
            )));
        } else if count > MAX_DELIVERABLES {
            issues.push(ValidationIssue::warning(format!(
                "Subtask has {count} deliverables, recommended maximum is {MAX_DELIVERABLES}"
            )));
        }

        issues
    }
}

/// A group of subtasks, identified as `X.Y`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !is_task_id(&self.id) {
            issues.push(ValidationIssue::error(format!(
                "Task ID '{}' must be in format X.Y",
                self.id
            )));
        }

        if self.subtasks.is_empty() {
            issues.push(ValidationIssue::error(format!(
                "Task '{}' must have at least one subtask",
                self.id
            )));
        }

        for subtask in &self.subtasks {
            let owner = format!("Subtask {}", subtask.id);
            issues.extend(subtask.validate().into_iter().map(|i| i.within(&owner)));
        }

        issues
    }
}

/// A major milestone. Phase `"0"` is always the Foundation phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Phase {
    /// Non-negative integer in string form
    pub id: String,
    pub title: String,
    pub goal: String,
    #[serde(default)]
    pub days: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Phase {
    pub fn new(id: impl Into<String>, title: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.id.is_empty() || !self.id.chars().all(|c| c.is_ascii_digit()) {
            issues.push(ValidationIssue::error(format!(
                "Phase ID '{}' must be a number",
                self.id
            )));
        }

        if self.id == "0" && !self.title.contains("Foundation") {
            issues.push(ValidationIssue::warning(format!(
                "Phase 0 should be titled 'Foundation', got '{}'",
                self.title
            )));
        }

        if self.tasks.is_empty() {
            issues.push(ValidationIssue::error(format!(
                "Phase '{}' must have at least one task",
                self.id
            )));
        }

        for task in &self.tasks {
            let owner = format!("Task {}", task.id);
            issues.extend(task.validate().into_iter().map(|i| i.within(&owner)));
        }

        issues
    }
}

/// A complete development plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Plan {
    pub project_name: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<TechStack>,
}

impl Plan {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Every subtask in document order.
    pub fn subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.phases
            .iter()
            .flat_map(|p| p.tasks.iter())
            .flat_map(|t| t.subtasks.iter())
    }

    /// Ids of every subtask in the plan, in document order.
    pub fn subtask_ids(&self) -> Vec<&str> {
        self.subtasks().map(|s| s.id.as_str()).collect()
    }

    /// `(completed, total)` subtask counts.
    pub fn progress(&self) -> (usize, usize) {
        self.subtasks().fold((0, 0), |(done, total), s| {
            (done + usize::from(s.is_completed()), total + 1)
        })
    }

    /// Structural checks over the whole hierarchy.
    ///
    /// Cross-entity prerequisite checks live in [`crate::plan::validate_plan`].
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.project_name.trim().is_empty() {
            issues.push(ValidationIssue::error(
                "project_name is required and cannot be empty",
            ));
        }

        if self.phases.is_empty() {
            issues.push(ValidationIssue::error("Plan must have at least one phase"));
        }

        if let Some(stack) = &self.tech_stack {
            issues.extend(
                stack
                    .validate()
                    .into_iter()
                    .map(|m| ValidationIssue::error(m).within("Tech stack")),
            );
        }

        for phase in &self.phases {
            let owner = format!("Phase {}", phase.id);
            issues.extend(phase.validate().into_iter().map(|i| i.within(&owner)));
        }

        issues
    }
}
