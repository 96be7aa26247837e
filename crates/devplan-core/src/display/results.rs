//! Result wrapper types for lookup and progress operations.

use std::fmt;

use jiff::Timestamp;

use super::datetime::LocalDateTime;
use super::status::OperationStatus;
use crate::models::Plan;
use crate::plan::SubtaskView;

impl fmt::Display for SubtaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**Phase {}**: {}", self.phase_id, self.phase_title)?;
        writeln!(f, "**Task {}**: {}", self.task_id, self.task_title)?;
        writeln!(f, "**Branch**: `{}`", self.branch)?;
        writeln!(f)?;
        write!(f, "{}", self.subtask)
    }
}

/// Outcome of marking a subtask complete.
///
/// Displays as the full updated `DEVELOPMENT_PLAN.md`, ready to be written
/// back over the original.
#[derive(Debug)]
pub struct CompletionResult {
    pub plan: Plan,
    pub subtask: SubtaskView,
    pub completed_at: Timestamp,
}

impl CompletionResult {
    pub fn new(plan: Plan, subtask: SubtaskView, completed_at: Timestamp) -> Self {
        Self {
            plan,
            subtask,
            completed_at,
        }
    }

    /// One-line confirmation with the local completion time and progress.
    pub fn status(&self) -> OperationStatus {
        let (completed, total) = self.plan.progress();
        OperationStatus::success(format!(
            "Subtask {} marked complete at {} ({completed}/{total} subtasks completed)",
            self.subtask.subtask.id,
            LocalDateTime(&self.completed_at)
        ))
    }
}

impl fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phase, Subtask, Task};
    use crate::plan::{complete_subtask_at, find_subtask};

    fn plan() -> Plan {
        let mut task = Task::new("0.1", "Setup");
        task.subtasks = vec![Subtask::new("0.1.1", "Init (Single Session)")];
        let mut phase = Phase::new("0", "Foundation", "Complete foundation phase");
        phase.tasks = vec![task];
        let mut plan = Plan::new("Demo");
        plan.phases = vec![phase];
        plan
    }

    #[test]
    fn test_subtask_view_display() {
        let view = find_subtask(&plan(), "0.1.1").unwrap();
        let output = view.to_string();

        assert!(output.starts_with("**Phase 0**: Foundation\n**Task 0.1**: Setup\n"));
        assert!(output.contains("**Branch**: `feature/0-1-setup`"));
        assert!(output.contains("#### Subtask 0.1.1: Init (Single Session)"));
    }

    #[test]
    fn test_completion_result() {
        let mut plan = plan();
        let at = Timestamp::from_second(1_700_000_000).unwrap();
        let view = complete_subtask_at(&mut plan, "0.1.1", "Done", at).unwrap();

        let result = CompletionResult::new(plan, view, at);
        let status = result.status().to_string();
        let document = result.to_string();

        assert!(status.starts_with("Success: Subtask 0.1.1 marked complete at "));
        assert!(status.contains("(1/1 subtasks completed)"));
        assert!(document.starts_with("# Development Plan: Demo"));
        assert!(document.contains("**Status**: completed"));
    }
}
