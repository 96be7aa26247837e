//! Subtask lookup and completion over a parsed plan.

use jiff::Timestamp;
use log::debug;
use serde::Serialize;

use crate::error::{PlannerError, Result};
use crate::models::{Plan, Subtask, SubtaskStatus};
use crate::operations::task_branch;

/// Completion note key holding the caller's summary.
pub const SUMMARY_NOTE: &str = "Summary";
/// Completion note key holding the completion time.
pub const COMPLETED_AT_NOTE: &str = "Completed At";

/// A subtask together with the phase and task that own it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubtaskView {
    pub phase_id: String,
    pub phase_title: String,
    pub task_id: String,
    pub task_title: String,
    /// Branch the owning task is developed on
    pub branch: String,
    pub subtask: Subtask,
}

/// Find subtask `id` and describe where it sits in the plan.
pub fn find_subtask(plan: &Plan, id: &str) -> Result<SubtaskView> {
    for phase in &plan.phases {
        for task in &phase.tasks {
            if let Some(subtask) = task.subtasks.iter().find(|s| s.id == id) {
                return Ok(SubtaskView {
                    phase_id: phase.id.clone(),
                    phase_title: phase.title.clone(),
                    task_id: task.id.clone(),
                    task_title: task.title.clone(),
                    branch: task_branch(task),
                    subtask: subtask.clone(),
                });
            }
        }
    }

    Err(PlannerError::not_found("Subtask", id))
}

fn subtask_mut<'a>(plan: &'a mut Plan, id: &str) -> Result<&'a mut Subtask> {
    plan.phases
        .iter_mut()
        .flat_map(|p| p.tasks.iter_mut())
        .flat_map(|t| t.subtasks.iter_mut())
        .find(|s| s.id == id)
        .ok_or_else(|| PlannerError::not_found("Subtask", id))
}

/// Mark subtask `id` completed now. See [`complete_subtask_at`].
pub fn complete_subtask(plan: &mut Plan, id: &str, summary: &str) -> Result<SubtaskView> {
    complete_subtask_at(plan, id, summary, Timestamp::now())
}

/// Mark subtask `id` completed at `at`, recording the summary and time as
/// completion notes. Completing an already completed subtask overwrites both
/// notes in place.
///
/// A note is one list item in the plan, so a multi-line summary is joined
/// into a single line.
pub fn complete_subtask_at(
    plan: &mut Plan,
    id: &str,
    summary: &str,
    at: Timestamp,
) -> Result<SubtaskView> {
    let subtask = subtask_mut(plan, id)?;
    subtask.status = SubtaskStatus::Completed;
    subtask
        .completion_notes
        .insert(SUMMARY_NOTE, single_line(summary));
    subtask.completion_notes.insert(COMPLETED_AT_NOTE, at.to_string());

    debug!("Marked subtask {id} completed");
    find_subtask(plan, id)
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
