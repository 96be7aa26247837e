//! Phase skeletons and the empty task/subtask containers keyed by id.

use std::collections::BTreeMap;

use crate::models::{Phase, Subtask, Task};
use crate::templates::TemplateConfig;

/// Title of the mandatory first phase.
pub const FOUNDATION: &str = "Foundation";

/// Phase names with Foundation guaranteed first.
///
/// When the list does not already start with Foundation, it is prepended and
/// any later occurrence removed; the rest keep their order.
pub fn phase_names(names: &[String]) -> Vec<String> {
    if names.first().is_some_and(|first| first == FOUNDATION) {
        return names.to_vec();
    }

    std::iter::once(FOUNDATION.to_string())
        .chain(names.iter().filter(|name| *name != FOUNDATION).cloned())
        .collect()
}

/// One empty phase per template phase name, with ids `"0"`, `"1"`, ...
pub fn derive_phases(template: &TemplateConfig) -> Vec<Phase> {
    phase_names(&template.default_phases)
        .into_iter()
        .enumerate()
        .map(|(index, title)| {
            let goal = format!("Complete {} phase", title.to_lowercase());
            Phase::new(index.to_string(), title, goal)
        })
        .collect()
}

/// An empty task list for every phase id.
pub fn derive_tasks(phases: &[Phase]) -> BTreeMap<String, Vec<Task>> {
    phases
        .iter()
        .map(|phase| (phase.id.clone(), Vec::new()))
        .collect()
}

/// An empty subtask list for every task id, grouped by phase id.
pub fn derive_subtasks(
    tasks_by_phase: &BTreeMap<String, Vec<Task>>,
) -> BTreeMap<String, BTreeMap<String, Vec<Subtask>>> {
    tasks_by_phase
        .iter()
        .map(|(phase_id, tasks)| {
            let subtasks = tasks
                .iter()
                .map(|task| (task.id.clone(), Vec::new()))
                .collect();
            (phase_id.clone(), subtasks)
        })
        .collect()
}
