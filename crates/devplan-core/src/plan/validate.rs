//! Full plan validation: structural checks plus prerequisite graph checks.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::models::{Plan, ValidationIssue, ValidationReport};

/// Every subtask id that appears more than once, reported once each.
pub fn validate_unique_ids(plan: &Plan) -> Vec<ValidationIssue> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut issues = Vec::new();

    for id in plan.subtask_ids() {
        if !seen.insert(id) && reported.insert(id) {
            issues.push(ValidationIssue::error(format!(
                "Duplicate subtask ID '{id}'"
            )));
        }
    }

    issues
}

/// One error per prerequisite id that names no subtask in the plan.
pub fn validate_prerequisites(plan: &Plan) -> Vec<ValidationIssue> {
    let ids: HashSet<&str> = plan.subtask_ids().into_iter().collect();
    let known = &ids;

    plan.subtasks()
        .flat_map(move |subtask| {
            subtask
                .prerequisites
                .iter()
                .filter(move |prerequisite| !known.contains(prerequisite.as_str()))
                .map(move |prerequisite| {
                    ValidationIssue::error(format!(
                        "Prerequisite '{prerequisite}' does not exist in the plan"
                    ))
                    .within(&format!("Subtask {}", subtask.id))
                })
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

struct CycleFinder<'a> {
    graph: HashMap<&'a str, Vec<&'a str>>,
    marks: HashMap<&'a str, Mark>,
    path: Vec<&'a str>,
    cycles: Vec<String>,
}

impl<'a> CycleFinder<'a> {
    fn visit(&mut self, node: &'a str) {
        self.marks.insert(node, Mark::OnStack);
        self.path.push(node);

        let next_nodes = self.graph.get(node).cloned().unwrap_or_default();
        for next in next_nodes {
            match self.marks.get(next) {
                Some(Mark::OnStack) => {
                    let start = self.path.iter().position(|n| *n == next).unwrap_or(0);
                    let mut cycle = self.path[start..].to_vec();
                    cycle.push(next);
                    self.cycles.push(cycle.join(" -> "));
                }
                Some(Mark::Done) => {}
                None => self.visit(next),
            }
        }

        self.path.pop();
        self.marks.insert(node, Mark::Done);
    }
}

/// Report every cycle in the prerequisite graph.
///
/// Traversal starts from every subtask in document order, so cycles in
/// components unreachable from the first subtask are still found.
/// Prerequisites that name unknown subtasks are ignored here.
pub fn validate_circular_dependencies(plan: &Plan) -> Vec<ValidationIssue> {
    let known: HashSet<&str> = plan.subtask_ids().into_iter().collect();
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for subtask in plan.subtasks() {
        graph.entry(subtask.id.as_str()).or_default().extend(
            subtask
                .prerequisites
                .iter()
                .map(String::as_str)
                .filter(|id| known.contains(id)),
        );
    }

    let mut finder = CycleFinder {
        graph,
        marks: HashMap::new(),
        path: Vec::new(),
        cycles: Vec::new(),
    };
    for id in plan.subtask_ids() {
        if !finder.marks.contains_key(id) {
            finder.visit(id);
        }
    }

    finder
        .cycles
        .into_iter()
        .map(|cycle| ValidationIssue::error(format!("Circular dependency detected: {cycle}")))
        .collect()
}

/// Run every plan check and collect the findings. Never fails.
pub fn validate_plan(plan: &Plan) -> ValidationReport {
    let mut report = ValidationReport::new(plan.validate());
    report.extend(validate_unique_ids(plan));
    report.extend(validate_prerequisites(plan));
    report.extend(validate_circular_dependencies(plan));

    debug!(
        "Validated plan '{}': {} errors, {} warnings",
        plan.project_name,
        report.error_count(),
        report.warning_count()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phase, Subtask, Task};

    fn plan_with(subtasks: &[(&str, &[&str])]) -> Plan {
        let mut task = Task::new("1.1", "Core");
        task.subtasks = subtasks
            .iter()
            .map(|(id, prerequisites)| {
                let mut subtask = Subtask::new(*id, "Work (Single Session)");
                subtask.prerequisites = prerequisites.iter().map(|p| p.to_string()).collect();
                subtask
            })
            .collect();
        let mut phase = Phase::new("1", "Core", "goal");
        phase.tasks = vec![task];

        let mut plan = Plan::new("Demo");
        plan.phases = vec![phase];
        plan
    }

    #[test]
    fn test_two_node_cycle_is_reported() {
        let plan = plan_with(&[("1.1.1", &["1.1.2"]), ("1.1.2", &["1.1.1"])]);
        let issues = validate_circular_dependencies(&plan);

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Circular dependency detected: 1.1.1 -> 1.1.2 -> 1.1.1"
        );
    }

    #[test]
    fn test_acyclic_chain_is_clean() {
        let plan = plan_with(&[
            ("1.1.1", &["1.1.2"]),
            ("1.1.2", &["1.1.3"]),
            ("1.1.3", &[]),
        ]);
        assert!(validate_circular_dependencies(&plan).is_empty());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let plan = plan_with(&[("1.1.1", &["1.1.1"])]);
        let issues = validate_circular_dependencies(&plan);
        assert_eq!(
            issues[0].message,
            "Circular dependency detected: 1.1.1 -> 1.1.1"
        );
    }

    #[test]
    fn test_disconnected_cycle_found_and_isolated_node_clean() {
        let plan = plan_with(&[
            ("1.1.1", &[]),
            ("1.1.2", &["1.1.3"]),
            ("1.1.3", &["1.1.4"]),
            ("1.1.4", &["1.1.2"]),
        ]);
        let issues = validate_circular_dependencies(&plan);

        assert_eq!(issues.len(), 1);
        assert!(!issues[0].message.contains("1.1.1 "));
        assert_eq!(
            issues[0].message,
            "Circular dependency detected: 1.1.2 -> 1.1.3 -> 1.1.4 -> 1.1.2"
        );
    }

    #[test]
    fn test_dangling_prerequisites_one_message_each() {
        let plan = plan_with(&[("1.1.1", &["0.9.9", "1.1.2", "2.1.1"]), ("1.1.2", &[])]);
        let messages: Vec<String> = validate_prerequisites(&plan)
            .into_iter()
            .map(|i| i.message)
            .collect();

        assert_eq!(
            messages,
            vec![
                "Subtask 1.1.1: Prerequisite '0.9.9' does not exist in the plan",
                "Subtask 1.1.1: Prerequisite '2.1.1' does not exist in the plan",
            ]
        );
        assert!(validate_circular_dependencies(&plan).is_empty());
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let plan = plan_with(&[("1.1.1", &[]), ("1.1.1", &[]), ("1.1.1", &[])]);
        let issues = validate_unique_ids(&plan);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Duplicate subtask ID '1.1.1'");
    }

    #[test]
    fn test_validate_plan_collects_all_passes() {
        let plan = plan_with(&[("1.1.1", &["1.1.2"]), ("1.1.2", &["1.1.1", "9.9.9"])]);
        let report = validate_plan(&plan);
        let messages = report.messages();

        // Structural warnings: deliverable counts for both subtasks.
        assert_eq!(report.warning_count(), 2);
        assert!(messages
            .iter()
            .any(|m| m.contains("Prerequisite '9.9.9' does not exist")));
        assert!(messages
            .iter()
            .any(|m| m.starts_with("Circular dependency detected")));
        assert!(!report.passes(false));
    }
}
