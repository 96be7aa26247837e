//! Plan assembly from a brief and its resolved template.

use log::debug;

use crate::derive::{derive_phases, derive_subtasks, derive_tasks, derive_tech_stack};
use crate::error::{PlannerError, Result};
use crate::models::{Brief, Plan};
use crate::templates::TemplateConfig;

/// Top-level checks a freshly generated plan must pass.
///
/// Finer-grained findings come from [`super::validate_plan`] and are never
/// fatal here.
pub fn check_plan_structure(plan: &Plan) -> Vec<String> {
    let mut errors = Vec::new();

    if plan.project_name.trim().is_empty() {
        errors.push("Project name is required".to_string());
    }

    match plan.phases.first() {
        None => errors.push("Plan must have at least one phase".to_string()),
        Some(first) if first.id != "0" => {
            errors.push("First phase must have ID '0'".to_string());
        }
        Some(_) => {}
    }

    if plan.tech_stack.is_none() {
        errors.push("Plan must have a tech stack".to_string());
    }

    errors
}

/// Generate the plan skeleton for `brief`.
///
/// Fails on conflicting technology constraints or when the assembled plan
/// misses a top-level requirement. Phases come back with empty task lists.
pub fn generate_plan(brief: &Brief, template: &TemplateConfig) -> Result<Plan> {
    let tech_stack = derive_tech_stack(brief, template)?;
    let mut phases = derive_phases(template);

    let mut tasks_by_phase = derive_tasks(&phases);
    let mut subtasks_by_task = derive_subtasks(&tasks_by_phase);
    for phase in &mut phases {
        let mut tasks = tasks_by_phase.remove(&phase.id).unwrap_or_default();
        if let Some(mut by_task) = subtasks_by_task.remove(&phase.id) {
            for task in &mut tasks {
                task.subtasks = by_task.remove(&task.id).unwrap_or_default();
            }
        }
        phase.tasks = tasks;
    }

    let plan = Plan {
        project_name: brief.project_name.clone(),
        phases,
        tech_stack: Some(tech_stack),
    };

    let errors = check_plan_structure(&plan);
    if !errors.is_empty() {
        return Err(PlannerError::validation(errors));
    }

    debug!(
        "Generated plan for '{}' from template '{}' with {} phases",
        plan.project_name,
        template.name,
        plan.phases.len()
    );
    Ok(plan)
}
