//! Display implementations for the plan hierarchy.
//!
//! `Display for Plan` produces the `DEVELOPMENT_PLAN.md` document. The layout
//! is the one [`crate::plan::read_plan_markdown`] reads back, so the two must
//! change together.

use std::fmt;

use crate::models::{Phase, Plan, Subtask, SubtaskStatus, Task, TechStack};
use crate::operations::task_branch;

impl fmt::Display for SubtaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TechStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Component | Choice |")?;
        writeln!(f, "|-----------|--------|")?;
        for (label, value) in self.rows() {
            writeln!(f, "| {label} | {value} |")?;
        }
        Ok(())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, label: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "**{label}**:")?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    writeln!(f)
}

fn write_checklist(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    items: &[String],
    checked: bool,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    let mark = if checked { "x" } else { " " };
    writeln!(f, "**{label}**:")?;
    for item in items {
        writeln!(f, "- [{mark}] {item}")?;
    }
    writeln!(f)
}

fn write_paths(f: &mut fmt::Formatter<'_>, label: &str, paths: &[String]) -> fmt::Result {
    if paths.is_empty() {
        return Ok(());
    }
    writeln!(f, "**{label}**:")?;
    for path in paths {
        writeln!(f, "- `{path}`")?;
    }
    writeln!(f)
}

impl fmt::Display for Subtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#### Subtask {}: {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "**Status**: {}", self.status)?;
        writeln!(f)?;

        writeln!(f, "**Prerequisites**:")?;
        if self.prerequisites.is_empty() {
            writeln!(f, "- None")?;
        }
        for prerequisite in &self.prerequisites {
            writeln!(f, "- {prerequisite}")?;
        }
        writeln!(f)?;

        let done = self.is_completed();
        write_checklist(f, "Deliverables", &self.deliverables, done)?;
        write_paths(f, "Files to Create", &self.files_to_create)?;
        write_paths(f, "Files to Modify", &self.files_to_modify)?;
        write_checklist(f, "Success Criteria", &self.success_criteria, done)?;
        write_list(f, "Technology Decisions", &self.technology_decisions)?;

        if !self.completion_notes.is_empty() {
            writeln!(f, "**Completion Notes**:")?;
            for (key, value) in self.completion_notes.iter() {
                writeln!(f, "- **{key}**: {value}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "---")?;
        writeln!(f)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let branch = task_branch(self);

        writeln!(f, "### Task {}: {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "**Git Branch**: `{branch}`")?;
        writeln!(f)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        for subtask in &self.subtasks {
            write!(f, "{subtask}")?;
        }

        writeln!(f, "**Task {} Complete - Squash Merge to Main**", self.id)?;
        writeln!(f, "- [ ] All subtasks completed and verified")?;
        writeln!(f, "- [ ] `git checkout main && git merge --squash {branch}`")?;
        writeln!(f, "- [ ] `git commit -m \"feat: {}\"`", self.title.to_lowercase())?;
        writeln!(f, "- [ ] `git branch -d {branch}`")?;
        writeln!(f)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Phase {}: {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "**Goal**: {}", self.goal)?;
        if !self.days.is_empty() {
            writeln!(f, "**Days**: {}", self.days)?;
        }
        writeln!(f)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        if self.tasks.is_empty() {
            writeln!(f, "_No tasks defined yet._")?;
            writeln!(f)?;
        }
        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (completed, total) = self.progress();

        writeln!(f, "# Development Plan: {}", self.project_name)?;
        writeln!(f)?;
        writeln!(f, "**Progress**: {completed}/{total} subtasks completed")?;
        writeln!(f)?;

        if let Some(stack) = &self.tech_stack {
            writeln!(f, "## Technology Stack")?;
            writeln!(f)?;
            write!(f, "{stack}")?;
            writeln!(f)?;
        }

        for phase in &self.phases {
            write!(f, "{phase}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        let mut subtask = Subtask::new("1.1.1", "Tokenizer (Single Session)");
        subtask.deliverables = vec!["Token enum".into(), "Lexer".into(), "Tests".into()];
        subtask.files_to_create = vec!["src/lexer.rs".into()];
        subtask.prerequisites = vec!["0.1.1".into()];

        let mut task = Task::new("1.1", "Parser Core");
        task.subtasks = vec![subtask];
        let mut phase = Phase::new("1", "Core", "Complete core phase");
        phase.tasks = vec![task];

        let mut stack = TechStack::new("Rust");
        stack.testing = "cargo test".into();

        let mut plan = Plan::new("Calc");
        plan.phases = vec![Phase::new("0", "Foundation", "Complete foundation phase"), phase];
        plan.tech_stack = Some(stack);
        plan
    }

    #[test]
    fn test_plan_header_and_stack_table() {
        let output = sample_plan().to_string();

        assert!(output.starts_with("# Development Plan: Calc\n"));
        assert!(output.contains("**Progress**: 0/1 subtasks completed"));
        assert!(output.contains("| Language | Rust |"));
        assert!(output.contains("| Testing | cargo test |"));
        assert!(!output.contains("| Framework |"));
    }

    #[test]
    fn test_subtask_sections() {
        let output = sample_plan().to_string();

        assert!(output.contains("#### Subtask 1.1.1: Tokenizer (Single Session)"));
        assert!(output.contains("**Status**: pending"));
        assert!(output.contains("- [ ] Token enum"));
        assert!(output.contains("- `src/lexer.rs`"));
        assert!(output.contains("**Prerequisites**:\n- 0.1.1\n"));
        assert!(!output.contains("**Files to Modify**"));
    }

    #[test]
    fn test_completed_subtask_checks_deliverables() {
        let mut plan = sample_plan();
        let subtask = &mut plan.phases[1].tasks[0].subtasks[0];
        subtask.status = SubtaskStatus::Completed;
        subtask.completion_notes.insert("Summary", "Done".to_string());

        let output = plan.to_string();
        assert!(output.contains("- [x] Lexer"));
        assert!(output.contains("- **Summary**: Done"));
        assert!(output.contains("**Progress**: 1/1 subtasks completed"));
    }

    #[test]
    fn test_task_checkpoint() {
        let output = sample_plan().to_string();

        assert!(output.contains("**Git Branch**: `feature/1-1-parser-core`"));
        assert!(output.contains("**Task 1.1 Complete - Squash Merge to Main**"));
        assert!(output.contains("git merge --squash feature/1-1-parser-core"));
    }

    #[test]
    fn test_empty_phase_placeholder() {
        let output = sample_plan().to_string();
        assert!(output.contains("## Phase 0: Foundation\n\n**Goal**: Complete foundation phase\n"));
        assert!(output.contains("_No tasks defined yet._"));
    }
}
