//! Reader for `DEVELOPMENT_PLAN.md` documents.
//!
//! Parses the layout written by `Display for Plan` back into a [`Plan`].
//! The reader is line oriented and lenient: anything it does not recognise
//! is skipped, and problems are collected as issues instead of failing.
//!
//! Phase and task descriptions are free text, but the reader only keeps
//! their plain lines. List items and `**Label**: value` lines under a phase
//! or task heading are skipped, as are sections other than the technology
//! stack and the phases, so writing a read plan back drops them.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{Phase, Plan, Subtask, SubtaskStatus, Task, TechStack, ValidationIssue};

static PLAN_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s+(?:Development Plan:\s*)?(.+?)\s*$").expect("valid regex")
});
static PHASE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+Phase\s+(\S+?):\s*(.*?)\s*$").expect("valid regex"));
static TASK_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+Task\s+(\S+?):\s*(.*?)\s*$").expect("valid regex"));
static SUBTASK_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^####\s+Subtask\s+(\S+?):\s*(.*?)\s*$").expect("valid regex"));
static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*]+)\*\*:\s*(.*?)\s*$").expect("valid regex"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+(.*?)\s*$").expect("valid regex"));
static CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[[ x]\]\s*").expect("valid regex"));
static LEADING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+\.\d+)").expect("valid regex"));

/// A plan read from markdown plus everything the reader had to skip over.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanDocument {
    pub plan: Plan,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Stack,
    Phase,
    Task,
    Subtask,
    /// After a subtask's closing rule, until the next heading
    Closed,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Prerequisites,
    Deliverables,
    FilesToCreate,
    FilesToModify,
    SuccessCriteria,
    TechnologyDecisions,
    CompletionNotes,
}

impl Block {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Prerequisites" => Some(Block::Prerequisites),
            "Deliverables" => Some(Block::Deliverables),
            "Files to Create" => Some(Block::FilesToCreate),
            "Files to Modify" => Some(Block::FilesToModify),
            "Success Criteria" => Some(Block::SuccessCriteria),
            "Technology Decisions" => Some(Block::TechnologyDecisions),
            "Completion Notes" => Some(Block::CompletionNotes),
            _ => None,
        }
    }
}

fn strip_item(item: &str) -> String {
    CHECKBOX.replace(item, "").trim().to_string()
}

/// Paths are written as `` `path` ``; only that one pair of backticks goes.
fn strip_path(item: &str) -> String {
    item.strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
        .map(str::trim)
        .unwrap_or(item)
        .to_string()
}

fn is_emphasis_only(line: &str) -> bool {
    (line.starts_with("**") && line.ends_with("**"))
        || (line.len() > 1 && line.starts_with('_') && line.ends_with('_'))
}

struct Reader {
    plan: Plan,
    issues: Vec<ValidationIssue>,
    section: Section,
    block: Option<Block>,
}

impl Reader {
    fn phase(&mut self) -> Option<&mut Phase> {
        self.plan.phases.last_mut()
    }

    fn task(&mut self) -> Option<&mut Task> {
        self.phase().and_then(|p| p.tasks.last_mut())
    }

    fn subtask(&mut self) -> Option<&mut Subtask> {
        self.task().and_then(|t| t.subtasks.last_mut())
    }

    fn read_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(caps) = SUBTASK_HEADING.captures(line) {
            self.start_subtask(&caps[1], &caps[2]);
        } else if let Some(caps) = TASK_HEADING.captures(line) {
            self.start_task(&caps[1], &caps[2]);
        } else if let Some(caps) = PHASE_HEADING.captures(line) {
            self.plan.phases.push(Phase::new(&caps[1], &caps[2], ""));
            self.section = Section::Phase;
            self.block = None;
        } else if line.starts_with("## ") {
            self.block = None;
            self.section = if line.trim_start_matches('#').trim() == "Technology Stack" {
                Section::Stack
            } else {
                Section::Other
            };
        } else if line.starts_with("# ") {
            if let Some(caps) = PLAN_TITLE.captures(line) {
                if self.plan.project_name.is_empty() {
                    self.plan.project_name = caps[1].to_string();
                }
            }
        } else if line.starts_with('#') {
            self.section = Section::Other;
            self.block = None;
        } else if line == "---" {
            if self.section == Section::Subtask {
                self.section = Section::Closed;
            }
            self.block = None;
        } else {
            self.read_body(line);
        }
    }

    fn start_task(&mut self, id: &str, title: &str) {
        self.block = None;
        match self.phase() {
            Some(phase) => {
                phase.tasks.push(Task::new(id, title));
                self.section = Section::Task;
            }
            None => {
                self.issues.push(ValidationIssue::error(format!(
                    "Task {id}: appears before any phase and was skipped"
                )));
                self.section = Section::Other;
            }
        }
    }

    fn start_subtask(&mut self, id: &str, title: &str) {
        self.block = None;
        match self.task() {
            Some(task) => {
                task.subtasks.push(Subtask::new(id, title));
                self.section = Section::Subtask;
            }
            None => {
                self.issues.push(ValidationIssue::error(format!(
                    "Subtask {id}: appears before any task and was skipped"
                )));
                self.section = Section::Other;
            }
        }
    }

    fn read_body(&mut self, line: &str) {
        match self.section {
            Section::Stack => self.read_stack_row(line),
            Section::Phase => self.read_phase_line(line),
            Section::Task => self.read_task_line(line),
            Section::Subtask => self.read_subtask_line(line),
            Section::Preamble | Section::Closed | Section::Other => {}
        }
    }

    fn read_stack_row(&mut self, line: &str) {
        if !line.starts_with('|') {
            return;
        }
        let cells: Vec<&str> = line
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        let &[label, value] = cells.as_slice() else {
            return;
        };
        if label == "Component" || label.is_empty() || label.chars().all(|c| c == '-') {
            return;
        }
        self.plan
            .tech_stack
            .get_or_insert_with(TechStack::default)
            .set_row(label, value);
    }

    fn read_phase_line(&mut self, line: &str) {
        if let Some(caps) = FIELD.captures(line) {
            let value = caps[2].to_string();
            if let Some(phase) = self.phase() {
                match &caps[1] {
                    "Goal" => phase.goal = value,
                    "Days" => phase.days = value,
                    _ => {}
                }
            }
        } else if !is_emphasis_only(line) && !LIST_ITEM.is_match(line) {
            if let Some(phase) = self.phase() {
                append_line(&mut phase.description, line);
            }
        }
    }

    fn read_task_line(&mut self, line: &str) {
        if FIELD.is_match(line) || is_emphasis_only(line) || LIST_ITEM.is_match(line) {
            return;
        }
        if let Some(task) = self.task() {
            append_line(&mut task.description, line);
        }
    }

    fn read_subtask_line(&mut self, line: &str) {
        if let Some(caps) = LIST_ITEM.captures(line) {
            let item = caps[1].to_string();
            if let Some(block) = self.block {
                self.read_item(block, &item);
            }
            return;
        }

        let Some(caps) = FIELD.captures(line) else {
            return;
        };
        let label = caps[1].trim().to_string();
        let value = caps[2].to_string();

        if label == "Status" {
            self.block = None;
            self.read_status(&value);
            return;
        }

        self.block = Block::from_label(&label);
        if let Some(block) = self.block {
            // Inline form: `**Prerequisites**: 1.1.1, 1.1.2`
            for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                self.read_item(block, item);
            }
        }
    }

    fn read_status(&mut self, value: &str) {
        let parsed = value.parse::<SubtaskStatus>();
        let Some(subtask) = self.subtask() else {
            return;
        };
        match parsed {
            Ok(status) => subtask.status = status,
            Err(message) => {
                let owner = format!("Subtask {}", subtask.id);
                self.issues
                    .push(ValidationIssue::error(message).within(&owner));
            }
        }
    }

    fn read_item(&mut self, block: Block, item: &str) {
        let Some(subtask) = self.subtask() else {
            return;
        };

        if block == Block::CompletionNotes {
            if let Some(caps) = FIELD.captures(item) {
                subtask
                    .completion_notes
                    .insert(caps[1].trim(), caps[2].to_string());
            }
            return;
        }

        let text = strip_item(item);
        if text.is_empty() {
            return;
        }
        match block {
            Block::Prerequisites => {
                if let Some(caps) = LEADING_ID.captures(&text) {
                    subtask.prerequisites.push(caps[1].to_string());
                }
            }
            Block::Deliverables => subtask.deliverables.push(text),
            Block::FilesToCreate => subtask.files_to_create.push(strip_path(&text)),
            Block::FilesToModify => subtask.files_to_modify.push(strip_path(&text)),
            Block::SuccessCriteria => subtask.success_criteria.push(text),
            Block::TechnologyDecisions => subtask.technology_decisions.push(text),
            Block::CompletionNotes => {}
        }
    }
}

fn append_line(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(line);
}

/// Read a development plan from its markdown form. Never fails.
///
/// Unknown status strings leave the subtask `pending` and are reported in
/// [`PlanDocument::issues`], as are tasks or subtasks with no owning heading.
///
/// ```rust
/// use devplan_core::plan::read_plan_markdown;
///
/// let doc = read_plan_markdown(
///     "# Development Plan: Demo\n\n## Phase 0: Foundation\n\n**Goal**: Setup\n",
/// );
/// assert_eq!(doc.plan.project_name, "Demo");
/// assert_eq!(doc.plan.phases[0].goal, "Setup");
/// assert!(doc.issues.is_empty());
/// ```
pub fn read_plan_markdown(text: &str) -> PlanDocument {
    let mut reader = Reader {
        plan: Plan::default(),
        issues: Vec::new(),
        section: Section::Preamble,
        block: None,
    };

    for line in text.lines() {
        reader.read_line(line.trim());
    }

    PlanDocument {
        plan: reader.plan,
        issues: reader.issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "\
# Development Plan: Calc

**Progress**: 1/2 subtasks completed

## Technology Stack

| Component | Choice |
|-----------|--------|
| Language | Rust |
| Testing | cargo test |
| cache | Redis |

## Phase 0: Foundation

**Goal**: Complete foundation phase
**Days**: 1-2

Repository setup and tooling.

### Task 0.1: Repository Setup

**Git Branch**: `feature/0-1-repository-setup`

#### Subtask 0.1.1: Initialize Repository (Single Session)

**Status**: completed

**Prerequisites**:
- None

**Deliverables**:
- [x] Create .gitignore
- [x] Create README.md
- [x] Initial commit

**Files to Create**:
- `README.md`

**Completion Notes**:
- **Summary**: Repo ready
- **Completed At**: 2025-03-01T12:00:00Z

---

#### Subtask 0.1.2: CI Pipeline (Single Session)

**Status**: in_progress

**Prerequisites**:
- 0.1.1

**Success Criteria**:
- [ ] CI runs on push

---

**Task 0.1 Complete - Squash Merge to Main**
- [ ] All subtasks completed and verified
- [ ] `git branch -d feature/0-1-repository-setup`
";

    #[test]
    fn test_reads_header_and_stack() {
        let doc = read_plan_markdown(PLAN);
        let stack = doc.plan.tech_stack.as_ref().unwrap();

        assert_eq!(doc.plan.project_name, "Calc");
        assert_eq!(stack.language, "Rust");
        assert_eq!(stack.testing, "cargo test");
        assert_eq!(stack.additional_tools.get("cache").map(String::as_str), Some("Redis"));
    }

    #[test]
    fn test_reads_phase_fields() {
        let doc = read_plan_markdown(PLAN);
        let phase = &doc.plan.phases[0];

        assert_eq!(phase.id, "0");
        assert_eq!(phase.title, "Foundation");
        assert_eq!(phase.goal, "Complete foundation phase");
        assert_eq!(phase.days, "1-2");
        assert_eq!(phase.description, "Repository setup and tooling.");
        assert_eq!(phase.tasks[0].description, "");
    }

    #[test]
    fn test_reads_subtasks() {
        let doc = read_plan_markdown(PLAN);
        let task = &doc.plan.phases[0].tasks[0];
        let first = &task.subtasks[0];
        let second = &task.subtasks[1];

        assert_eq!(task.id, "0.1");
        assert_eq!(task.subtasks.len(), 2);
        assert_eq!(first.status, SubtaskStatus::Completed);
        assert!(first.prerequisites.is_empty());
        assert_eq!(first.deliverables.len(), 3);
        assert_eq!(first.deliverables[0], "Create .gitignore");
        assert_eq!(first.files_to_create, vec!["README.md"]);
        assert_eq!(
            first.completion_notes.get("Summary").map(String::as_str),
            Some("Repo ready")
        );

        assert_eq!(second.status, SubtaskStatus::InProgress);
        assert_eq!(second.prerequisites, vec!["0.1.1"]);
        assert_eq!(second.success_criteria, vec!["CI runs on push"]);
        assert!(doc.issues.is_empty());
    }

    #[test]
    fn test_checkpoint_lines_are_not_deliverables() {
        let doc = read_plan_markdown(PLAN);
        let second = &doc.plan.phases[0].tasks[0].subtasks[1];
        assert!(second.deliverables.is_empty());
    }

    #[test]
    fn test_unknown_status_is_reported_and_stays_pending() {
        let text = "\
# Development Plan: X

## Phase 1: Core

### Task 1.1: Work

#### Subtask 1.1.1: Thing (Single Session)

**Status**: finished
";
        let doc = read_plan_markdown(text);
        let subtask = &doc.plan.phases[0].tasks[0].subtasks[0];

        assert_eq!(subtask.status, SubtaskStatus::Pending);
        assert_eq!(doc.issues.len(), 1);
        assert!(doc.issues[0]
            .message
            .starts_with("Subtask 1.1.1: Status 'finished' is invalid"));
    }

    #[test]
    fn test_inline_prerequisites() {
        let text = "\
## Phase 1: Core
### Task 1.1: Work
#### Subtask 1.1.3: Thing (Single Session)
**Prerequisites**: 1.1.1, 1.1.2
";
        let doc = read_plan_markdown(text);
        assert_eq!(
            doc.plan.phases[0].tasks[0].subtasks[0].prerequisites,
            vec!["1.1.1", "1.1.2"]
        );
    }

    #[test]
    fn test_orphan_headings_reported() {
        let doc = read_plan_markdown("### Task 1.1: Floating\n#### Subtask 1.1.1: Lost\n");

        assert!(doc.plan.phases.is_empty());
        assert_eq!(doc.issues.len(), 2);
    }

    #[test]
    fn test_inline_code_survives_a_write_and_read() {
        let mut subtask = Subtask::new("0.1.1", "Tooling (Single Session)");
        subtask.deliverables = vec![
            "Run `cargo fmt` and `cargo clippy`".into(),
            "`README.md` exists".into(),
            "Third".into(),
        ];
        subtask.success_criteria = vec!["`cargo test` passes".into()];
        subtask.technology_decisions = vec!["Use `clap` for arguments".into()];
        subtask.files_to_create = vec!["src/main.rs".into()];
        subtask.files_to_modify = vec!["Cargo.toml".into()];
        let mut task = Task::new("0.1", "Setup");
        task.subtasks = vec![subtask.clone()];
        let mut phase = Phase::new("0", "Foundation", "Complete foundation phase");
        phase.tasks = vec![task];
        let mut plan = Plan::new("Calc");
        plan.phases = vec![phase];

        let doc = read_plan_markdown(&plan.to_string());

        assert!(doc.issues.is_empty());
        assert_eq!(doc.plan.phases[0].tasks[0].subtasks[0], subtask);
    }

    #[test]
    fn test_phase_and_task_list_lines_are_not_kept() {
        let text = "\
## Phase 1: Core

**Goal**: Build it

Intro line.
- a list under the phase

### Task 1.1: Work

Task prose.
**Owner**: someone
- a list under the task
";
        let doc = read_plan_markdown(text);
        let phase = &doc.plan.phases[0];

        assert_eq!(phase.description, "Intro line.");
        assert_eq!(phase.tasks[0].description, "Task prose.");
    }

    #[test]
    fn test_garbage_never_fails() {
        let doc = read_plan_markdown("random\n| a | b |\n- item\n**Status**: nope\n");
        assert!(doc.plan.phases.is_empty());
        assert!(doc.plan.tech_stack.is_none());
        assert!(doc.issues.is_empty());
    }
}
