//! Shared operations for the devplan interfaces.
//!
//! Naming and path conventions used by the CLI, the MCP server and the
//! document renderers, kept in one place so every interface writes the same
//! files and branch names.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Task, TechStack};

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("valid regex"));
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid regex"));

/// File name of the rendered development plan.
pub const PLAN_FILE: &str = "DEVELOPMENT_PLAN.md";
/// File name of the rendered project rules document.
pub const RULES_FILE: &str = "CLAUDE.md";
/// File name of the project brief the verifier checks against.
pub const BRIEF_FILE: &str = "PROJECT_BRIEF.md";
/// File name of the per-project lessons log.
pub const LESSONS_FILE: &str = "LESSONS_LEARNED.md";
/// Directory, relative to the project root, holding generated agents.
pub const AGENTS_DIR: &str = ".claude/agents";

/// Convert a project or task name into a lowercase, dash-separated slug.
///
/// Whitespace and underscore runs become a single dash, every other
/// character outside `[a-z0-9-]` is dropped, and leading or trailing dashes
/// are trimmed.
///
/// # Examples
///
/// ```rust
/// # use devplan_core::operations::slugify;
/// assert_eq!(slugify("My Cool_Project!"), "my-cool-project");
/// assert_eq!(slugify("  --API v2--  "), "api-v2");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let dashed = SEPARATORS.replace_all(&lowered, "-");
    let stripped = DISALLOWED.replace_all(&dashed, "");
    let collapsed = DASH_RUNS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Git branch a task's subtasks are committed on, e.g.
/// `feature/1-2-database-layer` for task `1.2`.
pub fn task_branch(task: &Task) -> String {
    let id = task.id.replace('.', "-");
    let slug = slugify(&task.title);
    if slug.is_empty() {
        format!("feature/{id}")
    } else {
        format!("feature/{id}-{slug}")
    }
}

/// Name of the executor agent for a project.
pub fn agent_name(project_name: &str) -> String {
    format!("{}-executor", slugify(project_name))
}

/// Path of the executor agent file relative to the project root.
///
/// # Examples
///
/// ```rust
/// # use devplan_core::operations::agent_path;
/// let path = agent_path("Task Tracker");
/// assert_eq!(path.to_str(), Some(".claude/agents/task-tracker-executor.md"));
/// ```
pub fn agent_path(project_name: &str) -> PathBuf {
    PathBuf::from(AGENTS_DIR).join(format!("{}.md", agent_name(project_name)))
}

/// Name of the verifier agent for a project.
pub fn verifier_name(project_name: &str) -> String {
    format!("{}-verifier", slugify(project_name))
}

/// Path of the verifier agent file relative to the project root.
pub fn verifier_path(project_name: &str) -> PathBuf {
    PathBuf::from(AGENTS_DIR).join(format!("{}.md", verifier_name(project_name)))
}

fn command_for(tool: &str, known: &[(&str, &str)]) -> Option<String> {
    let lowered = tool.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let command = known
        .iter()
        .find(|(name, _)| lowered.contains(*name))
        .map_or(lowered.clone(), |(_, command)| command.to_string());
    Some(command)
}

/// Shell commands that verify a subtask against the chosen stack, as
/// `(purpose, command)` pairs in linting, type checking, testing order.
///
/// Known tools map to their usual invocation; any other tool name is used
/// as the command itself.
pub fn verification_commands(stack: &TechStack) -> Vec<(&'static str, String)> {
    let linting = command_for(
        &stack.linting,
        &[
            ("ruff", "ruff check src tests"),
            ("eslint", "npx eslint ."),
            ("clippy", "cargo clippy --all-targets -- -D warnings"),
            ("golangci", "golangci-lint run"),
        ],
    );
    let type_checking = command_for(
        &stack.type_checking,
        &[("mypy", "mypy src"), ("typescript", "npx tsc --noEmit")],
    );
    let testing = command_for(
        &stack.testing,
        &[
            ("pytest", "pytest tests/ -v --cov"),
            ("jest", "npx jest --coverage"),
            ("vitest", "npx vitest run"),
            ("cargo", "cargo test"),
            ("go test", "go test ./..."),
        ],
    );

    [
        ("Linting", linting),
        ("Type checking", type_checking),
        ("Tests", testing),
    ]
    .into_iter()
    .filter_map(|(purpose, command)| command.map(|c| (purpose, c)))
    .collect()
}
