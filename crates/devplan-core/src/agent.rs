//! Checks for generated agent files.
//!
//! An agent file is markdown with a YAML frontmatter block. The checks here
//! work on the frontmatter lines directly so that the common authoring
//! mistakes (a `tools` list, a wrapped description) are still reported when
//! the block is not valid YAML.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::models::{ValidationIssue, ValidationReport};

static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^---\r?\n(.*?)\r?\n---").expect("valid regex"));
static TOP_LEVEL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w-]*):(.*)$").expect("valid regex"));

/// Keys every agent frontmatter block must define.
pub const REQUIRED_AGENT_FIELDS: [&str; 4] = ["name", "description", "tools", "model"];
/// Tools granted to generated executor agents.
pub const EXECUTOR_TOOLS: &str = "Read, Write, Edit, Bash, Glob, Grep";
/// Model generated executor agents run on.
pub const EXECUTOR_MODEL: &str = "haiku";
/// Tools granted to generated verifier agents. Verifiers never edit code.
pub const VERIFIER_TOOLS: &str = "Read, Bash, Glob, Grep";
/// Model generated verifier agents run on.
pub const VERIFIER_MODEL: &str = "sonnet";

/// What an agent file is for, told apart by its `name` suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgentRole {
    #[default]
    Executor,
    Verifier,
}

impl AgentRole {
    /// `*-verifier` names are verifiers; everything else is an executor.
    pub fn from_name(name: &str) -> Self {
        if name.trim().ends_with("-verifier") {
            AgentRole::Verifier
        } else {
            AgentRole::Executor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentRole::Executor => "executor",
            AgentRole::Verifier => "verifier",
        }
    }

    pub fn tools(&self) -> &'static str {
        match self {
            AgentRole::Executor => EXECUTOR_TOOLS,
            AgentRole::Verifier => VERIFIER_TOOLS,
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            AgentRole::Executor => EXECUTOR_MODEL,
            AgentRole::Verifier => VERIFIER_MODEL,
        }
    }

    /// The one model that is an error for this role, and why.
    fn rejected_model(&self) -> (&'static str, &'static str) {
        match self {
            AgentRole::Executor => (
                "sonnet",
                "executor agents run plans written for a lightweight model",
            ),
            AgentRole::Verifier => (
                "haiku",
                "verifier agents have to judge whether the product works",
            ),
        }
    }
}

/// One top-level frontmatter key with its inline value and any indented
/// continuation lines.
struct Entry<'a> {
    key: &'a str,
    value: &'a str,
    continuation: Vec<&'a str>,
}

fn entries(frontmatter: &str) -> Vec<Entry<'_>> {
    let mut entries: Vec<Entry<'_>> = Vec::new();
    for line in frontmatter.lines() {
        if let Some(caps) = TOP_LEVEL_KEY.captures(line) {
            let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            entries.push(Entry {
                key: key.as_str(),
                value: value.as_str().trim(),
                continuation: Vec::new(),
            });
        } else if let Some(last) = entries.last_mut() {
            if !line.trim().is_empty() {
                last.continuation.push(line.trim());
            }
        }
    }
    entries
}

/// Validate the frontmatter of an agent file. Never fails.
///
/// The [`AgentRole`] comes from the `name` key. Errors: missing delimiters
/// or unparseable block, a missing required key, `tools` written as a YAML
/// list, `model: sonnet` for an executor or `model: haiku` for a verifier.
/// Warnings: any other model besides the role's own and `opus`, a
/// description spanning several lines.
///
/// ```rust
/// use devplan_core::agent::validate_agent;
///
/// let report = validate_agent(
///     "---\nname: demo-executor\ndescription: Runs subtasks\ntools: Read, Write\nmodel: haiku\n---\n",
/// );
/// assert!(report.is_empty());
/// ```
pub fn validate_agent(content: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !content.starts_with("---") {
        report.extend([ValidationIssue::error(
            "Missing opening frontmatter delimiter (---)",
        )]);
    }

    let Some(frontmatter) = FRONTMATTER.captures(content).and_then(|caps| caps.get(1)) else {
        report.extend([ValidationIssue::error(
            "Could not parse YAML frontmatter; expected a block of `key: value` lines between `---` delimiters",
        )]);
        return report;
    };

    let entries = entries(frontmatter.as_str());
    let find = |key: &str| entries.iter().find(|e| e.key == key);
    let role = find("name")
        .map(|name| AgentRole::from_name(name.value))
        .unwrap_or_default();

    for field in REQUIRED_AGENT_FIELDS {
        if find(field).is_none() {
            report.extend([ValidationIssue::error(format!(
                "Missing required field: {field}"
            ))]);
        }
    }

    if let Some(tools) = find("tools") {
        if tools.value.is_empty() && tools.continuation.iter().any(|l| l.starts_with('-')) {
            report.extend([ValidationIssue::error(format!(
                "tools field is a YAML list but must be a comma-separated string, e.g. `tools: {}`",
                role.tools()
            ))]);
        }
    }

    if let Some(model) = find("model") {
        let name = model
            .value
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let (rejected, reason) = role.rejected_model();
        if name == rejected {
            report.extend([ValidationIssue::error(format!(
                "model is '{rejected}' but must be '{}'; {reason}",
                role.model()
            ))]);
        } else if !name.is_empty() && name != role.model() && name != "opus" {
            report.extend([ValidationIssue::warning(format!(
                "Unusual model '{name}'. Expected '{}' for {} agents.",
                role.model(),
                role.label()
            ))]);
        }
    }

    if let Some(description) = find("description") {
        if !description.continuation.is_empty() {
            report.extend([ValidationIssue::warning(
                "description field spans multiple lines. Should be a single line.",
            )]);
        }
    }

    debug!(
        "Validated agent file: {} errors, {} warnings",
        report.error_count(),
        report.warning_count()
    );
    report
}
