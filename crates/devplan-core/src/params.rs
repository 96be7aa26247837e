//! Parameter structures for devplan operations.
//!
//! These records are shared by every interface. The CLI converts its clap
//! arguments into them and the MCP server deserializes them straight from
//! tool calls, wrapping each in a transparent newtype that adds the JSON
//! schema:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (McpParams<T>)  │───▶│ (serde, schema) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Schema derives are behind the `schema` feature so the core library does
//! not pull in `schemars` unless an interface needs it.
//!
//! Each record's `validate()` checks what serde cannot express (non-empty
//! content, id formats, length bounds) and reports the first offending field
//! as [`PlannerError::InvalidInput`].

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::plan::is_subtask_id;

/// Bounds on completion notes, in characters.
pub const MIN_COMPLETION_NOTES: usize = 10;
pub const MAX_COMPLETION_NOTES: usize = 2000;

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable markdown
    #[default]
    Markdown,
    /// Machine-readable JSON
    Json,
}

/// Kind of project a verifier tests, which decides its smoke tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    #[default]
    Cli,
    Api,
    #[serde(alias = "web", alias = "web-app")]
    WebApp,
    Library,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Cli => "cli",
            ProjectKind::Api => "api",
            ProjectKind::WebApp => "web_app",
            ProjectKind::Library => "library",
        }
    }

    /// Kind matching a template name, if the template is kind specific.
    pub fn from_template(name: &str) -> Option<Self> {
        match name {
            "cli" => Some(ProjectKind::Cli),
            "api" => Some(ProjectKind::Api),
            "web-app" => Some(ProjectKind::WebApp),
            "library" => Some(ProjectKind::Library),
            _ => None,
        }
    }
}

fn json_format() -> ResponseFormat {
    ResponseFormat::Json
}

fn default_test_coverage() -> u8 {
    crate::display::DEFAULT_TEST_COVERAGE
}

fn require_content(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("cannot be empty"));
    }
    Ok(())
}

fn require_length(field: &str, value: &str, min: usize, max: Option<usize>) -> Result<()> {
    let length = value.trim().chars().count();
    if length < min || max.is_some_and(|max| length > max) {
        let bounds = match max {
            Some(max) => format!("between {min} and {max}"),
            None => format!("at least {min}"),
        };
        return Err(PlannerError::invalid_input(field)
            .with_reason(format!("must be {bounds} characters, got {length}")));
    }
    Ok(())
}

fn require_subtask_id(value: &str) -> Result<()> {
    if !is_subtask_id(value.trim()) {
        return Err(PlannerError::invalid_input("subtask_id")
            .with_reason(format!("'{value}' must be in format X.Y.Z (e.g. 1.2.3)")));
    }
    Ok(())
}

fn require_coverage(value: u8) -> Result<()> {
    if value > 100 {
        return Err(PlannerError::invalid_input("test_coverage")
            .with_reason(format!("{value} is out of range; must be between 0 and 100")));
    }
    Ok(())
}

/// Parameters for parsing a project brief.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ParseBrief {
    /// PROJECT_BRIEF.md markdown, or a JSON-serialized brief
    pub content: String,
    /// Response format, `json` unless stated otherwise
    #[serde(default = "json_format")]
    pub response_format: ResponseFormat,
}

impl ParseBrief {
    pub fn validate(&self) -> Result<()> {
        require_content("content", &self.content)
    }
}

/// Parameters for generating a development plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GeneratePlan {
    /// PROJECT_BRIEF.md markdown, or a JSON-serialized brief
    pub brief_content: String,
    /// Template name to use instead of matching on the brief's project type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl GeneratePlan {
    pub fn validate(&self) -> Result<()> {
        require_content("brief_content", &self.brief_content)?;
        if let Some(template) = &self.template {
            require_content("template", template)?;
        }
        Ok(())
    }
}

/// Parameters for generating the CLAUDE.md rules file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateClaudeMd {
    /// PROJECT_BRIEF.md markdown, or a JSON-serialized brief
    pub brief_content: String,
    /// Primary language, overriding the one derived from the brief
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Required test coverage percentage (0-100)
    #[serde(default = "default_test_coverage")]
    pub test_coverage: u8,
}

impl Default for GenerateClaudeMd {
    fn default() -> Self {
        Self {
            brief_content: String::new(),
            language: None,
            test_coverage: default_test_coverage(),
        }
    }
}

impl GenerateClaudeMd {
    pub fn validate(&self) -> Result<()> {
        require_content("brief_content", &self.brief_content)?;
        require_coverage(self.test_coverage)
    }
}

/// Parameters for generating the executor agent file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateAgent {
    /// PROJECT_BRIEF.md markdown, or a JSON-serialized brief
    pub brief_content: String,
    /// Project name for the agent, defaults to the brief's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Project type used for template matching, defaults to the brief's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

impl GenerateAgent {
    pub fn validate(&self) -> Result<()> {
        require_content("brief_content", &self.brief_content)?;
        if let Some(name) = &self.project_name {
            require_content("project_name", name)?;
        }
        Ok(())
    }
}

/// Parameters for generating the verifier agent file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateVerifier {
    /// PROJECT_BRIEF.md markdown, or a JSON-serialized brief
    pub brief_content: String,
    /// Project name for the agent, defaults to the brief's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// cli, api, web_app or library; defaults to the kind of the template
    /// matching the brief's project type, then cli
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectKind>,
}

impl GenerateVerifier {
    pub fn validate(&self) -> Result<()> {
        require_content("brief_content", &self.brief_content)?;
        if let Some(name) = &self.project_name {
            require_content("project_name", name)?;
        }
        Ok(())
    }
}

/// Bounds on lesson fields, in characters.
pub const MIN_LESSON_TITLE: usize = 5;
pub const MAX_LESSON_TITLE: usize = 100;
pub const MIN_LESSON_FIELD: usize = 10;

fn all_project_types() -> String {
    "all".to_string()
}

/// Parameters for formatting a lesson learned during verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FormatLesson {
    /// Short title, 5 to 100 characters
    pub title: String,
    /// What went wrong or what was found
    pub issue: String,
    /// Why it happened
    pub root_cause: String,
    /// How it was resolved
    pub fix: String,
    /// The generalized lesson for future plans
    pub pattern: String,
    /// Project type the lesson applies to: cli, api, web, library or all
    #[serde(default = "all_project_types")]
    pub project_type: String,
}

impl Default for FormatLesson {
    fn default() -> Self {
        Self {
            title: String::new(),
            issue: String::new(),
            root_cause: String::new(),
            fix: String::new(),
            pattern: String::new(),
            project_type: all_project_types(),
        }
    }
}

impl FormatLesson {
    pub fn validate(&self) -> Result<()> {
        require_length("title", &self.title, MIN_LESSON_TITLE, Some(MAX_LESSON_TITLE))?;
        for (field, value) in [
            ("issue", &self.issue),
            ("root_cause", &self.root_cause),
            ("fix", &self.fix),
            ("pattern", &self.pattern),
        ] {
            require_length(field, value, MIN_LESSON_FIELD, None)?;
        }
        require_content("project_type", &self.project_type)
    }
}

/// Parameters for generating every project document at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateProject {
    /// PROJECT_BRIEF.md markdown, or a JSON-serialized brief
    pub brief_content: String,
    /// Template name to use instead of matching on the brief's project type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Required test coverage percentage (0-100)
    #[serde(default = "default_test_coverage")]
    pub test_coverage: u8,
}

impl Default for GenerateProject {
    fn default() -> Self {
        Self {
            brief_content: String::new(),
            template: None,
            test_coverage: default_test_coverage(),
        }
    }
}

impl GenerateProject {
    pub fn validate(&self) -> Result<()> {
        require_content("brief_content", &self.brief_content)?;
        require_coverage(self.test_coverage)?;
        if let Some(template) = &self.template {
            require_content("template", template)?;
        }
        Ok(())
    }
}

/// Parameters for validating a development plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ValidatePlan {
    /// DEVELOPMENT_PLAN.md content
    pub content: String,
    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ValidatePlan {
    pub fn validate(&self) -> Result<()> {
        require_content("content", &self.content)
    }
}

/// Parameters for validating an executor or verifier agent file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ValidateAgent {
    /// Agent markdown file content, including its frontmatter
    pub content: String,
}

impl ValidateAgent {
    pub fn validate(&self) -> Result<()> {
        require_content("content", &self.content)
    }
}

/// Parameters for listing templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTemplates {
    /// Only list templates matching this project type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Parameters for looking up a subtask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GetSubtask {
    /// DEVELOPMENT_PLAN.md content
    pub plan_content: String,
    /// Subtask id in `X.Y.Z` format
    pub subtask_id: String,
    /// Response format, `json` unless stated otherwise
    #[serde(default = "json_format")]
    pub response_format: ResponseFormat,
}

impl GetSubtask {
    pub fn validate(&self) -> Result<()> {
        require_content("plan_content", &self.plan_content)?;
        require_subtask_id(&self.subtask_id)
    }
}

/// Parameters for marking a subtask complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateProgress {
    /// Current DEVELOPMENT_PLAN.md content
    pub plan_content: String,
    /// Subtask id in `X.Y.Z` format
    pub subtask_id: String,
    /// What was done, 10 to 2000 characters
    pub completion_notes: String,
}

impl UpdateProgress {
    pub fn validate(&self) -> Result<()> {
        require_content("plan_content", &self.plan_content)?;
        require_subtask_id(&self.subtask_id)?;
        require_length(
            "completion_notes",
            &self.completion_notes,
            MIN_COMPLETION_NOTES,
            Some(MAX_COMPLETION_NOTES),
        )
    }
}
