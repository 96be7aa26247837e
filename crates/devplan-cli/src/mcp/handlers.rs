//! MCP tool handlers implementation

use std::sync::Arc;

use devplan_core::{params as core, params::ResponseFormat, Planner};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::errors::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter records are wrapped in a transparent serde container so the
// MCP layer can add its JSON schema without the core types depending on rmcp.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type ParseBrief = McpParams<core::ParseBrief>;
pub type GeneratePlan = McpParams<core::GeneratePlan>;
pub type GenerateClaudeMd = McpParams<core::GenerateClaudeMd>;
pub type GenerateAgent = McpParams<core::GenerateAgent>;
pub type GenerateVerifier = McpParams<core::GenerateVerifier>;
pub type FormatLesson = McpParams<core::FormatLesson>;
pub type ValidatePlan = McpParams<core::ValidatePlan>;
pub type ValidateAgent = McpParams<core::ValidateAgent>;
pub type ListTemplates = McpParams<core::ListTemplates>;
pub type GetSubtask = McpParams<core::GetSubtask>;
pub type UpdateProgress = McpParams<core::UpdateProgress>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(content: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(content.into())]))
}

fn json<T: Serialize>(value: &T) -> McpResult {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(format!("Failed to serialize response: {e}"), None))?;
    text(json)
}

/// Respond with `value` as JSON or as its markdown rendering.
fn formatted<T, D>(format: ResponseFormat, value: &T, markdown: D) -> McpResult
where
    T: Serialize,
    D: FnOnce(&T) -> String,
{
    match format {
        ResponseFormat::Json => json(value),
        ResponseFormat::Markdown => text(markdown(value)),
    }
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    pub fn parse_brief(&self, Parameters(params): Parameters<ParseBrief>) -> McpResult {
        let params = params.as_ref();
        debug!("parse_brief: {} bytes", params.content.len());

        let brief = self
            .planner
            .parse_brief(params)
            .map_err(|e| to_mcp_error("Failed to parse brief", &e))?;
        formatted(params.response_format, &brief, ToString::to_string)
    }

    pub fn generate_plan(&self, Parameters(params): Parameters<GeneratePlan>) -> McpResult {
        let params = params.as_ref();
        debug!("generate_plan: template={:?}", params.template);

        let plan = self
            .planner
            .generate_plan(params)
            .map_err(|e| to_mcp_error("Failed to generate plan", &e))?;
        formatted(params.response_format, &plan, ToString::to_string)
    }

    pub fn generate_claude_md(
        &self,
        Parameters(params): Parameters<GenerateClaudeMd>,
    ) -> McpResult {
        let params = params.as_ref();
        debug!("generate_claude_md: language={:?}", params.language);

        let rules = self
            .planner
            .generate_claude_md(params)
            .map_err(|e| to_mcp_error("Failed to generate CLAUDE.md", &e))?;
        text(rules)
    }

    pub fn generate_agent(&self, Parameters(params): Parameters<GenerateAgent>) -> McpResult {
        let params = params.as_ref();
        debug!("generate_agent: project_name={:?}", params.project_name);

        let agent = self
            .planner
            .generate_agent(params)
            .map_err(|e| to_mcp_error("Failed to generate agent", &e))?;
        text(agent.content)
    }

    pub fn generate_verifier(
        &self,
        Parameters(params): Parameters<GenerateVerifier>,
    ) -> McpResult {
        let params = params.as_ref();
        debug!("generate_verifier: project_type={:?}", params.project_type);

        let verifier = self
            .planner
            .generate_verifier(params)
            .map_err(|e| to_mcp_error("Failed to generate verifier", &e))?;
        text(verifier.content)
    }

    pub fn format_lesson(&self, Parameters(params): Parameters<FormatLesson>) -> McpResult {
        let params = params.as_ref();
        debug!("format_lesson: {}", params.title);

        let lesson = self
            .planner
            .format_lesson(params)
            .map_err(|e| to_mcp_error("Failed to format lesson", &e))?;
        text(lesson)
    }

    pub fn validate_plan(&self, Parameters(params): Parameters<ValidatePlan>) -> McpResult {
        let params = params.as_ref();
        debug!("validate_plan: strict={}", params.strict);

        let report = self
            .planner
            .validate_plan(params)
            .map_err(|e| to_mcp_error("Failed to validate plan", &e))?;
        match params.response_format {
            ResponseFormat::Json => json(&report.summary(params.strict)),
            ResponseFormat::Markdown => text(report.to_string()),
        }
    }

    pub fn validate_agent(&self, Parameters(params): Parameters<ValidateAgent>) -> McpResult {
        let report = self
            .planner
            .validate_agent(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to validate agent", &e))?;
        text(report.to_string())
    }

    pub fn list_templates(&self, Parameters(params): Parameters<ListTemplates>) -> McpResult {
        let params = params.as_ref();
        debug!("list_templates: project_type={:?}", params.project_type);

        let templates = self
            .planner
            .list_templates(params)
            .map_err(|e| to_mcp_error("Failed to list templates", &e))?;
        match params.response_format {
            ResponseFormat::Json => json(&templates.0),
            ResponseFormat::Markdown => text(templates.to_string()),
        }
    }

    pub fn get_subtask(&self, Parameters(params): Parameters<GetSubtask>) -> McpResult {
        let params = params.as_ref();
        debug!("get_subtask: {}", params.subtask_id);

        let view = self
            .planner
            .get_subtask(params)
            .map_err(|e| to_mcp_error("Failed to get subtask", &e))?;
        formatted(params.response_format, &view, ToString::to_string)
    }

    /// Responds with the status line followed by the full updated plan.
    pub fn update_progress(&self, Parameters(params): Parameters<UpdateProgress>) -> McpResult {
        let params = params.as_ref();
        debug!("update_progress: {}", params.subtask_id);

        let result = self
            .planner
            .update_progress(params)
            .map_err(|e| to_mcp_error("Failed to update progress", &e))?;
        Ok(CallToolResult::success(vec![
            Content::text(result.status().to_string()),
            Content::text(result.to_string()),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use devplan_core::PlannerBuilder;

    use super::*;

    const BRIEF_JSON: &str = r#"{"project_name": "Taskline", "project_type": "CLI Tool",
        "primary_goal": "Track tasks", "target_users": "Developers", "timeline": "2 weeks"}"#;

    fn handlers() -> McpHandlers {
        let planner = PlannerBuilder::new()
            .builtin_only()
            .build()
            .expect("Failed to create planner");
        McpHandlers::new(Arc::new(planner))
    }

    fn params<T: JsonSchema + serde::de::DeserializeOwned>(
        value: serde_json::Value,
    ) -> Parameters<McpParams<T>> {
        Parameters(serde_json::from_value(value).expect("valid params"))
    }

    fn first_text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).expect("serializable result");
        value["content"][0]["text"]
            .as_str()
            .expect("text content")
            .to_string()
    }

    #[test]
    fn test_parse_brief_defaults_to_json() {
        let result = handlers()
            .parse_brief(params(serde_json::json!({ "content": BRIEF_JSON })))
            .expect("tool succeeds");

        let value: serde_json::Value =
            serde_json::from_str(&first_text(&result)).expect("json response");
        assert_eq!(value["project_name"], "Taskline");
    }

    #[test]
    fn test_generate_plan_markdown() {
        let result = handlers()
            .generate_plan(params(serde_json::json!({ "brief_content": BRIEF_JSON })))
            .expect("tool succeeds");

        let markdown = first_text(&result);
        assert!(markdown.starts_with("# Development Plan: Taskline"));
        assert!(markdown.contains("## Phase 0: Foundation"));
    }

    #[test]
    fn test_invalid_subtask_id_is_invalid_params() {
        let err = handlers()
            .get_subtask(params(serde_json::json!({
                "plan_content": "# Development Plan: X",
                "subtask_id": "1.2",
            })))
            .unwrap_err();

        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("X.Y.Z"));
    }

    #[test]
    fn test_generate_verifier_for_api() {
        let result = handlers()
            .generate_verifier(params(serde_json::json!({
                "brief_content": BRIEF_JSON,
                "project_type": "api",
            })))
            .expect("tool succeeds");

        let agent = first_text(&result);
        assert!(agent.starts_with("---\nname: taskline-verifier\n"));
        assert!(agent.contains("model: sonnet"));
        assert!(agent.contains("curl -i http://localhost:8000/health"));
    }

    #[test]
    fn test_format_lesson_short_title_is_invalid_params() {
        let err = handlers()
            .format_lesson(params(serde_json::json!({
                "title": "Bug",
                "issue": "Crashed on empty input",
                "root_cause": "No edge case in plan",
                "fix": "Added a guard clause",
                "pattern": "Always test empty input",
            })))
            .unwrap_err();

        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("title"));
    }

    #[test]
    fn test_validate_plan_json_summary() {
        let result = handlers()
            .validate_plan(params(serde_json::json!({
                "content": "# Development Plan: X\n",
                "response_format": "json",
            })))
            .expect("tool succeeds");

        let value: serde_json::Value =
            serde_json::from_str(&first_text(&result)).expect("json response");
        assert_eq!(value["valid"], false);
        assert_eq!(value["strict"], false);
    }
}
