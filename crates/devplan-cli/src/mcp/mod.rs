//! MCP server implementation for devplan
//!
//! Exposes the planning operations as Model Context Protocol tools so an
//! assistant can turn a brief into project documents and track progress
//! through a plan without touching the CLI.

use std::sync::Arc;

use anyhow::Result;
use devplan_core::Planner;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    FormatLesson, GenerateAgent, GenerateClaudeMd, GeneratePlan, GenerateVerifier, GetSubtask,
    ListTemplates, McpResult, ParseBrief, UpdateProgress, ValidateAgent, ValidatePlan,
};

const INSTRUCTIONS: &str = r#"devplan turns a PROJECT_BRIEF.md into the documents an assistant needs to build a project one session at a time.

## Core Concepts
- **Brief**: the project description, as PROJECT_BRIEF.md markdown or JSON
- **Plan**: DEVELOPMENT_PLAN.md, phases of tasks of subtasks with ids like `1.2.3`
- **Subtask**: one session of work with deliverables, success criteria and prerequisites
- **Templates**: project-type defaults (api, cli, library, web-app) for stack and phases

## Workflow
1. `devplan_parse_brief` to check what was understood from the brief
2. `devplan_generate_plan`, `devplan_generate_claude_md` and `devplan_generate_agent` to produce DEVELOPMENT_PLAN.md, CLAUDE.md and the executor agent
3. Fill in tasks and subtasks, then run `devplan_validate_plan` until it reports no errors
4. For each subtask: `devplan_get_subtask`, do the work, then `devplan_update_progress` and save the returned plan
5. When the plan is done, `devplan_generate_verifier` for a QA agent that checks the project against the brief; `devplan_format_lesson` turns what it finds into a LESSONS_LEARNED.md entry and a GitHub issue command

All tools take document content, not file paths. Save the markdown they return yourself."#;

/// MCP server for devplan
#[derive(Clone)]
pub struct DevplanMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DevplanMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "devplan_parse_brief",
        description = "Parse a PROJECT_BRIEF.md (markdown or JSON) into a structured brief. Returns every extracted field including constraints, requirements and tech preferences. Fails listing each missing required field (project_name, project_type, primary_goal, target_users, timeline)."
    )]
    async fn parse_brief(&self, params: Parameters<ParseBrief>) -> McpResult {
        self.handlers().parse_brief(params)
    }

    #[tool(
        name = "devplan_generate_plan",
        description = "Generate a DEVELOPMENT_PLAN.md skeleton from a brief. The template is chosen from the brief's project type unless one is named. Returns the plan with the derived tech stack and phase outline; tasks and subtasks are left for you to fill in."
    )]
    async fn generate_plan(&self, params: Parameters<GeneratePlan>) -> McpResult {
        self.handlers().generate_plan(params)
    }

    #[tool(
        name = "devplan_generate_claude_md",
        description = "Generate CLAUDE.md, the rules file an assistant follows while executing the plan: session workflow, git conventions, code standards and the required test coverage (default 80%). An optional language overrides the one derived from the brief."
    )]
    async fn generate_claude_md(&self, params: Parameters<GenerateClaudeMd>) -> McpResult {
        self.handlers().generate_claude_md(params)
    }

    #[tool(
        name = "devplan_generate_agent",
        description = "Generate the executor agent definition for the project. Save the result to .claude/agents/<project>-executor.md as stated at the end of the output. Project name and type default to the brief's."
    )]
    async fn generate_agent(&self, params: Parameters<GenerateAgent>) -> McpResult {
        self.handlers().generate_agent(params)
    }

    #[tool(
        name = "devplan_generate_verifier",
        description = "Generate the verifier agent for the project: a QA agent that checks the finished project against PROJECT_BRIEF.md with smoke tests, feature checks and edge cases, then writes a verification report and lessons learned. project_type (cli, api, web_app, library) picks the smoke tests and defaults to the brief's template. Save the result to .claude/agents/<project>-verifier.md."
    )]
    async fn generate_verifier(&self, params: Parameters<GenerateVerifier>) -> McpResult {
        self.handlers().generate_verifier(params)
    }

    #[tool(
        name = "devplan_format_lesson",
        description = "Format a lesson learned during verification: a dated LESSONS_LEARNED.md entry, a GitHub issue body and a ready-to-run `gh issue create` command. Title is 5-100 characters; issue, root_cause, fix and pattern at least 10 each. project_type defaults to 'all'."
    )]
    async fn format_lesson(&self, params: Parameters<FormatLesson>) -> McpResult {
        self.handlers().format_lesson(params)
    }

    #[tool(
        name = "devplan_validate_plan",
        description = "Validate DEVELOPMENT_PLAN.md content: structure, subtask ids, deliverable counts, prerequisites and dependency cycles. Errors make the plan invalid; with strict=true warnings do too. Use response_format='json' for a machine-readable summary."
    )]
    async fn validate_plan(&self, params: Parameters<ValidatePlan>) -> McpResult {
        self.handlers().validate_plan(params)
    }

    #[tool(
        name = "devplan_validate_agent",
        description = "Validate an executor or verifier agent file: frontmatter with name, description, tools and model. Names ending in -verifier are checked as verifiers (model sonnet), everything else as executors (model haiku)."
    )]
    async fn validate_agent(&self, params: Parameters<ValidateAgent>) -> McpResult {
        self.handlers().validate_agent(params)
    }

    #[tool(
        name = "devplan_list_templates",
        description = "List the available project templates with their project types, default stack and phases. Filter with project_type to see which template a brief would use."
    )]
    async fn list_templates(&self, params: Parameters<ListTemplates>) -> McpResult {
        self.handlers().list_templates(params)
    }

    #[tool(
        name = "devplan_get_subtask",
        description = "Get one subtask from DEVELOPMENT_PLAN.md content by id (X.Y.Z) with its phase, task, deliverables, success criteria and prerequisites. Use before starting a session to know exactly what to build."
    )]
    async fn get_subtask(&self, params: Parameters<GetSubtask>) -> McpResult {
        self.handlers().get_subtask(params)
    }

    #[tool(
        name = "devplan_update_progress",
        description = "Mark a subtask complete in DEVELOPMENT_PLAN.md content with completion notes (10-2000 characters). Checks its deliverables, records the notes and timestamp, and updates the progress table. Returns a status line followed by the full updated plan; write it back to DEVELOPMENT_PLAN.md. Sections other than the tech stack and phases are not kept, and a plan with unreadable parts such as an unknown status is refused."
    )]
    async fn update_progress(&self, params: Parameters<UpdateProgress>) -> McpResult {
        self.handlers().update_progress(params)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DevplanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "devplan".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: DevplanMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
