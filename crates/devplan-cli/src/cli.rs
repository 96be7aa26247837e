//! Subcommand arguments and their execution.
//!
//! Each subcommand keeps its clap attributes here and converts into a core
//! parameter record before reaching the planner:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Core parameter types stay free of clap derives, and the checks in their
//! `validate()` methods apply to the CLI and the MCP server alike. File
//! reading and writing happen only in this layer.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Args;
use devplan_core::{
    display::OperationStatus,
    operations::{BRIEF_FILE, PLAN_FILE},
    params::{
        FormatLesson, GenerateProject, GetSubtask, ListTemplates, ParseBrief, ResponseFormat,
        UpdateProgress, ValidateAgent, ValidatePlan,
    },
    Planner,
};
use log::info;
use serde::Serialize;

use crate::renderer::TerminalRenderer;

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn response_format(json: bool) -> ResponseFormat {
    if json {
        ResponseFormat::Json
    } else {
        ResponseFormat::Markdown
    }
}

/// Parse a project brief
#[derive(Args)]
pub struct ParseArgs {
    /// Brief file, markdown or JSON
    #[arg(default_value = BRIEF_FILE)]
    pub brief: PathBuf,
    /// Print the structured brief as JSON
    #[arg(long)]
    pub json: bool,
}

impl ParseArgs {
    pub fn to_params(&self) -> Result<ParseBrief> {
        Ok(ParseBrief {
            content: read_file(&self.brief)?,
            response_format: response_format(self.json),
        })
    }
}

/// Generate the project documents from a brief
///
/// Writes CLAUDE.md, DEVELOPMENT_PLAN.md,
/// .claude/agents/<project>-executor.md and
/// .claude/agents/<project>-verifier.md under the output directory. Existing
/// files are left untouched unless --force is given.
#[derive(Args)]
pub struct GenerateArgs {
    /// Brief file, markdown or JSON
    #[arg(default_value = BRIEF_FILE)]
    pub brief: PathBuf,
    /// Directory the documents are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Template to use instead of matching on the brief's project type
    #[arg(short, long)]
    pub template: Option<String>,
    /// Required test coverage percentage written into CLAUDE.md
    #[arg(long, default_value_t = devplan_core::display::DEFAULT_TEST_COVERAGE)]
    pub test_coverage: u8,
    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl GenerateArgs {
    pub fn to_params(&self) -> Result<GenerateProject> {
        Ok(GenerateProject {
            brief_content: read_file(&self.brief)?,
            template: self.template.clone(),
            test_coverage: self.test_coverage,
        })
    }
}

/// Validate a development plan or an agent file
///
/// Exits with a non-zero status when the file has errors, or any finding at
/// all with --strict.
#[derive(Args)]
pub struct ValidateArgs {
    /// File to validate
    #[arg(default_value = PLAN_FILE)]
    pub file: PathBuf,
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
    /// Validate the file as an executor or verifier agent instead of a plan
    #[arg(long)]
    pub agent: bool,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// List templates
#[derive(Args)]
pub struct TemplatesArgs {
    /// Only list templates matching this project type
    #[arg(short, long)]
    pub project_type: Option<String>,
    /// Print the resolved template configs as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<&TemplatesArgs> for ListTemplates {
    fn from(val: &TemplatesArgs) -> Self {
        ListTemplates {
            project_type: val.project_type.clone(),
            response_format: response_format(val.json),
        }
    }
}

/// Show a subtask
#[derive(Args)]
pub struct SubtaskArgs {
    /// Subtask id in X.Y.Z format
    pub id: String,
    /// Plan file to read
    #[arg(long, default_value = PLAN_FILE)]
    pub plan: PathBuf,
    /// Print the subtask as JSON
    #[arg(long)]
    pub json: bool,
}

impl SubtaskArgs {
    pub fn to_params(&self) -> Result<GetSubtask> {
        Ok(GetSubtask {
            plan_content: read_file(&self.plan)?,
            subtask_id: self.id.clone(),
            response_format: response_format(self.json),
        })
    }
}

/// Mark a subtask complete
///
/// The plan file is rewritten from its parsed form, so sections other than
/// the technology stack and the phases are not kept.
#[derive(Args)]
pub struct CompleteArgs {
    /// Subtask id in X.Y.Z format
    pub id: String,
    /// What was done, 10 to 2000 characters
    #[arg(short, long)]
    pub notes: String,
    /// Plan file to update in place
    #[arg(long, default_value = PLAN_FILE)]
    pub plan: PathBuf,
}

impl CompleteArgs {
    pub fn to_params(&self) -> Result<UpdateProgress> {
        Ok(UpdateProgress {
            plan_content: read_file(&self.plan)?,
            subtask_id: self.id.clone(),
            completion_notes: self.notes.clone(),
        })
    }
}

/// Format a lesson learned
#[derive(Args)]
pub struct LessonArgs {
    /// Short title, 5 to 100 characters
    #[arg(long)]
    pub title: String,
    /// What went wrong or what was found
    #[arg(long)]
    pub issue: String,
    /// Why it happened
    #[arg(long)]
    pub root_cause: String,
    /// How it was resolved
    #[arg(long)]
    pub fix: String,
    /// The generalized lesson for future plans
    #[arg(long)]
    pub pattern: String,
    /// Project type the lesson applies to: cli, api, web, library or all
    #[arg(short, long, default_value = "all")]
    pub project_type: String,
}

impl From<&LessonArgs> for FormatLesson {
    fn from(val: &LessonArgs) -> Self {
        FormatLesson {
            title: val.title.clone(),
            issue: val.issue.clone(),
            root_cause: val.root_cause.clone(),
            fix: val.fix.clone(),
            pattern: val.pattern.clone(),
            project_type: val.project_type.clone(),
        }
    }
}

/// Runs subcommands against a planner and renders their output.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
        Ok(())
    }

    pub fn parse(&self, args: &ParseArgs) -> Result<()> {
        info!("Parsing brief {}", args.brief.display());
        let params = args.to_params()?;
        let brief = self.planner.parse_brief(&params)?;

        match params.response_format {
            ResponseFormat::Json => self.print_json(&brief),
            ResponseFormat::Markdown => self.renderer.render(&brief.to_string()),
        }
    }

    pub fn generate(&self, args: &GenerateArgs) -> Result<()> {
        info!("Generating project documents from {}", args.brief.display());
        let documents = self.planner.generate_project(&args.to_params()?)?;
        let files = documents.files();

        if !args.force {
            let existing: Vec<String> = files
                .iter()
                .map(|(path, _)| args.output_dir.join(path))
                .filter(|path| path.exists())
                .map(|path| path.display().to_string())
                .collect();
            if !existing.is_empty() {
                bail!(
                    "Refusing to overwrite {}; use --force to replace",
                    existing.join(", ")
                );
            }
        }

        for (relative, content) in &files {
            let path = args.output_dir.join(relative);
            write_file(&path, content)?;
            self.renderer
                .render(&OperationStatus::written(&path).to_string())?;
        }
        Ok(())
    }

    pub fn validate(&self, args: &ValidateArgs) -> Result<()> {
        info!("Validating {}", args.file.display());
        let content = read_file(&args.file)?;

        let report = if args.agent {
            self.planner.validate_agent(&ValidateAgent { content })?
        } else {
            self.planner.validate_plan(&ValidatePlan {
                content,
                strict: args.strict,
                response_format: response_format(args.json),
            })?
        };

        if args.json {
            self.print_json(&report.summary(args.strict))?;
        } else {
            self.renderer.render(&report.to_string())?;
        }

        if !report.passes(args.strict) {
            bail!(
                "{} failed validation with {} errors and {} warnings",
                args.file.display(),
                report.error_count(),
                report.warning_count()
            );
        }
        Ok(())
    }

    pub fn templates(&self, args: &TemplatesArgs) -> Result<()> {
        let params = ListTemplates::from(args);
        let templates = self.planner.list_templates(&params)?;

        match params.response_format {
            ResponseFormat::Json => self.print_json(&templates.0),
            ResponseFormat::Markdown => self.renderer.render(&templates.to_string()),
        }
    }

    pub fn subtask(&self, args: &SubtaskArgs) -> Result<()> {
        let params = args.to_params()?;
        let view = self.planner.get_subtask(&params)?;

        match params.response_format {
            ResponseFormat::Json => self.print_json(&view),
            ResponseFormat::Markdown => self.renderer.render(&view.to_string()),
        }
    }

    pub fn complete(&self, args: &CompleteArgs) -> Result<()> {
        info!("Completing subtask {} in {}", args.id, args.plan.display());
        let result = self.planner.update_progress(&args.to_params()?)?;

        write_file(&args.plan, &result.to_string())?;
        self.renderer.render(&result.status().to_string())
    }

    pub fn lesson(&self, args: &LessonArgs) -> Result<()> {
        let lesson = self.planner.format_lesson(&FormatLesson::from(args))?;
        self.renderer.render(&lesson)
    }
}
