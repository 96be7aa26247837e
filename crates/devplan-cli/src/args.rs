use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    CompleteArgs, GenerateArgs, LessonArgs, ParseArgs, SubtaskArgs, TemplatesArgs, ValidateArgs,
};

/// Turn a project brief into a phased development plan
///
/// devplan reads a PROJECT_BRIEF.md, picks a project template, and writes a
/// DEVELOPMENT_PLAN.md together with a CLAUDE.md rules file and the executor
/// and verifier agents. It also validates plans, tracks subtask progress, and can run as
/// an MCP server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "devplan")]
pub struct Args {
    /// Directory of additional template configs. Defaults to
    /// $XDG_CONFIG_HOME/devplan/templates when it exists
    #[arg(long, global = true)]
    pub templates_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the devplan CLI
///
/// - `parse`, `generate`: read a brief and produce documents
/// - `validate`, `templates`: inspect plans, agents and templates
/// - `subtask`, `complete`: track progress in a plan file
/// - `lesson`: format a lesson found during verification
/// - `serve`: start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a project brief and show the extracted fields
    #[command(alias = "p")]
    Parse(ParseArgs),
    /// Generate DEVELOPMENT_PLAN.md, CLAUDE.md and the executor and verifier agents
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Validate a development plan or an agent file
    #[command(alias = "v")]
    Validate(ValidateArgs),
    /// List available project templates
    #[command(aliases = ["t", "ls"])]
    Templates(TemplatesArgs),
    /// Show a subtask with its phase, task and branch
    #[command(alias = "s")]
    Subtask(SubtaskArgs),
    /// Mark a subtask complete and rewrite the plan file
    #[command(alias = "c")]
    Complete(CompleteArgs),
    /// Format a lesson learned for LESSONS_LEARNED.md and a GitHub issue
    #[command(alias = "l")]
    Lesson(LessonArgs),
    /// Start the MCP server
    Serve,
}
