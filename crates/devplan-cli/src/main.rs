//! devplan CLI application
//!
//! Command-line interface for turning project briefs into development plans,
//! and the MCP server exposing the same operations.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use devplan_core::PlannerBuilder;
use log::info;
use mcp::{run_stdio_server, DevplanMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        templates_dir,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_templates_dir(templates_dir)
        .build()
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("devplan started");

    match command {
        Parse(args) => Cli::new(planner, renderer).parse(&args),
        Generate(args) => Cli::new(planner, renderer).generate(&args),
        Validate(args) => Cli::new(planner, renderer).validate(&args),
        Templates(args) => Cli::new(planner, renderer).templates(&args),
        Subtask(args) => Cli::new(planner, renderer).subtask(&args),
        Complete(args) => Cli::new(planner, renderer).complete(&args),
        Lesson(args) => Cli::new(planner, renderer).lesson(&args),
        Serve => {
            info!("Starting devplan MCP server");
            run_stdio_server(DevplanMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
    }
}
