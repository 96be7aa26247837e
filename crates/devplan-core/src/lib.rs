//! Core library for the devplan development-plan generator.
//!
//! This crate turns a `PROJECT_BRIEF.md` into a phased development plan,
//! a `CLAUDE.md` rules file and executor and verifier agents, and tracks
//! progress on the resulting `DEVELOPMENT_PLAN.md`.
//!
//! # Pipeline
//!
//! ```text
//! brief markdown ──▶ sections ──▶ Brief ──▶ template ──▶ tech stack + phases ──▶ Plan
//!   (markdown)        (brief)              (templates)      (derive)            (plan)
//! ```
//!
//! - **Scanning** ([`markdown`]): headings, `**Field**:` lines, lists, checkboxes
//! - **Brief** ([`brief`]): section extractors and the assembled [`models::Brief`]
//! - **Templates** ([`templates`]): embedded and user YAML configs with `extends`
//! - **Derivation** ([`derive`]): tech stack and Foundation-first phases
//! - **Plans** ([`plan`]): generation, validation, reading and progress
//! - **Display** ([`display`]): markdown rendering for every generated document
//!
//! # Quick Start
//!
//! ```rust
//! use devplan_core::{params::GeneratePlan, PlannerBuilder};
//!
//! let planner = PlannerBuilder::new().builtin_only().build()?;
//!
//! let plan = planner.generate_plan(&GeneratePlan {
//!     brief_content: r#"{"project_name": "Taskline", "project_type": "CLI Tool",
//!         "primary_goal": "Track tasks", "target_users": "Developers",
//!         "timeline": "2 weeks"}"#
//!         .to_string(),
//!     ..Default::default()
//! })?;
//!
//! let markdown = plan.to_string();
//! assert!(markdown.starts_with("# Development Plan: Taskline"));
//! # Ok::<(), devplan_core::PlannerError>(())
//! ```

pub mod agent;
pub mod brief;
pub mod derive;
pub mod display;
pub mod error;
pub mod markdown;
pub mod models;
pub mod operations;
pub mod params;
pub mod plan;
pub mod planner;
pub mod templates;

// Re-export commonly used types
pub use display::{CompletionResult, OperationStatus, TemplateList};
pub use error::{PlannerError, Result};
pub use models::{
    Brief, Phase, Plan, Severity, Subtask, SubtaskStatus, Task, TechStack, ValidationIssue,
    ValidationReport,
};
pub use params::ResponseFormat;
pub use plan::{PlanDocument, SubtaskView};
pub use planner::{GeneratedAgent, Planner, PlannerBuilder, ProjectDocuments};
pub use templates::{TemplateConfig, TemplateRegistry};
