//! Markdown rendering for models, documents and operation results.
//!
//! Domain models implement `Display` directly (a [`crate::models::Plan`]
//! renders as a complete `DEVELOPMENT_PLAN.md`). Wrapper types cover output
//! that needs more than one model or a different context:
//!
//! - [`documents`]: generated project files ([`RulesDocument`], [`ExecutorAgent`],
//!   [`VerifierAgent`])
//! - [`lesson`]: [`LessonDocument`] for sharing what verification found
//! - [`collections`]: [`TemplateList`] and validation report formatting
//! - [`results`]: [`CompletionResult`] and subtask lookups
//! - [`status`]: one-line [`OperationStatus`] messages
//! - [`datetime`]: [`LocalDateTime`] for timestamps shown to users
//!
//! ```rust
//! use devplan_core::display::OperationStatus;
//! use devplan_core::models::{Phase, Plan};
//!
//! let mut plan = Plan::new("Demo");
//! plan.phases.push(Phase::new("0", "Foundation", "Complete foundation phase"));
//! let markdown = plan.to_string();
//! assert!(markdown.starts_with("# Development Plan: Demo"));
//!
//! let status = OperationStatus::success("Plan rendered");
//! assert_eq!(status.to_string(), "Success: Plan rendered\n");
//! ```
//!
//! Everything here produces markdown, which the CLI renders for the
//! terminal and the MCP server returns as-is.

pub mod brief;
pub mod collections;
pub mod datetime;
pub mod documents;
pub mod lesson;
pub mod plan;
pub mod results;
pub mod status;

pub use collections::TemplateList;
pub use datetime::LocalDateTime;
pub use documents::{ExecutorAgent, RulesDocument, VerifierAgent, DEFAULT_TEST_COVERAGE};
pub use lesson::LessonDocument;
pub use results::CompletionResult;
pub use status::{OperationStatus, Outcome};
