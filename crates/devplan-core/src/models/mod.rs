//! Data models for briefs, tech stacks and development plans.
//!
//! Ownership is tree-shaped: a [`Plan`] owns its [`Phase`]s, each phase owns
//! its [`Task`]s and each task owns its [`Subtask`]s. The one exception is
//! [`Subtask::prerequisites`], which refers to other subtasks by id only.
//!
//! Display implementations for these models live in [`crate::display`] so the
//! records stay plain data.
//!
//! # Validation
//!
//! Every entity exposes a `validate()` query that collects all findings
//! instead of stopping at the first one. Findings are
//! [`ValidationIssue`]s tagged with a [`Severity`]; nested findings are
//! prefixed with their owner, e.g. `Phase 1: Task 1.1: Subtask 1.1.1: ...`.
//!
//! ```rust
//! use devplan_core::models::{Phase, Severity};
//!
//! let phase = Phase::new("0", "Setup", "Complete setup phase");
//! let issues = phase.validate();
//!
//! assert!(issues.iter().any(|i| i.severity == Severity::Warning));
//! assert!(issues.iter().any(|i| i.message == "Phase '0' must have at least one task"));
//! ```

pub mod brief;
pub mod ordered;
pub mod plan;
pub mod status;
pub mod tech_stack;
pub mod validation;


pub use brief::Brief;
pub use ordered::OrderedMap;
pub use plan::{Phase, Plan, Subtask, Task};
pub use status::SubtaskStatus;
pub use tech_stack::TechStack;
pub use validation::{Severity, ValidationIssue, ValidationReport, ValidationSummary};
