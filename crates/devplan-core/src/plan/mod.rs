//! Development plan generation, validation and progress tracking.
//!
//! - [`generate_plan`] assembles a plan skeleton from a brief and template
//! - [`validate_plan`] runs structural and prerequisite-graph checks
//! - [`read_plan_markdown`] reads a rendered `DEVELOPMENT_PLAN.md` back
//! - [`find_subtask`] and [`complete_subtask`] track progress on a plan

pub mod generator;
pub mod markdown;
pub mod progress;
pub mod validate;

pub use generator::{check_plan_structure, generate_plan};
pub use markdown::{read_plan_markdown, PlanDocument};
pub use progress::{
    complete_subtask, complete_subtask_at, find_subtask, SubtaskView, COMPLETED_AT_NOTE,
    SUMMARY_NOTE,
};
pub use validate::{
    validate_circular_dependencies, validate_plan, validate_prerequisites, validate_unique_ids,
};
