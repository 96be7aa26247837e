//! Derivation of plan parts from a brief and its template.

pub mod phases;
pub mod tech_stack;

pub use phases::{derive_phases, derive_subtasks, derive_tasks, FOUNDATION};
pub use tech_stack::{check_conflicts, derive_tech_stack};
