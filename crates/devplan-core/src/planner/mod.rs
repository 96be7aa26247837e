//! High-level planner API shared by the CLI and the MCP server.
//!
//! The [`Planner`] owns the template registry and exposes one method per
//! tool operation. Each method takes a [`crate::params`] record and returns
//! a domain value or display wrapper, leaving output formatting to the
//! interface:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │    Pipeline     │    │    Templates    │
//! │ (brief_handlers,│───▶│ (brief, derive, │───▶│   (registry,    │
//! │  plan_handlers) │    │  plan)          │    │    configs)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`brief_handlers`]: Brief parsing, rules file, agents, lessons, templates
//! - [`plan_handlers`]: Plan generation, validation and progress tracking
//!
//! # Usage
//!
//! ```rust
//! use devplan_core::{params::ListTemplates, PlannerBuilder};
//!
//! let planner = PlannerBuilder::new().builtin_only().build()?;
//! let templates = planner.list_templates(&ListTemplates {
//!     project_type: Some("CLI".to_string()),
//!     ..Default::default()
//! })?;
//! assert_eq!(templates[0].name, "cli");
//! # Ok::<(), devplan_core::PlannerError>(())
//! ```

pub mod brief_handlers;
pub mod builder;
pub mod plan_handlers;


use log::debug;

pub use brief_handlers::GeneratedAgent;
pub use builder::PlannerBuilder;
pub use plan_handlers::ProjectDocuments;

use crate::error::Result;
use crate::templates::{TemplateConfig, TemplateRegistry};

/// Main planner interface.
#[derive(Debug)]
pub struct Planner {
    registry: TemplateRegistry,
}

impl Planner {
    /// Creates a planner over an already loaded registry.
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Resolved template by explicit name, or by matching `project_type`.
    pub fn select_template(&self, project_type: &str, name: Option<&str>) -> Result<TemplateConfig> {
        match name {
            Some(name) => {
                debug!("Using requested template '{name}'");
                self.registry.resolve(name.trim())
            }
            None => self.registry.select(project_type),
        }
    }
}
