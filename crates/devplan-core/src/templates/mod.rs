//! Project templates: declarative configs and the registry that selects them.
//!
//! Built-in templates are embedded YAML files. Users can add or override
//! templates by pointing the registry at a directory, see
//! [`TemplateRegistry::load_directory`].

pub mod config;
pub mod registry;

pub use config::TemplateConfig;
pub use registry::{TemplateRegistry, FALLBACK_TEMPLATE};
