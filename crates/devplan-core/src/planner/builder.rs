//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Planner;
use crate::error::{PlannerError, Result};
use crate::templates::TemplateRegistry;

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    templates_dir: Option<PathBuf>,
    user_templates: bool,
}

impl PlannerBuilder {
    /// Creates a new builder that loads built-in and user templates.
    pub fn new() -> Self {
        Self {
            templates_dir: None,
            user_templates: true,
        }
    }

    /// Sets a directory of additional templates.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_CONFIG_HOME/devplan/templates` or `~/.config/devplan/templates`,
    /// when that directory exists.
    pub fn with_templates_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.templates_dir = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    /// Use only the built-in templates, ignoring the XDG config directory.
    pub fn builtin_only(mut self) -> Self {
        self.user_templates = false;
        self.templates_dir = None;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` if an explicit templates directory
    /// does not exist, and `PlannerError::Template` or
    /// `PlannerError::Configuration` if a template config is malformed or
    /// extends a template that is missing or part of a cycle.
    pub fn build(self) -> Result<Planner> {
        let mut registry = TemplateRegistry::builtin()?;

        let dir = match self.templates_dir {
            Some(dir) if !dir.is_dir() => {
                return Err(PlannerError::not_found(
                    "Templates directory",
                    dir.display().to_string(),
                ));
            }
            Some(dir) => Some(dir),
            None if self.user_templates => Self::default_templates_dir(),
            None => None,
        };

        if let Some(dir) = dir {
            registry.load_directory(&dir)?;
        }
        registry.check_inheritance()?;

        debug!("Planner ready with templates: {}", registry.names().join(", "));
        Ok(Planner::new(registry))
    }

    /// Returns the user templates directory if it exists.
    fn default_templates_dir() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("devplan")
            .find_config_file("templates")
            .filter(|dir| dir.is_dir())
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
