//! Declarative template configuration records.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::OrderedMap;

/// Keys every template config must declare.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "description", "version"];

/// One template's configuration as written in its YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TemplateConfig {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Parent template whose settings this one inherits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Project-type names this template recognizes
    #[serde(default)]
    pub project_types: Vec<String>,
    /// Technology defaults keyed by role (`language`, `framework`, ...)
    #[serde(default)]
    pub default_tech_stack: OrderedMap<String>,
    /// Ordered phase names
    #[serde(default)]
    pub default_phases: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    /// Working rules written into the generated rules file
    #[serde(default)]
    pub rules: Vec<String>,
}

impl TemplateConfig {
    /// Parse a YAML config for the template called `name`.
    ///
    /// The document must be a mapping that declares every required field;
    /// all missing fields are reported together.
    pub fn from_yaml(name: &str, content: &str) -> Result<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|source| PlannerError::Template {
                name: name.to_string(),
                source,
            })?;

        let Some(mapping) = value.as_mapping() else {
            return Err(PlannerError::configuration(format!(
                "Invalid config format for template '{name}': expected a mapping"
            )));
        };

        let missing: Vec<&str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|field| !mapping.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(PlannerError::configuration(format!(
                "Missing required fields in template '{name}': {}",
                missing.join(", ")
            )));
        }

        serde_yaml::from_value(value).map_err(|source| PlannerError::Template {
            name: name.to_string(),
            source,
        })
    }

    /// Whether `project_type` selects this template.
    ///
    /// The input is lowercased and trimmed, then matches a pattern when it
    /// equals the normalized pattern or is a substring of it. The reverse
    /// direction is not checked, so `"api"` matches `"REST API"` but
    /// `"rest api service"` does not.
    pub fn matches(&self, project_type: &str) -> bool {
        let input = project_type.trim().to_lowercase();
        self.project_types.iter().any(|pattern| {
            let pattern = pattern.trim().to_lowercase();
            input == pattern || pattern.contains(&input)
        })
    }

    /// Technology default for a role, if declared.
    pub fn tech_default(&self, key: &str) -> Option<&str> {
        self.default_tech_stack.get(key).map(String::as_str)
    }

    /// Overlay this config on top of an already resolved parent.
    ///
    /// Tech-stack defaults are merged key by key with the child winning,
    /// lists are inherited only when the child declares none, and rules are
    /// concatenated parent first.
    pub fn inherit_from(self, parent: &TemplateConfig) -> TemplateConfig {
        let mut tech_stack = parent.default_tech_stack.clone();
        for (key, value) in self.default_tech_stack {
            tech_stack.insert(key, value);
        }

        let or_parent = |own: Vec<String>, inherited: &Vec<String>| {
            if own.is_empty() {
                inherited.clone()
            } else {
                own
            }
        };

        let mut rules = parent.rules.clone();
        rules.extend(self.rules);

        TemplateConfig {
            name: self.name,
            description: self.description,
            version: self.version,
            extends: self.extends,
            project_types: or_parent(self.project_types, &parent.project_types),
            default_tech_stack: tech_stack,
            default_phases: or_parent(self.default_phases, &parent.default_phases),
            use_cases: or_parent(self.use_cases, &parent.use_cases),
            rules,
        }
    }
}
