//! Resolved technology choices for a plan.

use serde::{Deserialize, Serialize};

use super::OrderedMap;

/// Resolved technology choices.
///
/// Every optional field uses an empty string for "unset"; renderers omit
/// those rows rather than treating them as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TechStack {
    pub language: String,
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub testing: String,
    #[serde(default)]
    pub linting: String,
    #[serde(default)]
    pub type_checking: String,
    #[serde(default)]
    pub deployment: String,
    #[serde(default)]
    pub ci_cd: String,
    /// Extra tools keyed by role, in the order they were added
    #[serde(default)]
    pub additional_tools: OrderedMap<String>,
}

impl TechStack {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Vec<String> {
        if self.language.trim().is_empty() {
            vec!["language is required and cannot be empty".to_string()]
        } else {
            Vec::new()
        }
    }

    /// `(label, value)` pairs for every set field, in display order.
    ///
    /// Additional tools follow the fixed rows with their key as the label.
    pub fn rows(&self) -> Vec<(String, &str)> {
        let fixed = [
            ("Language", self.language.as_str()),
            ("Framework", self.framework.as_str()),
            ("Database", self.database.as_str()),
            ("Testing", self.testing.as_str()),
            ("Linting", self.linting.as_str()),
            ("Type Checking", self.type_checking.as_str()),
            ("Deployment", self.deployment.as_str()),
            ("CI/CD", self.ci_cd.as_str()),
        ];

        fixed
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .chain(
                self.additional_tools
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.as_str())),
            )
            .filter(|(_, value)| !value.trim().is_empty())
            .collect()
    }

    /// Inverse of [`TechStack::rows`]: set the field shown under `label`.
    /// Unknown labels become additional tools.
    pub fn set_row(&mut self, label: &str, value: impl Into<String>) {
        let value = value.into();
        let slot = match label {
            "Language" => &mut self.language,
            "Framework" => &mut self.framework,
            "Database" => &mut self.database,
            "Testing" => &mut self.testing,
            "Linting" => &mut self.linting,
            "Type Checking" => &mut self.type_checking,
            "Deployment" => &mut self.deployment,
            "CI/CD" => &mut self.ci_cd,
            _ => {
                self.additional_tools.insert(label, value);
                return;
            }
        };
        *slot = value;
    }
}
