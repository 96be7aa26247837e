//! Project brief model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default team size when the brief leaves it blank.
pub const DEFAULT_TEAM_SIZE: &str = "1";

fn default_team_size() -> String {
    DEFAULT_TEAM_SIZE.to_string()
}

/// Normalized project brief parsed from a `PROJECT_BRIEF.md` document.
///
/// Built once by [`crate::brief::assemble_brief`] and not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Brief {
    // Basic information
    pub project_name: String,
    /// Checked project types joined with `", "`
    pub project_type: String,
    pub primary_goal: String,
    pub target_users: String,
    pub timeline: String,
    #[serde(default = "default_team_size")]
    pub team_size: String,

    // Functional requirements
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub nice_to_have_features: Vec<String>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
    #[serde(default)]
    pub known_challenges: Vec<String>,

    // Technical constraints
    #[serde(default)]
    pub must_use_tech: Vec<String>,
    #[serde(default)]
    pub cannot_use_tech: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_constraints: Option<String>,

    // Quality requirements
    #[serde(default)]
    pub performance_requirements: BTreeMap<String, String>,
    #[serde(default)]
    pub security_requirements: BTreeMap<String, String>,
    #[serde(default)]
    pub scalability_requirements: BTreeMap<String, String>,
    #[serde(default)]
    pub availability_requirements: BTreeMap<String, String>,

    // Team and resources
    /// Rendered as `"Role: Yes, Role2: No"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_composition: Option<String>,
    #[serde(default)]
    pub existing_knowledge: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_budget: Option<String>,
    #[serde(default)]
    pub infrastructure_access: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_vision: Option<String>,
}

impl Brief {
    /// Create a brief with the required fields and empty collections.
    pub fn new(
        project_name: impl Into<String>,
        project_type: impl Into<String>,
        primary_goal: impl Into<String>,
        target_users: impl Into<String>,
        timeline: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_type: project_type.into(),
            primary_goal: primary_goal.into(),
            target_users: target_users.into(),
            timeline: timeline.into(),
            team_size: default_team_size(),
            key_features: Vec::new(),
            nice_to_have_features: Vec::new(),
            success_criteria: Vec::new(),
            known_challenges: Vec::new(),
            must_use_tech: Vec::new(),
            cannot_use_tech: Vec::new(),
            deployment_target: None,
            budget_constraints: None,
            performance_requirements: BTreeMap::new(),
            security_requirements: BTreeMap::new(),
            scalability_requirements: BTreeMap::new(),
            availability_requirements: BTreeMap::new(),
            team_composition: None,
            existing_knowledge: Vec::new(),
            learning_budget: None,
            infrastructure_access: Vec::new(),
            architecture_vision: None,
        }
    }

    /// Names of required fields that are empty after trimming, in the fixed
    /// check order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("project_name", &self.project_name),
            ("project_type", &self.project_type),
            ("primary_goal", &self.primary_goal),
            ("target_users", &self.target_users),
            ("timeline", &self.timeline),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validation messages for every missing required field.
    pub fn validate(&self) -> Vec<String> {
        self.missing_required_fields()
            .into_iter()
            .map(|name| format!("{name} is required and cannot be empty"))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing_required_fields().is_empty()
    }
}
