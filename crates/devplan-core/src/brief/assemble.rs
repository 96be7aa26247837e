//! Merge extractor output into a validated [`Brief`].

use std::collections::BTreeMap;

use log::debug;

use super::extract::{
    extract_basic_info, extract_quality_requirements, extract_requirements, extract_team_info,
    extract_tech_constraints, Fields,
};
use crate::error::{PlannerError, Result};
use crate::markdown::Sections;
use crate::models::brief::DEFAULT_TEAM_SIZE;
use crate::models::{Brief, OrderedMap};

/// The five extractor outputs for one brief document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedBrief {
    pub basic_info: Fields,
    pub requirements: Fields,
    pub tech_constraints: Fields,
    pub quality_requirements: Fields,
    pub team_info: Fields,
}

impl ExtractedBrief {
    /// Run every extractor over the scanned sections.
    pub fn from_sections(sections: &Sections) -> Self {
        Self {
            basic_info: extract_basic_info(sections),
            requirements: extract_requirements(sections),
            tech_constraints: extract_tech_constraints(sections),
            quality_requirements: extract_quality_requirements(sections),
            team_info: extract_team_info(sections),
        }
    }
}

fn to_btree(pairs: OrderedMap<String>) -> BTreeMap<String, String> {
    pairs.into_iter().collect()
}

fn optional_join(items: Vec<String>) -> Option<String> {
    (!items.is_empty()).then(|| items.join(", "))
}

/// Render checkbox roles as `"Role: Yes, Role2: No"` in insertion order.
fn team_composition(flags: &OrderedMap<bool>) -> Option<String> {
    let parts: Vec<String> = flags
        .iter()
        .map(|(role, checked)| format!("{role}: {}", if *checked { "Yes" } else { "No" }))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Build a [`Brief`] from extractor output.
///
/// Fails with a validation error listing every empty required field in the
/// fixed order project name, project type, primary goal, target users,
/// timeline. Values of the wrong shape are treated as empty.
pub fn assemble_brief(extracted: &ExtractedBrief) -> Result<Brief> {
    let basic = &extracted.basic_info;
    let requirements = &extracted.requirements;
    let tech = &extracted.tech_constraints;
    let quality = &extracted.quality_requirements;
    let team = &extracted.team_info;

    let team_size = basic.text("team_size");

    let brief = Brief {
        project_name: basic.text("project_name"),
        project_type: basic.text("project_type"),
        primary_goal: basic.text("primary_goal"),
        target_users: basic.text("target_users"),
        timeline: basic.text("timeline"),
        team_size: if team_size.is_empty() {
            DEFAULT_TEAM_SIZE.to_string()
        } else {
            team_size
        },
        key_features: requirements.list("key_features"),
        nice_to_have_features: requirements.list("nice_to_have"),
        success_criteria: requirements.list("success_criteria"),
        known_challenges: requirements.list("known_challenges"),
        must_use_tech: tech.list("must_use"),
        cannot_use_tech: tech.list("cannot_use"),
        deployment_target: optional_join(tech.list("deployment_target")),
        budget_constraints: tech.optional_text("budget_constraints"),
        performance_requirements: to_btree(quality.pairs("performance")),
        security_requirements: to_btree(quality.pairs("security")),
        scalability_requirements: to_btree(quality.pairs("scalability")),
        availability_requirements: to_btree(quality.pairs("availability")),
        team_composition: team_composition(&team.flags("team_composition")),
        existing_knowledge: team.list("existing_knowledge"),
        learning_budget: team.optional_text("learning_budget"),
        infrastructure_access: team.list("infrastructure"),
        architecture_vision: requirements.optional_text("architecture_vision"),
    };

    let errors = brief.validate();
    if !errors.is_empty() {
        debug!("Brief rejected with {} missing fields", errors.len());
        return Err(PlannerError::validation(errors));
    }

    Ok(brief)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::extract::FieldValue;

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    fn list(values: &[&str]) -> FieldValue {
        FieldValue::List(values.iter().map(|v| v.to_string()).collect())
    }

    fn complete_basic_info() -> Fields {
        Fields::from([
            ("project_name", text("Demo")),
            ("project_type", list(&["CLI Tool", "Library"])),
            ("primary_goal", text("Plan projects")),
            ("target_users", text("Developers")),
            ("timeline", text("2 weeks")),
            ("team_size", text("  ")),
        ])
    }

    #[test]
    fn test_assemble_joins_types_and_defaults_team_size() {
        let extracted = ExtractedBrief {
            basic_info: complete_basic_info(),
            ..ExtractedBrief::default()
        };
        let brief = assemble_brief(&extracted).unwrap();

        assert_eq!(brief.project_type, "CLI Tool, Library");
        assert_eq!(brief.team_size, "1");
        assert_eq!(brief.deployment_target, None);
        assert_eq!(brief.team_composition, None);
    }

    #[test]
    fn test_assemble_reports_every_missing_field_in_order() {
        let extracted = ExtractedBrief {
            basic_info: Fields::from([
                ("project_name", text("")),
                ("project_type", list(&[])),
                ("primary_goal", text("goal")),
                ("target_users", text(" ")),
            ]),
            ..ExtractedBrief::default()
        };

        let err = assemble_brief(&extracted).unwrap_err();
        assert_eq!(
            err.messages(),
            [
                "project_name is required and cannot be empty",
                "project_type is required and cannot be empty",
                "target_users is required and cannot be empty",
                "timeline is required and cannot be empty",
            ]
        );
    }

    #[test]
    fn test_assemble_renders_team_and_deployment() {
        let mut flags = OrderedMap::new();
        flags.insert("Backend", true);
        flags.insert("Frontend", false);

        let extracted = ExtractedBrief {
            basic_info: complete_basic_info(),
            tech_constraints: Fields::from([("deployment_target", list(&["AWS", "Docker"]))]),
            team_info: Fields::from([
                ("team_composition", FieldValue::Flags(flags)),
                ("existing_knowledge", list(&["Python"])),
            ]),
            ..ExtractedBrief::default()
        };
        let brief = assemble_brief(&extracted).unwrap();

        assert_eq!(brief.deployment_target.as_deref(), Some("AWS, Docker"));
        assert_eq!(
            brief.team_composition.as_deref(),
            Some("Backend: Yes, Frontend: No")
        );
        assert_eq!(brief.existing_knowledge, vec!["Python"]);
    }

    #[test]
    fn test_assemble_wrong_shapes_degrade() {
        let extracted = ExtractedBrief {
            basic_info: complete_basic_info(),
            team_info: Fields::from([
                ("existing_knowledge", text("Python")),
                ("infrastructure", text("AWS")),
                ("team_composition", list(&["Backend"])),
            ]),
            ..ExtractedBrief::default()
        };
        let brief = assemble_brief(&extracted).unwrap();

        assert!(brief.existing_knowledge.is_empty());
        assert!(brief.infrastructure_access.is_empty());
        assert_eq!(brief.team_composition, None);
    }
}
