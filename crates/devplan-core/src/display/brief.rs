//! Markdown summary of a parsed brief.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::Brief;

fn write_items(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "### {heading}")?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    writeln!(f)
}

fn write_pairs(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    pairs: &BTreeMap<String, String>,
) -> fmt::Result {
    if pairs.is_empty() {
        return Ok(());
    }
    writeln!(f, "### {heading}")?;
    writeln!(f)?;
    for (key, value) in pairs {
        writeln!(f, "- **{key}**: {value}")?;
    }
    writeln!(f)
}

fn write_optional(f: &mut fmt::Formatter<'_>, label: &str, value: &Option<String>) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "- **{label}**: {value}"),
        None => Ok(()),
    }
}

impl fmt::Display for Brief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Project Brief: {}", self.project_name)?;
        writeln!(f)?;
        writeln!(f, "- **Type**: {}", self.project_type)?;
        writeln!(f, "- **Goal**: {}", self.primary_goal)?;
        writeln!(f, "- **Target Users**: {}", self.target_users)?;
        writeln!(f, "- **Timeline**: {}", self.timeline)?;
        writeln!(f, "- **Team Size**: {}", self.team_size)?;
        writeln!(f)?;

        let has_requirements = !self.key_features.is_empty()
            || !self.nice_to_have_features.is_empty()
            || !self.success_criteria.is_empty()
            || !self.known_challenges.is_empty();
        if has_requirements {
            writeln!(f, "## Requirements")?;
            writeln!(f)?;
            write_items(f, "Key Features", &self.key_features)?;
            write_items(f, "Nice to Have", &self.nice_to_have_features)?;
            write_items(f, "Success Criteria", &self.success_criteria)?;
            write_items(f, "Known Challenges", &self.known_challenges)?;
        }

        writeln!(f, "## Technical Constraints")?;
        writeln!(f)?;
        write_items(f, "Must Use", &self.must_use_tech)?;
        write_items(f, "Cannot Use", &self.cannot_use_tech)?;
        write_optional(f, "Deployment Target", &self.deployment_target)?;
        write_optional(f, "Budget", &self.budget_constraints)?;
        writeln!(f)?;

        let quality = [
            ("Performance", &self.performance_requirements),
            ("Security", &self.security_requirements),
            ("Scalability", &self.scalability_requirements),
            ("Availability", &self.availability_requirements),
        ];
        if quality.iter().any(|(_, pairs)| !pairs.is_empty()) {
            writeln!(f, "## Quality Requirements")?;
            writeln!(f)?;
            for (heading, pairs) in quality {
                write_pairs(f, heading, pairs)?;
            }
        }

        writeln!(f, "## Team")?;
        writeln!(f)?;
        write_optional(f, "Composition", &self.team_composition)?;
        write_optional(f, "Learning Budget", &self.learning_budget)?;
        writeln!(f)?;
        write_items(f, "Existing Knowledge", &self.existing_knowledge)?;
        write_items(f, "Infrastructure", &self.infrastructure_access)?;

        if let Some(vision) = &self.architecture_vision {
            writeln!(f, "## Architecture Vision")?;
            writeln!(f)?;
            writeln!(f, "{vision}")?;
        }
        Ok(())
    }
}
