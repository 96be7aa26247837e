//! Field extractors over scanned brief sections.
//!
//! Each extractor reads a fixed set of section names and ignores every other
//! section. Absent sections yield empty values; nothing here can fail.

use serde::Serialize;

use crate::markdown::{
    extract_checkbox_fields, extract_field_value, extract_key_values, extract_list_items,
    extract_raw_field_value, section, section_summary, Sections,
};
use crate::models::OrderedMap;

/// One extracted value. The variant records the shape the extractor produced;
/// consumers coerce with the `to_*` methods and get an empty value back when
/// the shape is not the one they expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Flags(OrderedMap<bool>),
    Pairs(OrderedMap<String>),
}

impl FieldValue {
    /// Scalar view. Lists are joined with `", "`; maps become `""`.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.trim().to_string(),
            FieldValue::List(items) => items.join(", ").trim().to_string(),
            FieldValue::Flags(_) | FieldValue::Pairs(_) => String::new(),
        }
    }

    pub fn to_list(&self) -> Vec<String> {
        match self {
            FieldValue::List(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn to_flags(&self) -> OrderedMap<bool> {
        match self {
            FieldValue::Flags(flags) => flags.clone(),
            _ => OrderedMap::new(),
        }
    }

    pub fn to_pairs(&self) -> OrderedMap<String> {
        match self {
            FieldValue::Pairs(pairs) => pairs.clone(),
            _ => OrderedMap::new(),
        }
    }
}

/// Output of one extractor, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fields(OrderedMap<FieldValue>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: FieldValue) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> String {
        self.get(key).map(FieldValue::to_text).unwrap_or_default()
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key).map(FieldValue::to_list).unwrap_or_default()
    }

    pub fn flags(&self, key: &str) -> OrderedMap<bool> {
        self.get(key).map(FieldValue::to_flags).unwrap_or_default()
    }

    pub fn pairs(&self, key: &str) -> OrderedMap<String> {
        self.get(key).map(FieldValue::to_pairs).unwrap_or_default()
    }

    /// Scalar view that is `None` when blank.
    pub fn optional_text(&self, key: &str) -> Option<String> {
        let text = self.text(key);
        (!text.is_empty()).then_some(text)
    }
}

impl<const N: usize> From<[(&str, FieldValue); N]> for Fields {
    fn from(entries: [(&str, FieldValue); N]) -> Self {
        let mut fields = Fields::new();
        for (key, value) in entries {
            fields.set(key, value);
        }
        fields
    }
}

fn list_of(sections: &Sections, heading: &str) -> FieldValue {
    FieldValue::List(extract_list_items(section(sections, heading)))
}

fn summary_of(sections: &Sections, heading: &str) -> FieldValue {
    FieldValue::Text(section_summary(section(sections, heading)).unwrap_or_default())
}

/// Split an inline multi-checkbox value such as `[x] CLI + [ ] Library + API`.
///
/// Checked segments are kept without their checkbox, unchecked segments are
/// dropped and segments without a checkbox are kept as written.
pub fn split_project_types(line: &str) -> Vec<String> {
    line.split('+')
        .map(str::trim)
        .filter_map(|part| {
            let checked = part
                .get(..3)
                .is_some_and(|marker| marker.eq_ignore_ascii_case("[x]"));
            if checked {
                let label = part[3..].trim();
                (!label.is_empty()).then(|| label.to_string())
            } else if part.starts_with('[') || part.is_empty() {
                None
            } else {
                Some(part.to_string())
            }
        })
        .collect()
}

/// `Basic Information`: name, checked project types, goal, users, timeline
/// and team size.
pub fn extract_basic_info(sections: &Sections) -> Fields {
    let text = section(sections, "Basic Information");
    let project_type = extract_raw_field_value(text, "Project Type")
        .map(|line| split_project_types(&line))
        .unwrap_or_default();

    Fields::from([
        (
            "project_name",
            FieldValue::Text(extract_field_value(text, "Project Name")),
        ),
        ("project_type", FieldValue::List(project_type)),
        (
            "primary_goal",
            FieldValue::Text(extract_field_value(text, "Primary Goal")),
        ),
        (
            "target_users",
            FieldValue::Text(extract_field_value(text, "Target Users")),
        ),
        (
            "timeline",
            FieldValue::Text(extract_field_value(text, "Timeline")),
        ),
        (
            "team_size",
            FieldValue::Text(extract_field_value(text, "Team Size")),
        ),
    ])
}

/// Functional requirements: inputs, outputs, features, success criteria,
/// known challenges and the architecture vision.
pub fn extract_requirements(sections: &Sections) -> Fields {
    Fields::from([
        ("input", list_of(sections, "Input")),
        ("output", list_of(sections, "Output")),
        ("key_features", list_of(sections, "Key Features")),
        ("nice_to_have", list_of(sections, "Nice-to-Have Features")),
        ("success_criteria", list_of(sections, "Success Criteria")),
        ("known_challenges", list_of(sections, "Known Challenges")),
        (
            "architecture_vision",
            summary_of(sections, "Architecture Vision"),
        ),
    ])
}

pub fn extract_tech_constraints(sections: &Sections) -> Fields {
    Fields::from([
        ("must_use", list_of(sections, "Must Use")),
        ("cannot_use", list_of(sections, "Cannot Use")),
        ("deployment_target", list_of(sections, "Deployment Target")),
        (
            "budget_constraints",
            summary_of(sections, "Budget Constraints"),
        ),
    ])
}

/// Key/value requirements from the `Performance`, `Security`,
/// `Scalability` and `Availability` sections.
pub fn extract_quality_requirements(sections: &Sections) -> Fields {
    let pairs = |heading: &str| FieldValue::Pairs(extract_key_values(section(sections, heading)));

    Fields::from([
        ("performance", pairs("Performance")),
        ("security", pairs("Security")),
        ("scalability", pairs("Scalability")),
        ("availability", pairs("Availability")),
    ])
}

pub fn extract_team_info(sections: &Sections) -> Fields {
    Fields::from([
        (
            "team_composition",
            FieldValue::Flags(extract_checkbox_fields(section(
                sections,
                "Team Composition",
            ))),
        ),
        ("existing_knowledge", list_of(sections, "Existing Knowledge")),
        ("infrastructure", list_of(sections, "Infrastructure Access")),
        ("learning_budget", summary_of(sections, "Learning Budget")),
    ])
}
