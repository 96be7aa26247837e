//! Collection wrapper types and report formatting.
//!
//! Newtype wrappers give collections a `Display` implementation without
//! implementing it on `Vec` directly.

use std::fmt;
use std::ops::Index;

use crate::models::{Severity, ValidationIssue, ValidationReport};
use crate::templates::TemplateConfig;

/// Newtype wrapper for displaying the available templates.
///
/// # Examples
///
/// ```rust
/// use devplan_core::{display::TemplateList, templates::TemplateRegistry};
///
/// let registry = TemplateRegistry::builtin()?;
/// let templates = TemplateList(vec![registry.resolve("cli")?]);
/// let output = format!("{}", templates);
/// assert!(output.contains("## cli"));
/// # Ok::<(), devplan_core::PlannerError>(())
/// ```
pub struct TemplateList(pub Vec<TemplateConfig>);

impl TemplateList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateConfig> {
        self.0.iter()
    }
}

impl Index<usize> for TemplateList {
    type Output = TemplateConfig;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for TemplateList {
    type Item = TemplateConfig;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TemplateList {
    type Item = &'a TemplateConfig;
    type IntoIter = std::slice::Iter<'a, TemplateConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TemplateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No templates found.");
        }

        writeln!(f, "# Available Templates")?;
        writeln!(f)?;
        for template in &self.0 {
            writeln!(f, "## {}", template.name)?;
            writeln!(f)?;
            writeln!(f, "{}", template.description)?;
            writeln!(f)?;
            if !template.project_types.is_empty() {
                writeln!(f, "- **Project Types**: {}", template.project_types.join(", "))?;
            }
            if !template.default_phases.is_empty() {
                writeln!(f, "- **Phases**: {}", template.default_phases.join(" → "))?;
            }
            if !template.default_tech_stack.is_empty() {
                let stack: Vec<String> = template
                    .default_tech_stack
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();
                writeln!(f, "- **Default Stack**: {}", stack.join(", "))?;
            }
            if !template.use_cases.is_empty() {
                writeln!(f, "- **Use Cases**:")?;
                for use_case in &template.use_cases {
                    writeln!(f, "  - {use_case}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

fn write_numbered<'a>(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    issues: impl Iterator<Item = &'a ValidationIssue>,
) -> fmt::Result {
    let issues: Vec<&ValidationIssue> = issues.collect();
    if issues.is_empty() {
        return Ok(());
    }
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    for (index, issue) in issues.iter().enumerate() {
        writeln!(f, "{}. {}", index + 1, issue.message)?;
    }
    writeln!(f)
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.error_count() > 0 {
            "INVALID"
        } else if self.warning_count() > 0 {
            "WARNINGS"
        } else {
            "VALID"
        };

        writeln!(f, "# Validation Report")?;
        writeln!(f)?;
        writeln!(f, "**Status**: {status}")?;
        writeln!(
            f,
            "**Errors**: {} | **Warnings**: {}",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        if self.is_empty() {
            return writeln!(f, "No issues found.");
        }
        write_numbered(f, "Errors", self.errors())?;
        write_numbered(f, "Warnings", self.warnings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateRegistry;

    #[test]
    fn test_empty_template_list() {
        assert_eq!(TemplateList(vec![]).to_string(), "No templates found.\n");
    }

    #[test]
    fn test_template_list_shows_resolved_fields() {
        let registry = TemplateRegistry::builtin().unwrap();
        let list = TemplateList(vec![registry.resolve("api").unwrap()]);
        let output = list.to_string();

        assert_eq!(list.len(), 1);
        assert!(output.contains("## api\n\nREST or GraphQL API service template"));
        assert!(output.contains("- **Project Types**: API, api"));
        assert!(output.contains("framework: FastAPI"));
        assert!(output.contains("Foundation → "));
    }

    #[test]
    fn test_report_status_lines() {
        let clean = ValidationReport::default();
        assert!(clean.to_string().contains("**Status**: VALID"));
        assert!(clean.to_string().contains("No issues found."));

        let report = ValidationReport::new(vec![
            ValidationIssue::warning("Subtask has 2 deliverables"),
            ValidationIssue::error("Duplicate subtask ID '1.1.1'"),
        ]);
        let output = report.to_string();

        assert!(output.contains("**Status**: INVALID"));
        assert!(output.contains("## Errors\n\n1. Duplicate subtask ID '1.1.1'\n"));
        assert!(output.contains("## Warnings\n\n1. Subtask has 2 deliverables\n"));
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::warning("Phase 0 should be titled 'Foundation'");
        assert_eq!(
            issue.to_string(),
            "warning: Phase 0 should be titled 'Foundation'"
        );
    }
}
