//! Tech-stack derivation from template defaults and brief constraints.

use std::collections::BTreeSet;

use log::debug;

use crate::error::{PlannerError, Result};
use crate::models::{Brief, TechStack};
use crate::templates::TemplateConfig;

/// Language used when neither the template nor the brief supplies one.
pub const DEFAULT_LANGUAGE: &str = "Python 3.11+";
/// CI/CD platform used when nothing else sets one.
pub const DEFAULT_CI_CD: &str = "GitHub Actions";

fn lowercase_set(items: &[String]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_lowercase()).collect()
}

/// Fail when a technology is both required and forbidden.
pub fn check_conflicts(brief: &Brief) -> Result<()> {
    let must_use = lowercase_set(&brief.must_use_tech);
    let cannot_use = lowercase_set(&brief.cannot_use_tech);
    let conflicts: Vec<&str> = must_use
        .intersection(&cannot_use)
        .map(String::as_str)
        .collect();

    if conflicts.is_empty() {
        return Ok(());
    }

    Err(PlannerError::validation([format!(
        "Conflicting constraints: {} appear in both must_use_tech and cannot_use_tech",
        conflicts.join(", ")
    )]))
}

/// Resolve the technology stack for `brief` using `template` defaults.
///
/// Template defaults for `language`, `framework`, `database`, `cache` and
/// `packaging` apply unless the brief forbids that exact technology;
/// `deployment` is blocked when any forbidden term occurs inside it. Every
/// required technology is recorded under `must_use_<n>`. Testing, linting
/// and type checking fall back on the language family, and the returned
/// stack always has a language.
pub fn derive_tech_stack(brief: &Brief, template: &TemplateConfig) -> Result<TechStack> {
    check_conflicts(brief)?;

    let cannot_use = lowercase_set(&brief.cannot_use_tech);
    let allowed = |key: &str| {
        template
            .tech_default(key)
            .filter(|value| !cannot_use.contains(&value.to_lowercase()))
            .map(str::to_string)
    };

    let mut stack = TechStack::default();
    if let Some(language) = allowed("language") {
        stack.language = language;
    }
    if let Some(framework) = allowed("framework") {
        stack.framework = framework;
    }
    if let Some(database) = allowed("database") {
        stack.database = database;
    }
    if let Some(cache) = allowed("cache") {
        stack.additional_tools.insert("cache", cache);
    }
    if let Some(deployment) = template.tech_default("deployment") {
        let lower = deployment.to_lowercase();
        if cannot_use.iter().any(|term| lower.contains(term.as_str())) {
            debug!("Deployment default '{}' blocked by constraints", deployment);
        } else {
            stack.deployment = deployment.to_string();
        }
    }
    if let Some(packaging) = allowed("packaging") {
        stack.additional_tools.insert("packaging", packaging);
    }

    for (index, tech) in brief.must_use_tech.iter().enumerate() {
        stack
            .additional_tools
            .insert(format!("must_use_{index}"), tech.clone());
    }

    apply_fallbacks(&mut stack);
    Ok(stack)
}

/// Fill unset fields from the language family.
fn apply_fallbacks(stack: &mut TechStack) {
    if stack.language.is_empty() {
        stack.language = DEFAULT_LANGUAGE.to_string();
    }

    let language = stack.language.to_lowercase();
    let python = language.contains("python");
    let typescript = language.contains("typescript");
    let javascript = typescript || language.contains("javascript");

    let fill = |field: &mut String, python_tool: &str, js_tool: Option<&str>| {
        if !field.is_empty() {
            return;
        }
        if python {
            *field = python_tool.to_string();
        } else if let Some(tool) = js_tool {
            *field = tool.to_string();
        }
    };

    fill(&mut stack.testing, "pytest", javascript.then_some("jest"));
    fill(&mut stack.linting, "ruff", javascript.then_some("eslint"));
    fill(
        &mut stack.type_checking,
        "mypy",
        typescript.then_some("TypeScript"),
    );

    if stack.ci_cd.is_empty() {
        stack.ci_cd = DEFAULT_CI_CD.to_string();
    }
}
