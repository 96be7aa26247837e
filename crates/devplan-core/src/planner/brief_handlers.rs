//! Brief, rules file, agent, lesson and template handlers for the Planner.

use std::fmt;
use std::path::PathBuf;

use jiff::{civil::Date, Zoned};
use log::debug;
use serde::Serialize;

use super::Planner;
use crate::{
    agent,
    brief::resolve_brief,
    derive::derive_tech_stack,
    display::{ExecutorAgent, LessonDocument, RulesDocument, TemplateList, VerifierAgent},
    error::Result,
    models::{Brief, TechStack, ValidationReport},
    operations::{agent_path, verifier_path},
    params::{
        FormatLesson, GenerateAgent, GenerateClaudeMd, GenerateVerifier, ListTemplates,
        ParseBrief, ProjectKind, ValidateAgent,
    },
    templates::TemplateConfig,
};

/// A generated agent file and where it belongs in the project.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAgent {
    /// Path relative to the project root
    pub path: PathBuf,
    pub content: String,
}

impl fmt::Display for GeneratedAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl Planner {
    /// Handle parsing a project brief.
    ///
    /// Accepts brief markdown or a JSON-serialized brief and returns the
    /// structured brief once its required fields check out.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use devplan_core::{params::ParseBrief, PlannerBuilder};
    /// let planner = PlannerBuilder::new().builtin_only().build()?;
    /// let brief = planner.parse_brief(&ParseBrief {
    ///     content: "## Basic Information\n\
    ///               - **Project Name**: Demo\n\
    ///               - **Project Type**: [x] CLI Tool\n\
    ///               - **Primary Goal**: Ship it\n\
    ///               - **Target Users**: Developers\n\
    ///               - **Timeline**: 1 week\n"
    ///         .to_string(),
    ///     ..Default::default()
    /// })?;
    /// assert_eq!(brief.project_type, "CLI Tool");
    /// # Ok::<(), devplan_core::PlannerError>(())
    /// ```
    pub fn parse_brief(&self, params: &ParseBrief) -> Result<Brief> {
        params.validate()?;
        resolve_brief(&params.content)
    }

    /// Brief plus the tech stack derived from the template matching
    /// `project_type`.
    pub(crate) fn brief_with_stack(
        &self,
        brief_content: &str,
        project_type: Option<&str>,
    ) -> Result<(Brief, TechStack, TemplateConfig)> {
        let brief = resolve_brief(brief_content)?;
        let project_type = project_type.unwrap_or(&brief.project_type);
        let template = self.select_template(project_type, None)?;
        let stack = derive_tech_stack(&brief, &template)?;
        Ok((brief, stack, template))
    }

    /// Handle generating the `CLAUDE.md` rules file.
    ///
    /// An explicit `language` replaces the derived one.
    pub fn generate_claude_md(&self, params: &GenerateClaudeMd) -> Result<String> {
        params.validate()?;

        let (brief, mut stack, template) = self.brief_with_stack(&params.brief_content, None)?;
        if let Some(language) = params.language.as_deref().map(str::trim) {
            if !language.is_empty() {
                debug!("Overriding derived language '{}' with '{language}'", stack.language);
                stack.language = language.to_string();
            }
        }

        Ok(RulesDocument::new(&brief, &stack, &template)
            .with_test_coverage(params.test_coverage)
            .to_string())
    }

    /// Handle generating the executor agent file.
    ///
    /// The project name and type default to the brief's.
    pub fn generate_agent(&self, params: &GenerateAgent) -> Result<GeneratedAgent> {
        params.validate()?;

        let (brief, stack, _) =
            self.brief_with_stack(&params.brief_content, params.project_type.as_deref())?;
        let name = params
            .project_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(&brief.project_name);

        Ok(GeneratedAgent {
            path: agent_path(name),
            content: ExecutorAgent::new(name, &stack).to_string(),
        })
    }

    /// Kind of the template matching `project_type`, `cli` when that
    /// template is not kind specific.
    pub(crate) fn project_kind(&self, project_type: &str) -> Result<ProjectKind> {
        let template = self.select_template(project_type, None)?;
        Ok(ProjectKind::from_template(&template.name).unwrap_or_default())
    }

    /// Handle generating the verifier agent file.
    ///
    /// The project name defaults to the brief's and the kind to the one of
    /// the template matching the brief. The brief's key features become the
    /// verifier's feature checklist.
    pub fn generate_verifier(&self, params: &GenerateVerifier) -> Result<GeneratedAgent> {
        params.validate()?;

        let brief = resolve_brief(&params.brief_content)?;
        let kind = match params.project_type {
            Some(kind) => kind,
            None => self.project_kind(&brief.project_type)?,
        };
        let name = params
            .project_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(&brief.project_name);

        debug!("Generating {} verifier for '{name}'", kind.as_str());
        Ok(GeneratedAgent {
            path: verifier_path(name),
            content: VerifierAgent::new(name, kind)
                .with_features(&brief.key_features)
                .to_string(),
        })
    }

    /// Handle formatting a lesson learned, dated today.
    pub fn format_lesson(&self, params: &FormatLesson) -> Result<String> {
        self.format_lesson_on(params, Zoned::now().date())
    }

    /// [`Planner::format_lesson`] with an explicit entry date.
    pub fn format_lesson_on(&self, params: &FormatLesson, date: Date) -> Result<String> {
        params.validate()?;
        Ok(LessonDocument::new(params, date).to_string())
    }

    /// Handle listing templates, resolved through their `extends` chain.
    ///
    /// With a project type, only templates matching it are listed.
    pub fn list_templates(&self, params: &ListTemplates) -> Result<TemplateList> {
        let project_type = params
            .project_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let mut templates = Vec::new();
        for name in self.registry.names() {
            let config = self.registry.resolve(name)?;
            if project_type.map_or(true, |value| config.matches(value)) {
                templates.push(config);
            }
        }

        Ok(TemplateList(templates))
    }

    /// Handle validating an executor or verifier agent file. Findings are
    /// returned as a report; only empty input is an error.
    pub fn validate_agent(&self, params: &ValidateAgent) -> Result<ValidationReport> {
        params.validate()?;
        Ok(agent::validate_agent(&params.content))
    }
}
