//! Plan handler operations that return domain values and display wrappers.

use std::path::PathBuf;

use jiff::Timestamp;
use log::debug;

use super::{brief_handlers::GeneratedAgent, Planner};
use crate::{
    brief::resolve_brief,
    display::{CompletionResult, ExecutorAgent, RulesDocument, VerifierAgent},
    error::{PlannerError, Result},
    models::{Plan, ValidationReport},
    operations::{agent_path, verifier_path, PLAN_FILE, RULES_FILE},
    params::{
        GeneratePlan, GenerateProject, GetSubtask, ProjectKind, UpdateProgress, ValidatePlan,
    },
    plan::{
        self, check_plan_structure, complete_subtask_at, find_subtask, read_plan_markdown,
        SubtaskView,
    },
};

/// Every document generated for a project from one brief.
#[derive(Debug, Clone)]
pub struct ProjectDocuments {
    pub plan: Plan,
    /// `CLAUDE.md` content
    pub rules: String,
    pub agent: GeneratedAgent,
    pub verifier: GeneratedAgent,
}

impl ProjectDocuments {
    /// `(relative path, content)` for each file, in writing order.
    pub fn files(&self) -> Vec<(PathBuf, String)> {
        vec![
            (PathBuf::from(RULES_FILE), self.rules.clone()),
            (PathBuf::from(PLAN_FILE), self.plan.to_string()),
            (self.agent.path.clone(), self.agent.content.clone()),
            (self.verifier.path.clone(), self.verifier.content.clone()),
        ]
    }
}

impl Planner {
    /// Handle generating a development plan from a brief.
    ///
    /// Uses the named template when given, otherwise the one matching the
    /// brief's project type. Fails on conflicting technology constraints or
    /// when a top-level structural check fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use devplan_core::{params::GeneratePlan, PlannerBuilder};
    /// let planner = PlannerBuilder::new().builtin_only().build()?;
    /// let plan = planner.generate_plan(&GeneratePlan {
    ///     brief_content: r#"{"project_name": "Demo", "project_type": "API",
    ///         "primary_goal": "g", "target_users": "u", "timeline": "1 week"}"#
    ///         .to_string(),
    ///     ..Default::default()
    /// })?;
    /// assert_eq!(plan.phases[0].title, "Foundation");
    /// # Ok::<(), devplan_core::PlannerError>(())
    /// ```
    pub fn generate_plan(&self, params: &GeneratePlan) -> Result<Plan> {
        params.validate()?;

        let brief = resolve_brief(&params.brief_content)?;
        let template = self.select_template(&brief.project_type, params.template.as_deref())?;
        plan::generate_plan(&brief, &template)
    }

    /// Handle generating the plan, rules file, executor and verifier together.
    pub fn generate_project(&self, params: &GenerateProject) -> Result<ProjectDocuments> {
        params.validate()?;

        let brief = resolve_brief(&params.brief_content)?;
        let template = self.select_template(&brief.project_type, params.template.as_deref())?;
        let plan = plan::generate_plan(&brief, &template)?;

        let stack = plan
            .tech_stack
            .clone()
            .ok_or_else(|| PlannerError::validation(check_plan_structure(&plan)))?;

        let rules = RulesDocument::new(&brief, &stack, &template)
            .with_test_coverage(params.test_coverage)
            .to_string();
        let agent = GeneratedAgent {
            path: agent_path(&brief.project_name),
            content: ExecutorAgent::new(&brief.project_name, &stack).to_string(),
        };
        let kind = ProjectKind::from_template(&template.name).unwrap_or_default();
        let verifier = GeneratedAgent {
            path: verifier_path(&brief.project_name),
            content: VerifierAgent::new(&brief.project_name, kind)
                .with_features(&brief.key_features)
                .to_string(),
        };

        debug!(
            "Generated project documents for '{}' with template '{}'",
            brief.project_name, template.name
        );
        Ok(ProjectDocuments {
            plan,
            rules,
            agent,
            verifier,
        })
    }

    /// Handle validating plan markdown.
    ///
    /// Reader findings (such as unknown statuses) come first, followed by
    /// the structural and prerequisite checks. Only empty input is an error;
    /// whether the report passes is up to the caller and `strict`.
    pub fn validate_plan(&self, params: &ValidatePlan) -> Result<ValidationReport> {
        params.validate()?;

        let document = read_plan_markdown(&params.content);
        let mut report = ValidationReport::new(document.issues);
        report.extend(plan::validate_plan(&document.plan).issues);
        Ok(report)
    }

    /// Handle looking up a subtask with its owning phase and task.
    pub fn get_subtask(&self, params: &GetSubtask) -> Result<SubtaskView> {
        params.validate()?;

        let document = read_plan_markdown(&params.plan_content);
        find_subtask(&document.plan, params.subtask_id.trim())
    }

    /// Handle marking a subtask complete.
    ///
    /// Returns the updated plan, which displays as the new plan markdown.
    /// The plan is rebuilt from what the reader understood, so sections other
    /// than the technology stack and the phases are not kept. A plan the
    /// reader reports issues for (an unknown status, a task outside any
    /// phase) is refused rather than rewritten with those parts lost.
    pub fn update_progress(&self, params: &UpdateProgress) -> Result<CompletionResult> {
        self.update_progress_at(params, Timestamp::now())
    }

    /// [`Planner::update_progress`] with an explicit completion time.
    pub fn update_progress_at(
        &self,
        params: &UpdateProgress,
        at: Timestamp,
    ) -> Result<CompletionResult> {
        params.validate()?;

        let document = read_plan_markdown(&params.plan_content);
        if !document.issues.is_empty() {
            return Err(PlannerError::validation(
                document.issues.into_iter().map(|issue| issue.message),
            ));
        }

        let mut plan = document.plan;
        let subtask = complete_subtask_at(
            &mut plan,
            params.subtask_id.trim(),
            &params.completion_notes,
            at,
        )?;
        Ok(CompletionResult::new(plan, subtask, at))
    }
}
