//! Generated project documents: the rules file and the executor and
//! verifier agents.

use std::fmt;

use crate::agent::{EXECUTOR_MODEL, EXECUTOR_TOOLS, VERIFIER_MODEL, VERIFIER_TOOLS};
use crate::models::{Brief, TechStack};
use crate::operations::{
    agent_name, agent_path, slugify, verification_commands, verifier_name, verifier_path,
    BRIEF_FILE, LESSONS_FILE, PLAN_FILE, RULES_FILE,
};
use crate::params::ProjectKind;
use crate::templates::TemplateConfig;

/// Default minimum test coverage written into the rules file.
pub const DEFAULT_TEST_COVERAGE: u8 = 80;

fn write_bullets(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
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

fn write_commands(f: &mut fmt::Formatter<'_>, stack: &TechStack) -> fmt::Result {
    let commands = verification_commands(stack);
    writeln!(f, "```bash")?;
    if commands.is_empty() {
        writeln!(f, "# No verification tools configured for this stack")?;
    }
    for (purpose, command) in commands {
        writeln!(f, "# {purpose}")?;
        writeln!(f, "{command}")?;
    }
    writeln!(f, "```")
}

/// The `CLAUDE.md` rules file for a project.
///
/// Rules come from the resolved template, so inherited base rules appear
/// before the template's own.
pub struct RulesDocument<'a> {
    pub brief: &'a Brief,
    pub stack: &'a TechStack,
    pub template: &'a TemplateConfig,
    pub test_coverage: u8,
}

impl<'a> RulesDocument<'a> {
    pub fn new(brief: &'a Brief, stack: &'a TechStack, template: &'a TemplateConfig) -> Self {
        Self {
            brief,
            stack,
            template,
            test_coverage: DEFAULT_TEST_COVERAGE,
        }
    }

    pub fn with_test_coverage(mut self, test_coverage: u8) -> Self {
        self.test_coverage = test_coverage;
        self
    }
}

impl fmt::Display for RulesDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let brief = self.brief;

        writeln!(f, "# {} - Development Rules", brief.project_name)?;
        writeln!(f)?;
        writeln!(f, "> {}", brief.primary_goal)?;
        writeln!(f)?;

        writeln!(f, "## Project Overview")?;
        writeln!(f)?;
        writeln!(f, "- **Type**: {}", brief.project_type)?;
        writeln!(f, "- **Target Users**: {}", brief.target_users)?;
        writeln!(f, "- **Timeline**: {}", brief.timeline)?;
        writeln!(f, "- **Team Size**: {}", brief.team_size)?;
        writeln!(
            f,
            "- **Template**: {} ({})",
            self.template.name, self.template.description
        )?;
        writeln!(f)?;

        writeln!(f, "## Technology Stack")?;
        writeln!(f)?;
        write!(f, "{}", self.stack)?;
        writeln!(f)?;

        let has_constraints = !brief.must_use_tech.is_empty()
            || !brief.cannot_use_tech.is_empty()
            || brief.deployment_target.is_some()
            || brief.budget_constraints.is_some();
        if has_constraints {
            writeln!(f, "## Constraints")?;
            writeln!(f)?;
            write_bullets(f, "Must Use", &brief.must_use_tech)?;
            write_bullets(f, "Cannot Use", &brief.cannot_use_tech)?;
            if let Some(target) = &brief.deployment_target {
                writeln!(f, "- **Deployment Target**: {target}")?;
            }
            if let Some(budget) = &brief.budget_constraints {
                writeln!(f, "- **Budget**: {budget}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "## Development Workflow")?;
        writeln!(f)?;
        writeln!(f, "### Before Each Subtask")?;
        writeln!(f)?;
        writeln!(f, "1. Read `{RULES_FILE}` and `{PLAN_FILE}`")?;
        writeln!(f, "2. Identify the subtask deliverables")?;
        writeln!(f, "3. Confirm every prerequisite is marked complete")?;
        writeln!(f)?;
        writeln!(f, "### During Development")?;
        writeln!(f)?;
        writeln!(f, "1. Write tests alongside the code")?;
        writeln!(f, "2. Run the verification commands before every commit")?;
        writeln!(f, "3. Record completion notes in `{PLAN_FILE}`")?;
        writeln!(f)?;
        writeln!(f, "### After Each Subtask")?;
        writeln!(f)?;
        writeln!(f, "1. All tests pass")?;
        writeln!(f, "2. Coverage is at least {}%", self.test_coverage)?;
        writeln!(f, "3. Changes are committed to the task branch")?;
        writeln!(f)?;

        if !self.template.rules.is_empty() {
            writeln!(f, "## Project Rules")?;
            writeln!(f)?;
            for (index, rule) in self.template.rules.iter().enumerate() {
                writeln!(f, "{}. {rule}", index + 1)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "## Verification")?;
        writeln!(f)?;
        write_commands(f, self.stack)?;
        writeln!(f)?;

        writeln!(f, "## Git Workflow")?;
        writeln!(f)?;
        writeln!(f, "- One branch per task, named `feature/X-Y-description`")?;
        writeln!(f, "- One commit per subtask")?;
        writeln!(f, "- Squash merge the branch to `main` when the task's last subtask is done")?;
        writeln!(f, "- Never force push to `main`")
    }
}

/// The executor agent file written to `.claude/agents/<slug>-executor.md`.
pub struct ExecutorAgent<'a> {
    pub project_name: &'a str,
    pub stack: &'a TechStack,
}

impl<'a> ExecutorAgent<'a> {
    pub fn new(project_name: &'a str, stack: &'a TechStack) -> Self {
        Self {
            project_name,
            stack,
        }
    }

    /// Single-line frontmatter description.
    pub fn description(&self) -> String {
        let name = self.project_name.split_whitespace().collect::<Vec<_>>().join(" ");
        format!(
            "PROACTIVELY use this agent to execute {name} development subtasks. \
             Expert at {PLAN_FILE} execution with cross-checking, git discipline and \
             verification. Invoke with \"execute subtask X.Y.Z\" to complete a subtask \
             entirely in one session."
        )
    }
}

impl fmt::Display for ExecutorAgent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.project_name;

        writeln!(f, "---")?;
        writeln!(f, "name: {}", agent_name(name))?;
        writeln!(f, "description: {}", self.description())?;
        writeln!(f, "tools: {EXECUTOR_TOOLS}")?;
        writeln!(f, "model: {EXECUTOR_MODEL}")?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "# {name} Development Plan Executor")?;
        writeln!(f)?;
        writeln!(
            f,
            "You execute subtasks from `{PLAN_FILE}` for **{name}**, one subtask per session."
        )?;
        writeln!(f)?;

        writeln!(f, "## Expectations")?;
        writeln!(f)?;
        writeln!(
            f,
            "Every subtask you execute must be fully specified. You do not infer missing \
             imports, design signatures or choose file locations. If a subtask lacks any \
             of the following, report it as incomplete before starting:"
        )?;
        writeln!(f)?;
        writeln!(f, "- Explicit paths for every file to create or modify")?;
        writeln!(f, "- Complete code for every deliverable")?;
        writeln!(f, "- Tests for success, failure and edge cases")?;
        writeln!(f, "- Verification commands with their expected result")?;
        writeln!(f)?;

        writeln!(f, "## Initialization")?;
        writeln!(f)?;
        writeln!(f, "1. Read `{RULES_FILE}` for coding standards")?;
        writeln!(f, "2. Read `{PLAN_FILE}` and locate the requested subtask")?;
        writeln!(f, "3. Parse the id: `execute subtask 1.2.3` means phase 1, task 1.2")?;
        writeln!(
            f,
            "4. Check every prerequisite is marked `[x]` and its code exists; stop and report if not"
        )?;
        writeln!(f, "5. Run `git status` and confirm you are on the task branch")?;
        writeln!(f)?;

        writeln!(f, "## Execution Protocol")?;
        writeln!(f)?;
        writeln!(f, "1. Implement each deliverable and tick its checkbox")?;
        writeln!(f, "2. Write the tests the subtask lists")?;
        writeln!(f, "3. Run every verification command; fix failures before continuing:")?;
        writeln!(f)?;
        write_commands(f, self.stack)?;
        writeln!(f)?;
        writeln!(f, "4. Tick the success criteria and fill in the completion notes")?;
        writeln!(f, "5. Commit with a conventional message: `type(scope): description`")?;
        writeln!(f)?;

        writeln!(f, "## Git Discipline")?;
        writeln!(f)?;
        writeln!(f, "| Situation | Action |")?;
        writeln!(f, "|-----------|--------|")?;
        writeln!(
            f,
            "| First subtask of a task | `git checkout -b feature/X-Y-description` |"
        )?;
        writeln!(f, "| Continuing a task | Stay on the task branch |")?;
        writeln!(
            f,
            "| Last subtask of a task | Push, squash merge to `main`, delete the branch |"
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Never commit broken code, skip verification, force push to `main` or open a \
             branch per subtask. After the last subtask of a task, do not stop before the \
             squash merge is done and the task checklist in `{PLAN_FILE}` is ticked."
        )?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "Save this file to `{}`", agent_path(name).display())
    }
}

/// The verifier agent file written to `.claude/agents/<slug>-verifier.md`.
///
/// The verifier checks a finished project against its brief. Listed
/// features become the checklist for its feature pass; without any it is
/// told to read them from the brief.
pub struct VerifierAgent<'a> {
    pub project_name: &'a str,
    pub kind: ProjectKind,
    pub features: &'a [String],
}

impl<'a> VerifierAgent<'a> {
    pub fn new(project_name: &'a str, kind: ProjectKind) -> Self {
        Self {
            project_name,
            kind,
            features: &[],
        }
    }

    pub fn with_features(mut self, features: &'a [String]) -> Self {
        self.features = features;
        self
    }

    /// Single-line frontmatter description.
    pub fn description(&self) -> String {
        let name = self.project_name.split_whitespace().collect::<Vec<_>>().join(" ");
        format!(
            "QA engineer agent that validates {name} against {BRIEF_FILE} requirements. \
             Runs smoke tests, feature verification and edge cases, and produces a \
             verification report with lessons learned."
        )
    }

    fn write_smoke_tests(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let command = slugify(self.project_name);
        match self.kind {
            ProjectKind::Cli => {
                writeln!(f, "```bash")?;
                writeln!(f, "{command} --help")?;
                writeln!(f, "{command} --version")?;
                writeln!(f, "{command}                      # default behavior")?;
                writeln!(f, "{command} \"\"                   # empty input")?;
                writeln!(f, "{command} \"José 🎉\"            # unicode")?;
                writeln!(f, "{command} \"$(printf 'A%.0s' {{1..1000}})\"  # long input")?;
                writeln!(f, "```")
            }
            ProjectKind::Api => {
                writeln!(f, "```bash")?;
                writeln!(f, "curl -i http://localhost:8000/health")?;
                writeln!(f, "curl -i http://localhost:8000/docs")?;
                writeln!(f, "curl -i -X POST http://localhost:8000/<endpoint> -d ''")?;
                writeln!(
                    f,
                    "curl -i -X POST http://localhost:8000/<endpoint> -H 'Content-Type: application/json' -d 'invalid'"
                )?;
                writeln!(f, "```")?;
                writeln!(f)?;
                writeln!(f, "Every error response must be JSON, not plain text.")
            }
            ProjectKind::WebApp => {
                writeln!(f, "1. **Page Load**: every route renders without errors")?;
                writeln!(f, "2. **Console**: no errors in the browser console")?;
                writeln!(f, "3. **Hydration**: no hydration warnings")?;
                writeln!(f, "4. **Responsive**: mobile and desktop viewports both work")?;
                writeln!(f, "5. **Theming**: theme switching works, if the app has one")
            }
            ProjectKind::Library => {
                let package = command.replace('-', "_");
                writeln!(f, "1. Import `{package}` from a clean environment")?;
                writeln!(f, "2. Run the type checker over the public API")?;
                writeln!(
                    f,
                    "3. Install without development dependencies and import again, if the \
                     library claims to have none"
                )
            }
        }
    }
}

impl fmt::Display for VerifierAgent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.project_name;
        let kind = self.kind.as_str();

        writeln!(f, "---")?;
        writeln!(f, "name: {}", verifier_name(name))?;
        writeln!(f, "description: {}", self.description())?;
        writeln!(f, "tools: {VERIFIER_TOOLS}")?;
        writeln!(f, "model: {VERIFIER_MODEL}")?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "# {name} Verifier")?;
        writeln!(f)?;
        writeln!(
            f,
            "You are a critical QA engineer. Verify that the finished **{name}** does \
             everything `{BRIEF_FILE}` promises."
        )?;
        writeln!(f)?;

        writeln!(f, "## Your Role")?;
        writeln!(f)?;
        writeln!(
            f,
            "Do not stop at running the test suite. Try to break the application, look \
             for edge cases the plan missed, and confirm the product delivers what was asked for."
        )?;
        writeln!(f)?;

        writeln!(f, "## Verification Protocol")?;
        writeln!(f)?;
        writeln!(f, "### Step 1: Read Requirements")?;
        writeln!(f)?;
        writeln!(
            f,
            "Read `{BRIEF_FILE}` for the goal, the required features and the constraints."
        )?;
        writeln!(f)?;
        writeln!(f, "### Step 2: Smoke Test")?;
        writeln!(f)?;
        writeln!(
            f,
            "Confirm the application runs at all. If a smoke test fails, stop and report a critical issue."
        )?;
        writeln!(f)?;
        self.write_smoke_tests(f)?;
        writeln!(f)?;
        writeln!(f, "### Step 3: Feature Verification")?;
        writeln!(f)?;
        if self.features.is_empty() {
            writeln!(f, "For each feature in `{BRIEF_FILE}`:")?;
        } else {
            writeln!(f, "Features to verify:")?;
            writeln!(f)?;
            for feature in self.features {
                writeln!(f, "- [ ] {feature}")?;
            }
            writeln!(f)?;
            writeln!(f, "For each feature:")?;
        }
        writeln!(f)?;
        writeln!(f, "1. Design a test that exercises it")?;
        writeln!(f, "2. Run the test")?;
        writeln!(f, "3. Compare the actual behavior with the expected one")?;
        writeln!(f, "4. Record the result")?;
        writeln!(f)?;
        writeln!(f, "### Step 4: Edge Cases")?;
        writeln!(f)?;
        writeln!(f, "- Empty and null values")?;
        writeln!(f, "- Very long input")?;
        writeln!(f, "- Special characters, unicode and emoji")?;
        writeln!(f, "- Boundary values (0, -1, maximum sizes)")?;
        writeln!(f, "- Concurrent operations, where they apply")?;
        writeln!(f)?;
        writeln!(f, "### Step 5: Error Handling")?;
        writeln!(f)?;
        writeln!(f, "- Invalid input produces a helpful error message")?;
        writeln!(f, "- Bad input never crashes the application")?;
        writeln!(f, "- Exit codes (CLI) or HTTP status codes (API) are correct")?;
        writeln!(f)?;

        writeln!(f, "## Verification Report Format")?;
        writeln!(f)?;
        writeln!(f, "```markdown")?;
        writeln!(f, "# Verification Report: {name}")?;
        writeln!(f)?;
        writeln!(f, "## Summary")?;
        writeln!(f, "- **Status**: PASS | PARTIAL | FAIL")?;
        writeln!(f, "- **Features Verified**: X/Y")?;
        writeln!(f, "- **Critical Issues**: N")?;
        writeln!(f, "- **Warnings**: M")?;
        writeln!(f)?;
        writeln!(f, "## Smoke Tests")?;
        writeln!(f, "- [ ] Application starts")?;
        writeln!(f, "- [ ] Help or docs available")?;
        writeln!(f, "- [ ] Basic operation works")?;
        writeln!(f)?;
        writeln!(f, "## Feature Verification")?;
        writeln!(f)?;
        writeln!(f, "### Feature: <name from {BRIEF_FILE}>")?;
        writeln!(f, "- **Status**: PASS | WARN | FAIL")?;
        writeln!(f, "- **Tests Run**: <commands or actions>")?;
        writeln!(f, "- **Result**: <what happened>")?;
        writeln!(f)?;
        writeln!(f, "## Edge Cases")?;
        writeln!(f)?;
        writeln!(f, "| Input | Expected | Actual | Status |")?;
        writeln!(f, "|-------|----------|--------|--------|")?;
        writeln!(f, "| Empty | Graceful error | <result> | PASS/FAIL |")?;
        writeln!(f)?;
        writeln!(f, "## Issues Found")?;
        writeln!(f)?;
        writeln!(f, "### Critical (Must Fix)")?;
        writeln!(f, "### Warnings (Should Fix)")?;
        writeln!(f, "### Observations")?;
        writeln!(f)?;
        writeln!(f, "## Recommendation")?;
        writeln!(f, "APPROVE | APPROVE WITH RESERVATIONS | REJECT, with the reason")?;
        writeln!(f, "```")?;
        writeln!(f)?;

        writeln!(f, "## Guidelines")?;
        writeln!(f)?;
        writeln!(f, "1. **Be adversarial**: look for problems, not for confirmation")?;
        writeln!(f, "2. **Run the application**: reading test results is not enough")?;
        writeln!(f, "3. **Compare to requirements**: check against `{BRIEF_FILE}`")?;
        writeln!(f, "4. **Be specific**: include exact commands, output and errors")?;
        writeln!(f)?;
        writeln!(
            f,
            "You do not fix issues, modify code or make commits. Fixes belong to the executor \
             (`{}`).",
            agent_name(name)
        )?;
        writeln!(f)?;

        writeln!(f, "## Capture Lessons Learned")?;
        writeln!(f)?;
        writeln!(
            f,
            "For every issue found, append an entry to `{LESSONS_FILE}`, creating it with a \
             `# Lessons Learned` heading if it does not exist:"
        )?;
        writeln!(f)?;
        writeln!(f, "```markdown")?;
        writeln!(f, "## YYYY-MM-DD: <Short Title>")?;
        writeln!(f)?;
        writeln!(f, "- **Issue**: <what you found>")?;
        writeln!(f, "- **Root Cause**: <why: wrong plan, missing edge case>")?;
        writeln!(f, "- **Fix**: <how it was resolved>")?;
        writeln!(f, "- **Pattern**: <the lesson for future plans>")?;
        writeln!(f, "- **Applies To**: {kind}")?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f, "```")?;
        writeln!(f)?;
        writeln!(
            f,
            "If a lesson would help other {kind} projects and holds nothing project specific, \
             offer to share it. The `devplan_format_lesson` tool formats the entry and a \
             ready-to-run `gh issue create` command."
        )?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "Save this file to `{}`", verifier_path(name).display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::validate_agent;
    use crate::templates::TemplateRegistry;

    fn python_stack() -> TechStack {
        let mut stack = TechStack::new("Python 3.11+");
        stack.framework = "Click".into();
        stack.testing = "pytest".into();
        stack.linting = "ruff".into();
        stack.type_checking = "mypy".into();
        stack
    }

    #[test]
    fn test_rules_document_sections() {
        let registry = TemplateRegistry::builtin().unwrap();
        let template = registry.select("CLI").unwrap();
        let mut brief = Brief::new("Task Tracker", "CLI", "Track tasks", "Developers", "2 weeks");
        brief.must_use_tech = vec!["Click".into()];
        let stack = python_stack();

        let output = RulesDocument::new(&brief, &stack, &template)
            .with_test_coverage(90)
            .to_string();

        assert!(output.starts_with("# Task Tracker - Development Rules\n"));
        assert!(output.contains("- **Template**: cli ("));
        assert!(output.contains("| Framework | Click |"));
        assert!(output.contains("### Must Use\n\n- Click\n"));
        assert!(!output.contains("### Cannot Use"));
        assert!(output.contains("Coverage is at least 90%"));
        assert!(output.contains("## Project Rules\n\n1. "));
        assert!(output.contains("pytest tests/ -v --cov"));
    }

    #[test]
    fn test_rules_include_inherited_rules_first() {
        let registry = TemplateRegistry::builtin().unwrap();
        let template = registry.select("API").unwrap();
        let base = registry.get("base").unwrap();
        let brief = Brief::new("Svc", "API", "Serve", "Apps", "1 month");
        let stack = python_stack();

        let output = RulesDocument::new(&brief, &stack, &template).to_string();
        let first_base_rule = &base.rules[0];
        assert!(output.contains(&format!("1. {first_base_rule}")));
    }

    #[test]
    fn test_executor_agent_frontmatter() {
        let stack = python_stack();
        let output = ExecutorAgent::new("Task Tracker", &stack).to_string();

        assert!(output.starts_with("---\nname: task-tracker-executor\n"));
        assert!(output.contains("tools: Read, Write, Edit, Bash, Glob, Grep\nmodel: haiku\n---\n"));
        assert!(output.contains("ruff check src tests"));
        assert!(output.contains("Save this file to `.claude/agents/task-tracker-executor.md`"));
    }

    #[test]
    fn test_verifier_agent_frontmatter_and_features() {
        let features = vec!["Add tasks".to_string(), "List tasks".to_string()];
        let output = VerifierAgent::new("Task Tracker", ProjectKind::Cli)
            .with_features(&features)
            .to_string();

        assert!(output.starts_with("---\nname: task-tracker-verifier\n"));
        assert!(output.contains("tools: Read, Bash, Glob, Grep\nmodel: sonnet\n---\n"));
        assert!(output.contains("task-tracker --help"));
        assert!(output.contains("- [ ] Add tasks\n- [ ] List tasks\n"));
        assert!(output.contains("- **Applies To**: cli"));
        assert!(output.contains("(`task-tracker-executor`)"));
        assert!(output.ends_with("Save this file to `.claude/agents/task-tracker-verifier.md`\n"));
        assert!(validate_agent(&output).is_empty());
    }

    #[test]
    fn test_verifier_smoke_tests_follow_project_kind() {
        let api = VerifierAgent::new("Svc", ProjectKind::Api).to_string();
        assert!(api.contains("curl -i http://localhost:8000/health"));
        assert!(api.contains("For each feature in `PROJECT_BRIEF.md`:"));

        let web = VerifierAgent::new("Shop", ProjectKind::WebApp).to_string();
        assert!(web.contains("**Hydration**"));
        assert!(!web.contains("```bash"));

        let library = VerifierAgent::new("Fast Parse", ProjectKind::Library).to_string();
        assert!(library.contains("Import `fast_parse`"));
        assert!(library.contains("- **Applies To**: library"));
    }

    #[test]
    fn test_generated_agent_passes_validation() {
        let stack = python_stack();
        let output = ExecutorAgent::new("Multi\nLine  Name", &stack).to_string();
        let report = validate_agent(&output);

        assert!(report.is_empty(), "{:?}", report.messages());
    }
}
