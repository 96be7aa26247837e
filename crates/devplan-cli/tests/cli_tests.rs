use std::{fs, path::Path};

use assert_cmd::Command;
use devplan_core::{Phase, Plan, Subtask, Task, TechStack};
use predicates::prelude::*;
use tempfile::TempDir;

const BRIEF: &str = "\
# Project Brief: Taskline

## Basic Information

- **Project Name**: Taskline
- **Project Type**: [x] CLI Tool
- **Primary Goal**: Track tasks from the terminal
- **Target Users**: Developers
- **Timeline**: 2 weeks
- **Team Size**: 1

## Key Features

- Add tasks
- List tasks

## Must Use

- Python
";

/// Helper function to create a temporary directory holding PROJECT_BRIEF.md
fn create_cli_test_environment() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join("PROJECT_BRIEF.md"), BRIEF).expect("Failed to write brief");
    temp_dir
}

/// Helper function to create a Command running inside `dir` with --no-color.
///
/// XDG_CONFIG_HOME points into the temp dir so user templates never leak in.
fn devplan_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("devplan").expect("Failed to find devplan binary");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .arg("--no-color");
    cmd
}

fn write_plan(dir: &Path) {
    let mut subtasks = Vec::new();
    for (id, title, prerequisites) in [
        ("0.1.1", "Initialize repository", vec![]),
        ("0.1.2", "Configure tooling", vec!["0.1.1".to_string()]),
    ] {
        let mut subtask = Subtask::new(id, format!("{title} (Single Session)"));
        subtask.prerequisites = prerequisites;
        subtask.deliverables = vec![
            format!("{title} done"),
            "Tests written".to_string(),
            "Docs updated".to_string(),
        ];
        subtasks.push(subtask);
    }

    let mut task = Task::new("0.1", "Project Setup");
    task.subtasks = subtasks;
    let mut phase = Phase::new("0", "Foundation", "Complete foundation phase");
    phase.tasks = vec![task];
    let mut plan = Plan::new("Taskline");
    plan.phases = vec![phase];
    plan.tech_stack = Some(TechStack::new("Python 3.11+"));

    fs::write(dir.join("DEVELOPMENT_PLAN.md"), plan.to_string()).expect("Failed to write plan");
}

#[test]
fn test_cli_parse_brief_markdown() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .arg("parse")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Project Brief: Taskline"))
        .stdout(predicate::str::contains("- **Type**: CLI Tool"));
}

#[test]
fn test_cli_parse_brief_json() {
    let temp_dir = create_cli_test_environment();

    let output = devplan_cmd(temp_dir.path())
        .args(["parse", "--json"])
        .output()
        .expect("Failed to run devplan");
    assert!(output.status.success());

    let brief: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(brief["project_name"], "Taskline");
    assert_eq!(brief["team_size"], "1");
}

#[test]
fn test_cli_parse_incomplete_brief_fails() {
    let temp_dir = create_cli_test_environment();
    fs::write(
        temp_dir.path().join("PROJECT_BRIEF.md"),
        "- **Project Name**: Orphan\n",
    )
    .expect("Failed to write brief");

    devplan_cmd(temp_dir.path())
        .arg("parse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("project_type"));
}

#[test]
fn test_cli_parse_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    devplan_cmd(temp_dir.path())
        .args(["parse", "nowhere.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read nowhere.md"));
}

#[test]
fn test_cli_generate_writes_documents() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .args(["generate", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Wrote"))
        .stdout(predicate::str::contains("DEVELOPMENT_PLAN.md"));

    let out = temp_dir.path().join("out");
    let rules = fs::read_to_string(out.join("CLAUDE.md")).expect("CLAUDE.md written");
    assert!(rules.starts_with("# Taskline - Development Rules"));
    assert!(rules.contains("80%"));

    let plan = fs::read_to_string(out.join("DEVELOPMENT_PLAN.md")).expect("plan written");
    assert!(plan.starts_with("# Development Plan: Taskline"));
    assert!(plan.contains("Click"));

    assert!(out.join(".claude/agents/taskline-executor.md").is_file());
    let verifier = fs::read_to_string(out.join(".claude/agents/taskline-verifier.md"))
        .expect("verifier written");
    assert!(verifier.contains("- [ ] Add tasks"));

    devplan_cmd(temp_dir.path())
        .args(["validate", "--agent", "out/.claude/agents/taskline-verifier.md"])
        .assert()
        .success();
}

#[test]
fn test_cli_generate_with_template_and_coverage() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .args(["generate", "--template", "base", "--test-coverage", "95"])
        .assert()
        .success();

    let rules = fs::read_to_string(temp_dir.path().join("CLAUDE.md")).expect("CLAUDE.md written");
    assert!(rules.contains("95%"));
    let plan =
        fs::read_to_string(temp_dir.path().join("DEVELOPMENT_PLAN.md")).expect("plan written");
    assert!(plan.contains("## Phase 1: Core Features"));
}

#[test]
fn test_cli_generate_refuses_to_overwrite() {
    let temp_dir = create_cli_test_environment();
    fs::write(temp_dir.path().join("CLAUDE.md"), "keep me").expect("Failed to write file");

    devplan_cmd(temp_dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to overwrite"))
        .stderr(predicate::str::contains("--force"));

    let rules = fs::read_to_string(temp_dir.path().join("CLAUDE.md")).expect("file kept");
    assert_eq!(rules, "keep me");
    assert!(!temp_dir.path().join("DEVELOPMENT_PLAN.md").exists());

    devplan_cmd(temp_dir.path())
        .args(["generate", "--force"])
        .assert()
        .success();

    let rules = fs::read_to_string(temp_dir.path().join("CLAUDE.md")).expect("file replaced");
    assert!(rules.starts_with("# Taskline"));
}

#[test]
fn test_cli_generate_unknown_template() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .args(["generate", "-t", "mobile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template 'mobile' not found"));
}

#[test]
fn test_cli_validate_generated_skeleton_fails() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .arg("generate")
        .assert()
        .success();

    devplan_cmd(temp_dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("**Status**: INVALID"))
        .stdout(predicate::str::contains("must have at least one task"))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn test_cli_validate_filled_plan() {
    let temp_dir = create_cli_test_environment();
    write_plan(temp_dir.path());

    devplan_cmd(temp_dir.path())
        .args(["validate", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found."));
}

#[test]
fn test_cli_validate_json_summary() {
    let temp_dir = create_cli_test_environment();
    write_plan(temp_dir.path());

    let output = devplan_cmd(temp_dir.path())
        .args(["validate", "--json"])
        .output()
        .expect("Failed to run devplan");
    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(summary["valid"], true);
    assert_eq!(summary["error_count"], 0);
}

#[test]
fn test_cli_validate_generated_agent() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .arg("generate")
        .assert()
        .success();

    devplan_cmd(temp_dir.path())
        .args([
            "validate",
            "--agent",
            "--strict",
            ".claude/agents/taskline-executor.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Status**: VALID"));
}

#[test]
fn test_cli_templates_list() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Available Templates"))
        .stdout(predicate::str::contains("## api"))
        .stdout(predicate::str::contains("## web-app"));
}

#[test]
fn test_cli_templates_filter_json() {
    let temp_dir = create_cli_test_environment();

    let output = devplan_cmd(temp_dir.path())
        .args(["ls", "--project-type", "api", "--json"])
        .output()
        .expect("Failed to run devplan");
    assert!(output.status.success());

    let templates: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let templates = templates.as_array().expect("array of templates");
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], "api");
}

#[test]
fn test_cli_templates_from_user_dir() {
    let temp_dir = create_cli_test_environment();
    let templates_dir = temp_dir.path().join("templates");
    fs::create_dir(&templates_dir).expect("Failed to create templates dir");
    fs::write(
        templates_dir.join("desktop.yaml"),
        "name: desktop\ndescription: Desktop applications\nversion: \"1.0\"\nextends: base\nproject_types:\n  - Desktop App\n",
    )
    .expect("Failed to write template");

    devplan_cmd(temp_dir.path())
        .args(["--templates-dir", "templates", "templates", "-p", "Desktop App"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## desktop"))
        .stdout(predicate::str::contains("Desktop applications"));
}

#[test]
fn test_cli_missing_templates_dir() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .args(["--templates-dir", "missing", "templates"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize planner"));
}

#[test]
fn test_cli_subtask_show() {
    let temp_dir = create_cli_test_environment();
    write_plan(temp_dir.path());

    devplan_cmd(temp_dir.path())
        .args(["subtask", "0.1.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Task 0.1**: Project Setup"))
        .stdout(predicate::str::contains("Configure tooling"));
}

#[test]
fn test_cli_subtask_errors() {
    let temp_dir = create_cli_test_environment();
    write_plan(temp_dir.path());

    devplan_cmd(temp_dir.path())
        .args(["s", "9.9.9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Subtask '9.9.9' not found"));

    devplan_cmd(temp_dir.path())
        .args(["s", "1.2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be in format X.Y.Z"));
}

#[test]
fn test_cli_complete_updates_plan_file() {
    let temp_dir = create_cli_test_environment();
    write_plan(temp_dir.path());

    devplan_cmd(temp_dir.path())
        .args(["complete", "0.1.1", "--notes", "Repository initialized with CI"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtask 0.1.1 marked complete"))
        .stdout(predicate::str::contains("(1/2 subtasks completed)"));

    let plan =
        fs::read_to_string(temp_dir.path().join("DEVELOPMENT_PLAN.md")).expect("plan kept");
    assert!(plan.contains("Repository initialized with CI"));

    devplan_cmd(temp_dir.path())
        .args(["subtask", "0.1.1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"completed\""));
}

#[test]
fn test_cli_complete_rejects_short_notes() {
    let temp_dir = create_cli_test_environment();
    write_plan(temp_dir.path());
    let before = fs::read_to_string(temp_dir.path().join("DEVELOPMENT_PLAN.md")).expect("plan");

    devplan_cmd(temp_dir.path())
        .args(["c", "0.1.1", "-n", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("completion_notes"));

    let after = fs::read_to_string(temp_dir.path().join("DEVELOPMENT_PLAN.md")).expect("plan");
    assert_eq!(before, after);
}

#[test]
fn test_cli_complete_refuses_plan_with_unknown_status() {
    let temp_dir = create_cli_test_environment();
    write_plan(temp_dir.path());
    let path = temp_dir.path().join("DEVELOPMENT_PLAN.md");
    let before = fs::read_to_string(&path).expect("plan").replace(
        "**Status**: pending\n\n**Prerequisites**:\n- 0.1.1",
        "**Status**: done\n\n**Prerequisites**:\n- 0.1.1",
    ) + "## Notes\n\nKeep this section.\n";
    fs::write(&path, &before).expect("Failed to write plan");

    devplan_cmd(temp_dir.path())
        .args(["complete", "0.1.1", "--notes", "Repository initialized with CI"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Status 'done' is invalid"));

    let after = fs::read_to_string(&path).expect("plan");
    assert_eq!(before, after);
}

#[test]
fn test_cli_lesson_prints_entry_and_command() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .args([
            "lesson",
            "--title",
            "Empty name crash",
            "--issue",
            "The add command crashed on an empty name",
            "--root-cause",
            "The plan listed no empty-input case",
            "--fix",
            "Rejected empty names with a clear error",
            "--pattern",
            "Every CLI argument needs an empty-input test",
            "-p",
            "cli",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Formatted Lesson: Empty name crash"))
        .stdout(predicate::str::contains("- **Applies To**: cli"))
        .stdout(predicate::str::contains("--label \"lesson-learned,cli\""));
}

#[test]
fn test_cli_lesson_rejects_short_fields() {
    let temp_dir = create_cli_test_environment();

    devplan_cmd(temp_dir.path())
        .args([
            "l",
            "--title",
            "Empty name crash",
            "--issue",
            "short",
            "--root-cause",
            "The plan listed no empty-input case",
            "--fix",
            "Rejected empty names",
            "--pattern",
            "Every CLI argument needs an empty-input test",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'issue'"));
}
