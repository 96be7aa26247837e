#![allow(dead_code)]

use devplan_core::{models::Subtask, Phase, Plan, Planner, PlannerBuilder, Task, TechStack};

/// A brief exercising every section the extractors read.
pub const FULL_BRIEF: &str = "\
# Project Brief: Ledgerly

## Basic Information

- **Project Name**: Ledgerly
- **Project Type**: [ ] CLI Tool + [x] API + [ ] Library
- **Primary Goal**: Reconcile bank statements against invoices
- **Target Users**: Small accounting teams
- **Timeline**: 6 weeks
- **Team Size**: 2

## Functional Requirements

### Key Features

- Import CSV statements
- Match payments to invoices
- Export reconciliation reports

### Nice-to-Have Features

- Email digests

### Success Criteria

1. 95% of payments matched automatically
2. Reports generated in under a minute

### Known Challenges

- Inconsistent bank CSV formats

## Technical Constraints

### Must Use

- Python
- Celery

### Cannot Use

- Docker

### Deployment Target

- AWS Lambda

### Budget Constraints

Under $50 per month

## Quality Requirements

### Performance

- **Response Time**: under 200ms
- **Throughput**: 50 requests per second

### Security

- **Authentication**: API keys

### Availability

- **Uptime**: 99.5%

## Team & Resources

### Team Composition

- [x] Backend developer
- [ ] Designer

### Existing Knowledge

- Python
- PostgreSQL

### Learning Budget

- One week for Celery

### Infrastructure Access

- AWS account

## Architecture Vision

A small FastAPI service with a Celery worker for imports.
";

/// Helper function to create a planner with only built-in templates
pub fn create_test_planner() -> Planner {
    PlannerBuilder::new()
        .builtin_only()
        .build()
        .expect("Failed to create planner")
}

fn subtask(id: &str, title: &str, prerequisites: &[&str]) -> Subtask {
    let mut subtask = Subtask::new(id, format!("{title} (Single Session)"));
    subtask.prerequisites = prerequisites.iter().map(|p| p.to_string()).collect();
    subtask.deliverables = vec![
        format!("{title} implemented"),
        "Tests written".to_string(),
        "Docs updated".to_string(),
    ];
    subtask.success_criteria = vec!["All tests pass".to_string()];
    subtask
}

/// A filled-in two-phase plan that passes strict validation.
pub fn sample_plan() -> Plan {
    let mut setup = Task::new("0.1", "Project Setup");
    setup.subtasks = vec![
        subtask("0.1.1", "Initialize repository", &[]),
        subtask("0.1.2", "Configure tooling", &["0.1.1"]),
    ];
    let mut foundation = Phase::new("0", "Foundation", "Complete foundation phase");
    foundation.tasks = vec![setup];

    let mut import = Task::new("1.1", "Statement Import");
    import.subtasks = vec![subtask("1.1.1", "CSV parser", &["0.1.2"])];
    let mut core = Phase::new("1", "Core Features", "Complete core features phase");
    core.tasks = vec![import];

    let mut plan = Plan::new("Ledgerly");
    plan.phases = vec![foundation, core];
    plan.tech_stack = Some(TechStack::new("Python 3.11+"));
    plan
}
