//! A lesson learned, formatted for the local log and for sharing.

use std::fmt;

use jiff::civil::Date;

use crate::operations::LESSONS_FILE;
use crate::params::FormatLesson;

/// Label every shared lesson carries besides its project type.
pub const LESSON_LABEL: &str = "lesson-learned";

/// A [`FormatLesson`] rendered three ways: a `LESSONS_LEARNED.md` entry
/// dated `date`, a GitHub issue body, and the `gh` command that files it.
pub struct LessonDocument<'a> {
    pub lesson: &'a FormatLesson,
    pub date: Date,
}

impl<'a> LessonDocument<'a> {
    pub fn new(lesson: &'a FormatLesson, date: Date) -> Self {
        Self { lesson, date }
    }

    fn title(&self) -> &str {
        self.lesson.title.trim()
    }

    fn project_type(&self) -> &str {
        self.lesson.project_type.trim()
    }

    /// The entry appended to `LESSONS_LEARNED.md`.
    pub fn entry(&self) -> String {
        let lesson = self.lesson;
        format!(
            "## {}: {}\n\n\
             - **Issue**: {}\n\
             - **Root Cause**: {}\n\
             - **Fix**: {}\n\
             - **Pattern**: {}\n\
             - **Applies To**: {}\n\n\
             ---\n",
            self.date,
            self.title(),
            lesson.issue.trim(),
            lesson.root_cause.trim(),
            lesson.fix.trim(),
            lesson.pattern.trim(),
            self.project_type()
        )
    }

    /// Body of the GitHub issue that shares the lesson.
    pub fn issue_body(&self) -> String {
        let lesson = self.lesson;
        format!(
            "## Pattern\n{}\n\n\
             ## Issue\n{}\n\n\
             ## Root Cause\n{}\n\n\
             ## Implementation\n{}\n\n\
             ## Test\n[How to verify this pattern is followed]\n\n\
             ## Project Type\n{}",
            lesson.pattern.trim(),
            lesson.issue.trim(),
            lesson.root_cause.trim(),
            lesson.fix.trim(),
            self.project_type()
        )
    }

    /// `gh issue create` for the current repository. The body goes through
    /// a quoted heredoc so nothing in it is expanded by the shell.
    pub fn gh_command(&self) -> String {
        format!(
            "gh issue create \\\n  \
             --title \"Lesson: {}\" \\\n  \
             --label \"{LESSON_LABEL},{}\" \\\n  \
             --body \"$(cat <<'EOF'\n{}\nEOF\n)\"",
            self.title().replace('"', "\\\""),
            self.project_type(),
            self.issue_body()
        )
    }
}

impl fmt::Display for LessonDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Formatted Lesson: {}", self.title())?;
        writeln!(f)?;
        writeln!(f, "## For {LESSONS_FILE}")?;
        writeln!(f)?;
        writeln!(f, "Append this entry to the project's `{LESSONS_FILE}`:")?;
        writeln!(f)?;
        writeln!(f, "```markdown")?;
        write!(f, "{}", self.entry())?;
        writeln!(f, "```")?;
        writeln!(f)?;
        writeln!(f, "## For a GitHub Issue")?;
        writeln!(f)?;
        writeln!(f, "To share the lesson, run:")?;
        writeln!(f)?;
        writeln!(f, "```bash")?;
        writeln!(f, "{}", self.gh_command())?;
        writeln!(f, "```")?;
        writeln!(f)?;
        writeln!(f, "## Preview")?;
        writeln!(f)?;
        writeln!(f, "**Title**: Lesson: {}", self.title())?;
        writeln!(f, "**Labels**: {LESSON_LABEL}, {}", self.project_type())?;
        writeln!(f, "**Body**:")?;
        writeln!(f)?;
        writeln!(f, "{}", self.issue_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson() -> FormatLesson {
        FormatLesson {
            title: "Empty \"name\" crash".to_string(),
            issue: "The add command crashed on an empty name".to_string(),
            root_cause: "The plan listed no empty-input case".to_string(),
            fix: "Rejected empty names with a clear error".to_string(),
            pattern: "Every CLI argument needs an empty-input test".to_string(),
            project_type: "cli".to_string(),
        }
    }

    #[test]
    fn test_entry_is_dated_and_complete() {
        let lesson = lesson();
        let document = LessonDocument::new(&lesson, Date::constant(2025, 3, 1));

        assert_eq!(
            document.entry(),
            "## 2025-03-01: Empty \"name\" crash\n\n\
             - **Issue**: The add command crashed on an empty name\n\
             - **Root Cause**: The plan listed no empty-input case\n\
             - **Fix**: Rejected empty names with a clear error\n\
             - **Pattern**: Every CLI argument needs an empty-input test\n\
             - **Applies To**: cli\n\n\
             ---\n"
        );
    }

    #[test]
    fn test_gh_command_quotes_title_and_labels() {
        let lesson = lesson();
        let command = LessonDocument::new(&lesson, Date::constant(2025, 3, 1)).gh_command();

        assert!(command.starts_with("gh issue create \\\n"));
        assert!(command.contains("--title \"Lesson: Empty \\\"name\\\" crash\""));
        assert!(command.contains("--label \"lesson-learned,cli\""));
        assert!(command.contains("<<'EOF'\n## Pattern\nEvery CLI argument"));
        assert!(command.ends_with("## Project Type\ncli\nEOF\n)\""));
    }

    #[test]
    fn test_document_sections() {
        let lesson = lesson();
        let output = LessonDocument::new(&lesson, Date::constant(2025, 3, 1)).to_string();

        assert!(output.starts_with("# Formatted Lesson: Empty \"name\" crash\n"));
        assert!(output.contains("## For LESSONS_LEARNED.md"));
        assert!(output.contains("```markdown\n## 2025-03-01: "));
        assert!(output.contains("**Labels**: lesson-learned, cli\n"));
        assert!(output.ends_with("## Project Type\ncli\n"));
    }
}
