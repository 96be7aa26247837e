//! Brief parsing pipeline: section scan, field extraction, assembly.
//!
//! ```rust
//! use devplan_core::brief::parse_brief;
//!
//! let brief = parse_brief(
//!     "## Basic Information\n\
//!      - **Project Name**: Demo\n\
//!      - **Project Type**: [x] CLI Tool + [ ] Library\n\
//!      - **Primary Goal**: Plan projects\n\
//!      - **Target Users**: Developers\n\
//!      - **Timeline**: 2 weeks\n",
//! )
//! .unwrap();
//!
//! assert_eq!(brief.project_type, "CLI Tool");
//! assert_eq!(brief.team_size, "1");
//! ```

pub mod assemble;
pub mod extract;

use std::path::Path;

use log::debug;

pub use assemble::{assemble_brief, ExtractedBrief};
pub use extract::{FieldValue, Fields};

use crate::error::{PlannerError, Result};
use crate::markdown::scan_sections;
use crate::models::Brief;

/// Parse brief markdown into a validated [`Brief`].
pub fn parse_brief(content: &str) -> Result<Brief> {
    let sections = scan_sections(content);
    debug!("Parsing brief with {} sections", sections.len());
    assemble_brief(&ExtractedBrief::from_sections(&sections))
}

/// Read and parse a brief file. A missing file is a not-found error.
pub fn parse_brief_file(path: &Path) -> Result<Brief> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            PlannerError::not_found("Brief file", path.display().to_string())
        } else {
            PlannerError::FileSystem {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_brief(&content)
}

/// Accept either a JSON-serialized [`Brief`] or brief markdown.
///
/// Content starting with `{` is tried as JSON first. Required fields are
/// checked either way.
pub fn resolve_brief(content: &str) -> Result<Brief> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') {
        match serde_json::from_str::<Brief>(trimmed) {
            Ok(brief) => {
                let errors = brief.validate();
                if !errors.is_empty() {
                    return Err(PlannerError::validation(errors));
                }
                return Ok(brief);
            }
            Err(err) => debug!("Brief content is not JSON ({err}), parsing as markdown"),
        }
    }
    parse_brief(content)
}
