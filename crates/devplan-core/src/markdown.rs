//! Line-oriented markdown scanning.
//!
//! These primitives never fail: text without the expected structure yields
//! empty strings, lists and maps.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::models::OrderedMap;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid regex"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+(.+)$").expect("valid regex"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.+)$").expect("valid regex"));
static CHECKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^-?\s*\[x\]\s+(.+)$").expect("valid regex"));
static UNCHECKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\s*\[\s\]\s+(.+)$").expect("valid regex"));
static LEADING_CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[[ x]\]\s*").expect("valid regex"));

/// Section bodies keyed by exact heading text, in first-seen order.
pub type Sections = OrderedMap<String>;

/// Body of a named section, or `""` when the document has no such heading.
pub fn section<'a>(sections: &'a Sections, heading: &str) -> &'a str {
    sections.get(heading).map(String::as_str).unwrap_or("")
}

/// Split a markdown document into sections keyed by heading text.
///
/// Only headings of level 2 through 6 open a section. A level-1 heading line
/// is dropped without closing the section that is already open, and text
/// before the first tracked heading is ignored. A repeated heading replaces
/// the earlier body.
pub fn scan_sections(content: &str) -> Sections {
    let mut sections = Sections::new();
    let mut current: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if let Some(caps) = HEADING.captures(line) {
            if caps[1].len() >= 2 {
                if let Some(heading) = current.take() {
                    sections.insert(heading, body.join("\n").trim().to_string());
                }
                current = Some(caps[2].trim().to_string());
                body.clear();
            }
        } else if current.is_some() {
            body.push(line);
        }
    }

    if let Some(heading) = current {
        sections.insert(heading, body.join("\n").trim().to_string());
    }

    trace!("Scanned {} markdown sections", sections.len());
    sections
}

/// Items of every `-`, `*`, `+` or `N.` list line, markers stripped.
pub fn extract_list_items(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            UNORDERED_ITEM
                .captures(line)
                .or_else(|| ORDERED_ITEM.captures(line))
                .map(|caps| caps[1].trim().to_string())
        })
        .collect()
}

/// Raw value of the first `- **Field**: value` line, case-insensitive on
/// the field name.
pub fn extract_raw_field_value(text: &str, field_name: &str) -> Option<String> {
    let pattern = format!(r"(?i)^-?\s*\*\*{}\*\*:\s*(.+)$", regex::escape(field_name));
    let field = Regex::new(&pattern).ok()?;

    text.split('\n')
        .map(str::trim)
        .find_map(|line| field.captures(line).map(|caps| caps[1].trim().to_string()))
}

/// Value of the first `- **Field**: value` line with a leading `[x]` or
/// `[ ]` token removed, or `""` when no line matches.
pub fn extract_field_value(text: &str, field_name: &str) -> String {
    extract_raw_field_value(text, field_name)
        .map(|value| LEADING_CHECKBOX.replace(&value, "").into_owned())
        .unwrap_or_default()
}

/// Map of checkbox label to checked state for every `- [x] Label` or
/// `- [ ] Label` line. Later duplicates overwrite earlier ones.
pub fn extract_checkbox_fields(text: &str) -> OrderedMap<bool> {
    let mut fields = OrderedMap::new();

    for line in text.split('\n').map(str::trim) {
        if let Some(caps) = CHECKED.captures(line) {
            fields.insert(caps[1].trim(), true);
        } else if let Some(caps) = UNCHECKED.captures(line) {
            fields.insert(caps[1].trim(), false);
        }
    }

    fields
}

/// Key/value pairs from every line containing both `**` and `:`.
///
/// The key is the text before the first `:` with `**` and `-` removed.
/// Pairs with an empty key or value are skipped.
pub fn extract_key_values(text: &str) -> OrderedMap<String> {
    let mut pairs = OrderedMap::new();

    for line in text.split('\n') {
        if !(line.contains("**") && line.contains(':')) {
            continue;
        }
        let Some((left, right)) = line.split_once(':') else {
            continue;
        };
        let key = left.trim().replace("**", "").replace('-', "");
        let key = key.trim();
        let value = right.trim();
        if !key.is_empty() && !value.is_empty() {
            pairs.insert(key, value.to_string());
        }
    }

    pairs
}

/// Section text as one line: list items joined with `"; "`, or the trimmed
/// body when it has no list. `None` for an empty section.
pub fn section_summary(text: &str) -> Option<String> {
    let items = extract_list_items(text);
    let summary = if items.is_empty() {
        text.trim().to_string()
    } else {
        items.join("; ")
    };
    (!summary.is_empty()).then_some(summary)
}
