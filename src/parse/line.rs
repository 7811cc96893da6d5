//! Line classification for configuration files

use once_cell::sync::Lazy;
use regex::Regex;

static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^use "(.*)"$"#).expect("valid include regex"));

// A value item is either one char that is not newline, `#` or space, or a
// greedy double-quoted run. Trailing spaces and a `#` comment may follow.
static ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([A-Za-z][A-Za-z0-9_-]*) +([A-Za-z][A-Za-z0-9_-]*) *= *((?:[^\n# ]|".*")*) *(?:#.*)?$"#,
    )
    .expect("valid assignment regex")
});

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid name regex"));

/// A classified configuration line, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty, spaces only, or a comment.
    Blank,
    /// `use "<path>"`; the path is taken verbatim.
    Include { path: &'a str },
    /// `<type> <name> = <value>`; the value has leading whitespace trimmed.
    Assignment { type_name: &'a str, name: &'a str, value: &'a str },
}

/// Classify one line (without its newline). `None` means the line matches
/// neither the include nor the assignment grammar.
pub fn classify_line(line: &str) -> Option<Line<'_>> {
    if is_blank(line) {
        return Some(Line::Blank);
    }

    if let Some(caps) = INCLUDE_RE.captures(line) {
        let path = caps.get(1).map_or("", |m| m.as_str());
        return Some(Line::Include { path });
    }

    let caps = ASSIGNMENT_RE.captures(line)?;
    let type_name = caps.get(1)?.as_str();
    let name = caps.get(2)?.as_str();
    let value = caps.get(3).map_or("", |m| m.as_str()).trim_start();
    Some(Line::Assignment { type_name, name, value })
}

/// Only literal spaces count as blank; a tab makes the line significant.
fn is_blank(line: &str) -> bool {
    line.chars().take_while(|&c| c != '#').all(|c| c == ' ')
}

/// Whether `name` is a legal configuration variable name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}
