//! `$NAME` expansion inside string values

use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z][A-Za-z0-9_-]*)").expect("valid variable regex"));

/// Replace every `$NAME` in `text` with `lookup(NAME)`.
///
/// Substituted text is not scanned again, so expansion is exactly one level
/// deep. A `$` that is not followed by a name is copied through unchanged.
/// `owner` names the value being expanded and only feeds error messages.
pub fn expand_variables<'a, F>(owner: &str, text: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Result<&'a str>,
{
    let mut expanded = String::with_capacity(text.len());
    let mut last = 0;

    for caps in VARIABLE_RE.captures_iter(text) {
        let (Some(whole), Some(variable)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let replacement = lookup(variable.as_str()).map_err(|source| {
            ConfigError::UnresolvedVariable {
                name: owner.to_string(),
                variable: variable.as_str().to_string(),
                source: Box::new(source),
            }
        })?;
        expanded.push_str(&text[last..whole.start()]);
        expanded.push_str(replacement);
        last = whole.end();
    }

    expanded.push_str(&text[last..]);
    Ok(expanded)
}
