//! Config file loading with nested includes

use crate::config::decode::decode_text;
use crate::domain::{SourceLocation, Table, Warning};
use crate::error::{ConfigError, Origin, Result};
use crate::parse::{classify_line, parse_value, Line, ParseError};
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded table and the redefinitions noticed while building it.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub table: Table,
    pub warnings: Vec<Warning>,
}

/// Load `path` and everything it includes into one flat table.
///
/// Includes are resolved against the including file's directory and applied
/// at their position in the file, so later lines overwrite earlier ones.
pub fn load_table(path: &Path) -> Result<Loaded> {
    let mut warnings = Vec::new();
    let table = load_into(path, &mut Vec::new(), &mut warnings)?;
    Ok(Loaded { table, warnings })
}

fn load_into(path: &Path, stack: &mut Vec<PathBuf>, warnings: &mut Vec<Warning>) -> Result<Table> {
    let bytes = fs::read(path)
        .map_err(|source| ConfigError::FileNotFound { path: path.to_path_buf(), source })?;
    let (content, encoding) = decode_text(&bytes);
    tracing::debug!("Loading configuration file {} ({})", path.display(), encoding);

    stack.push(identity(path));
    let result = load_lines(path, &content, stack, warnings);
    stack.pop();
    result
}

fn load_lines(
    path: &Path,
    content: &str,
    stack: &mut Vec<PathBuf>,
    warnings: &mut Vec<Warning>,
) -> Result<Table> {
    let mut table = Table::new();

    for (index, raw) in content.lines().enumerate() {
        let location = SourceLocation::new(path, index + 1);
        let line =
            classify_line(raw).ok_or_else(|| ConfigError::Syntax { location: location.clone() })?;

        match line {
            Line::Blank => {}
            Line::Include { path: include } => {
                let include_path = resolve_include(path, include, &location)?;
                if stack.contains(&identity(&include_path)) {
                    return Err(ConfigError::IncludeCycle { location, path: include_path });
                }
                tracing::debug!("Resolved include {} from {}", include_path.display(), location);

                let included = load_into(&include_path, stack, warnings)?;
                for (name, value) in included {
                    if table.insert(name.clone(), value).is_some() {
                        let warning = Warning::MergeRedefined {
                            name,
                            file: include_path.clone(),
                            location: Some(location.clone()),
                        };
                        tracing::warn!("{}", warning);
                        warnings.push(warning);
                    }
                }
            }
            Line::Assignment { type_name, name, value: text } => {
                let value = parse_value(type_name, text).map_err(|err| {
                    let origin = Origin::File(location.clone());
                    match err {
                        ParseError::InvalidTypeName => {
                            ConfigError::InvalidTypeName { origin, type_name: type_name.to_string() }
                        }
                        ParseError::InvalidSyntax => ConfigError::InvalidValueFormat {
                            origin,
                            type_name: type_name.to_string(),
                            text: text.to_string(),
                        },
                    }
                })?;

                if table.insert(name, value).is_some() {
                    let warning = Warning::Redefined { name: name.to_string(), location };
                    tracing::warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }
    }

    Ok(table)
}

/// `use "x"` in `dir/file.cfg` refers to `dir/x`. Absolute paths are refused.
fn resolve_include(path: &Path, include: &str, location: &SourceLocation) -> Result<PathBuf> {
    let include = Path::new(include);
    if include.is_absolute() || include.has_root() {
        return Err(ConfigError::AbsoluteInclude {
            location: location.clone(),
            path: include.to_path_buf(),
        });
    }
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(dir.join(include))
}

/// Best-effort identity for cycle detection: canonical when the file exists.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
