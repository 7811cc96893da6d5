//! Merged configuration store with typed lookups

use crate::config::expand::expand_variables;
use crate::config::loader::load_table;
use crate::domain::{Table, Value, ValueKind, Warning};
use crate::error::{ConfigError, Origin, Result};
use crate::parse::{is_valid_name, parse_value, ParseError};
use std::path::{Path, PathBuf};

/// A source applied on top of the primary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// Another configuration file, merged with warn-and-overwrite.
    File(PathBuf),
    /// A `(name, type, text)` triple, e.g. from `-D NAME TYPE VALUE`.
    Define { name: String, type_name: String, text: String },
}

/// Everything a store is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub primary: PathBuf,
    pub overrides: Vec<Override>,
}

impl Sources {
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self { primary: primary.into(), overrides: Vec::new() }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.overrides.push(Override::File(path.into()));
        self
    }

    pub fn with_define(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.overrides.push(Override::Define {
            name: name.into(),
            type_name: type_name.into(),
            text: text.into(),
        });
        self
    }
}

/// A merged, read-only configuration table.
#[derive(Debug, Clone)]
pub struct Store {
    sources: Sources,
    table: Table,
    warnings: Vec<Warning>,
}

impl Store {
    /// Load a single file with no overrides.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::build(Sources::new(path))
    }

    /// Load the primary file, then override files in order, then defines in
    /// order. Files warn on collisions; defines win silently.
    pub fn build(sources: Sources) -> Result<Self> {
        let loaded = load_table(&sources.primary)?;
        let mut table = loaded.table;
        let mut warnings = loaded.warnings;

        for source in &sources.overrides {
            if let Override::File(path) = source {
                merge_file(&mut table, &mut warnings, path)?;
            }
        }

        for source in &sources.overrides {
            if let Override::Define { name, type_name, text } = source {
                table.insert(name.clone(), parse_define(name, type_name, text)?);
            }
        }

        tracing::debug!(
            "Built configuration store from {} with {} entries",
            sources.primary.display(),
            table.len()
        );
        Ok(Self { sources, table, warnings })
    }

    /// Rebuild from the same sources, picking up any file changes.
    pub fn reload(&self) -> Result<Self> {
        Self::build(self.sources.clone())
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.table.get(name)
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        match self.lookup(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(mismatch(name, ValueKind::Int, other)),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        match self.lookup(name)? {
            Value::Float(v) => Ok(*v),
            other => Err(mismatch(name, ValueKind::Float, other)),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.lookup(name)? {
            Value::Bool(v) => Ok(*v),
            other => Err(mismatch(name, ValueKind::Bool, other)),
        }
    }

    pub fn get_char(&self, name: &str) -> Result<char> {
        match self.lookup(name)? {
            Value::Char(v) => Ok(*v),
            other => Err(mismatch(name, ValueKind::Char, other)),
        }
    }

    /// String value with `$NAME` references expanded against this store.
    pub fn get_string(&self, name: &str) -> Result<String> {
        let raw = self.raw_string(name)?;
        self.expand_as(name, raw)
    }

    /// Expand `$NAME` references in arbitrary text against this store.
    pub fn expand(&self, text: &str) -> Result<String> {
        self.expand_as("<text>", text)
    }

    fn expand_as(&self, owner: &str, text: &str) -> Result<String> {
        expand_variables(owner, text, |variable| self.raw_string(variable))
    }

    /// Stored string without expansion.
    fn raw_string(&self, name: &str) -> Result<&str> {
        match self.lookup(name)? {
            Value::String(v) => Ok(v.as_str()),
            other => Err(mismatch(name, ValueKind::String, other)),
        }
    }

    /// The stored value; each getter checks the kind itself.
    fn lookup(&self, name: &str) -> Result<&Value> {
        self.table.get(name).ok_or_else(|| ConfigError::NotFound { name: name.to_string() })
    }
}

fn mismatch(name: &str, expected: ValueKind, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch { name: name.to_string(), expected, found: found.kind() }
}

fn merge_file(table: &mut Table, warnings: &mut Vec<Warning>, path: &Path) -> Result<()> {
    let loaded = load_table(path)?;
    warnings.extend(loaded.warnings);
    for (name, value) in loaded.table {
        if table.insert(name.clone(), value).is_some() {
            let warning = Warning::MergeRedefined { name, file: path.to_path_buf(), location: None };
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }
    }
    Ok(())
}

fn parse_define(name: &str, type_name: &str, text: &str) -> Result<Value> {
    if !is_valid_name(name) {
        return Err(ConfigError::InvalidName { name: name.to_string() });
    }
    parse_value(type_name, text).map_err(|err| {
        let origin = Origin::Define(name.to_string());
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
    })
}
