//! Core data types shared by the parser, loader and store

use serde::Serialize;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::String(_) => ValueKind::String,
        }
    }

    /// JSON view of the stored payload (strings are not expanded).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Value::from(*v),
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Char(v) => serde_json::Value::String(v.to_string()),
            Value::String(v) => serde_json::Value::String(v.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

/// The kind of a stored value. Type-tag aliases never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    Char,
    String,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Char => "char",
            ValueKind::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type tag as written in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Hex,
    Octal,
    Float,
    Bool,
    Boolean,
    Char,
    String,
}

impl TypeTag {
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "int" => TypeTag::Int,
            "hex" => TypeTag::Hex,
            "octal" => TypeTag::Octal,
            "float" => TypeTag::Float,
            "bool" => TypeTag::Bool,
            "boolean" => TypeTag::Boolean,
            "char" => TypeTag::Char,
            "string" => TypeTag::String,
            _ => return None,
        };
        Some(tag)
    }

    /// Canonical stored kind: `hex`/`octal` store ints, `boolean` stores bools.
    pub fn kind(self) -> ValueKind {
        match self {
            TypeTag::Int | TypeTag::Hex | TypeTag::Octal => ValueKind::Int,
            TypeTag::Float => ValueKind::Float,
            TypeTag::Bool | TypeTag::Boolean => ValueKind::Bool,
            TypeTag::Char => ValueKind::Char,
            TypeTag::String => ValueKind::String,
        }
    }
}

/// Flat name to value mapping. Last write wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    entries: HashMap<String, Value>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Entries sorted by name, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<(&str, &Value)> =
            self.entries.iter().map(|(name, value)| (name.as_str(), value)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A file and 1-based line number, used for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: &Path, line: usize) -> Self {
        Self { file: file.to_path_buf(), line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.file.display(), self.line)
    }
}

/// A non-fatal redefinition noticed while loading or merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An assignment rebinds a name already defined earlier in the same load.
    Redefined { name: String, location: SourceLocation },
    /// A merged file (include or override file) rebinds an existing name.
    MergeRedefined { name: String, file: PathBuf, location: Option<SourceLocation> },
}

impl Warning {
    pub fn name(&self) -> &str {
        match self {
            Warning::Redefined { name, .. } | Warning::MergeRedefined { name, .. } => name,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Redefined { name, location } => write!(
                f,
                "configuration file {location}: configuration variable {name} is already bound"
            ),
            Warning::MergeRedefined { name, file, location: Some(location) } => write!(
                f,
                "include of configuration file {} ({location}): configuration variable {name} is already bound",
                file.display()
            ),
            Warning::MergeRedefined { name, file, location: None } => write!(
                f,
                "configuration file {}: configuration variable {name} is already bound",
                file.display()
            ),
        }
    }
}
