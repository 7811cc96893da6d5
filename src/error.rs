//! Error types for loading and querying configuration

use crate::domain::{SourceLocation, ValueKind};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Where a value came from, for parse diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(SourceLocation),
    Define(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File(location) => write!(f, "configuration file {location}"),
            Origin::Define(name) => write!(f, "user-set configuration variable {name}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("syntax error when parsing configuration file {location}: unexpected end of line")]
    Syntax { location: SourceLocation },

    #[error("syntax error when parsing {origin}: invalid type name {type_name}")]
    InvalidTypeName { origin: Origin, type_name: String },

    #[error("syntax error when parsing {origin}: invalid value format {text:?} for type {type_name}")]
    InvalidValueFormat { origin: Origin, type_name: String, text: String },

    #[error("could not find configuration file {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid include in configuration file {location}: absolute path {} is not permitted", path.display())]
    AbsoluteInclude { location: SourceLocation, path: PathBuf },

    #[error("include cycle in configuration file {location}: {} is already being loaded", path.display())]
    IncludeCycle { location: SourceLocation, path: PathBuf },

    #[error("invalid configuration variable name {name:?}")]
    InvalidName { name: String },

    #[error("could not find configuration variable {name}")]
    NotFound { name: String },

    #[error(
        "incompatible type for configuration variable {name}: looked for {expected}, but found {found}"
    )]
    TypeMismatch { name: String, expected: ValueKind, found: ValueKind },

    #[error("could not expand ${variable} in configuration variable {name}")]
    UnresolvedVariable {
        name: String,
        variable: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("configuration has not been initialized")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
