//! typecfg: typed key/value configuration files
//!
//! Files are lines of `<type> <name> = <value>` with `#` comments and
//! `use "<relative/path>"` includes. A [`Store`] merges a primary file with
//! override files and explicit defines and serves typed lookups.

pub mod config;
pub mod domain;
pub mod error;
pub mod parse;

pub use config::{Override, Sources, Store};
pub use domain::{SourceLocation, Table, TypeTag, Value, ValueKind, Warning};
pub use error::{ConfigError, Origin};
