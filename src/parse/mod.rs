//! Configuration text parsing
//!
//! Line grammar and typed literal parsing. Neither touches the filesystem.

pub mod line;
pub mod value;

pub use line::{classify_line, is_valid_name, Line};
pub use value::{parse_tagged, parse_value, ParseError};
