//! Configuration loading and merging
//!
//! Loads typed configuration files (with nested `use` includes), merges
//! override files and command-line defines on top, and serves typed lookups
//! with `$NAME` expansion for strings.

pub mod decode;
pub mod expand;
pub mod global;
pub mod loader;
pub mod store;

pub use loader::{load_table, Loaded};
pub use store::{Override, Sources, Store};
