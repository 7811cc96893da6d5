//! typecfg: inspect typed key/value configuration files
//!
//! Loads a configuration file with its includes, applies `--add-config` files
//! and `-D` defines, and prints values.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
