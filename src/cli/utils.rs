//! Shared CLI utilities.

use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use typecfg::domain::Value;
use typecfg::Sources;

/// Assemble store sources from the root path, `--add-config` files and the
/// flattened `-D NAME TYPE VALUE` triples.
pub fn build_sources(root: &Path, add_config: &[PathBuf], define: &[String]) -> Result<Sources> {
    if define.len() % 3 != 0 {
        anyhow::bail!("Each -D definition needs a name, a type and a value");
    }

    let mut sources = Sources::new(root);
    for path in add_config {
        sources = sources.with_file(path);
    }
    for triple in define.chunks_exact(3) {
        sources = sources.with_define(&triple[0], &triple[1], &triple[2]);
    }
    Ok(sources)
}

/// Rewrite the attached `-DNAME` form into `-D NAME` so clap sees three
/// values. Arguments after a bare `--` are left alone.
pub fn split_attached_defines<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("--") => {
                passthrough = true;
                out.push(arg);
            }
            Some(text) if text.len() > 2 && text.starts_with("-D") => {
                out.push(OsString::from("-D"));
                out.push(OsString::from(&text[2..]));
            }
            _ => out.push(arg),
        }
    }
    out
}

/// Render a value as it would be written in a configuration file.
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::Char(c) => match c {
            '\n' => r"'\n'".to_string(),
            '\r' => r"'\r'".to_string(),
            '\t' => r"'\t'".to_string(),
            other => format!("'{other}'"),
        },
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}
