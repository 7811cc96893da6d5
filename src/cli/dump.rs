//! Dump command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use typecfg::domain::{Value, ValueKind};
use typecfg::{Sources, Store};

use super::utils::render_literal;

#[derive(Args)]
pub struct DumpArgs {
    /// Print a JSON object instead of configuration lines
    #[arg(long)]
    pub json: bool,

    /// Expand `$NAME` references in string values
    #[arg(long)]
    pub expand: bool,
}

#[derive(Serialize)]
struct DumpEntry {
    #[serde(rename = "type")]
    kind: ValueKind,
    value: serde_json::Value,
}

pub fn run(sources: Sources, args: DumpArgs) -> Result<()> {
    let store = Store::build(sources)?;
    let entries = collect_entries(&store, args.expand)?;

    if args.json {
        // BTreeMap keeps the output sorted by name.
        let object: BTreeMap<&str, DumpEntry> = entries
            .iter()
            .map(|(name, value)| {
                (name.as_str(), DumpEntry { kind: value.kind(), value: value.to_json() })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for (name, value) in &entries {
            println!("{} {} = {}", value.kind(), name, render_literal(value));
        }
    }
    Ok(())
}

fn collect_entries(store: &Store, expand: bool) -> Result<Vec<(String, Value)>> {
    let mut entries = Vec::with_capacity(store.table().len());
    for (name, value) in store.table().sorted() {
        let value = match value {
            Value::String(_) if expand => Value::String(store.get_string(name)?),
            other => other.clone(),
        };
        entries.push((name.to_string(), value));
    }
    Ok(entries)
}
