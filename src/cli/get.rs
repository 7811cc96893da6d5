//! Get command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use typecfg::domain::{Value, ValueKind};
use typecfg::{ConfigError, Sources, Store};

#[derive(Args)]
pub struct GetArgs {
    /// Configuration variable name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Fail unless the value has this kind
    #[arg(short = 't', long = "type", value_enum, value_name = "KIND")]
    pub kind: Option<KindArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Int,
    Float,
    Bool,
    Char,
    String,
}

impl From<KindArg> for ValueKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Int => ValueKind::Int,
            KindArg::Float => ValueKind::Float,
            KindArg::Bool => ValueKind::Bool,
            KindArg::Char => ValueKind::Char,
            KindArg::String => ValueKind::String,
        }
    }
}

pub fn run(sources: Sources, args: GetArgs) -> Result<()> {
    let store = Store::build(sources)?;
    println!("{}", lookup(&store, &args.name, args.kind.map(ValueKind::from))?);
    Ok(())
}

fn lookup(store: &Store, name: &str, kind: Option<ValueKind>) -> Result<String, ConfigError> {
    let kind = match kind {
        Some(kind) => kind,
        None => store
            .get(name)
            .map(Value::kind)
            .ok_or_else(|| ConfigError::NotFound { name: name.to_string() })?,
    };

    let rendered = match kind {
        ValueKind::Int => store.get_int(name)?.to_string(),
        ValueKind::Float => store.get_float(name)?.to_string(),
        ValueKind::Bool => store.get_bool(name)?.to_string(),
        ValueKind::Char => store.get_char(name)?.to_string(),
        ValueKind::String => store.get_string(name)?,
    };
    Ok(rendered)
}
