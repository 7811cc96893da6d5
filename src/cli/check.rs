//! Check command implementation

use anyhow::Result;
use typecfg::{Sources, Store};

pub fn run(sources: Sources) -> Result<()> {
    let store = Store::build(sources)?;

    for warning in store.warnings() {
        println!("warning: {warning}");
    }
    println!(
        "{}: {} entries, {} warnings",
        store.sources().primary.display(),
        store.table().len(),
        store.warnings().len()
    );
    Ok(())
}
