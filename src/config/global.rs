//! Process-wide configuration store
//!
//! `init` records where configuration comes from, `get` builds the store on
//! first use and hands out shared handles, `refresh` drops the cached store so
//! the next `get` rereads the files. The build runs under a mutex, so racing
//! first accesses load the files once.

use crate::config::store::{Sources, Store};
use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct State {
    sources: Option<Sources>,
    store: Option<Arc<Store>>,
}

static STATE: Lazy<Mutex<State>> = Lazy::new(|| Mutex::new(State::default()));

fn state() -> MutexGuard<'static, State> {
    // A panic while holding the lock cannot leave `State` half-written.
    STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Set the sources for the global store and discard any cached store.
pub fn init(sources: Sources) {
    let mut state = state();
    state.sources = Some(sources);
    state.store = None;
}

/// The global store, built from the `init` sources on first call.
pub fn get() -> Result<Arc<Store>> {
    let mut state = state();
    if let Some(store) = &state.store {
        return Ok(Arc::clone(store));
    }

    let sources = state.sources.clone().ok_or(ConfigError::NotInitialized)?;
    let store = Arc::new(Store::build(sources)?);
    state.store = Some(Arc::clone(&store));
    Ok(store)
}

/// Discard the cached store. Handles already returned by `get` stay valid.
pub fn refresh() {
    state().store = None;
}
