//! # Storage Layer
//!
//! The [`DataStore`] trait hides where the registry lives. The API layer reads
//! the whole [`RegistryState`] before a call and writes it back only after the
//! call succeeded, so a store never observes a half-applied operation.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage under a data directory
//!   - State in `registry.json`, replaced atomically on save
//!   - Events appended to `events.jsonl`, one JSON object per line
//!   - `registry.lock` held exclusively for each mutating call, so separate
//!     `shelf` processes never interleave their load and save
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── registry.json   # storekeeper, catalog slots, loans, next id
//! ├── events.jsonl    # event journal
//! ├── registry.lock   # advisory lock for mutations
//! └── config.json     # client configuration
//! ```

use crate::error::Result;
use crate::event::Event;
use crate::model::RegistryState;

pub mod fs;
pub mod memory;

/// Abstract interface for registry persistence.
pub trait DataStore {
    /// Load the registry, or `None` if it was never deployed.
    fn load_state(&self) -> Result<Option<RegistryState>>;

    /// Replace the stored registry with `state`.
    fn save_state(&mut self, state: &RegistryState) -> Result<()>;

    /// Append events to the journal, in order.
    fn append_events(&mut self, events: &[Event]) -> Result<()>;

    /// All journaled events, oldest first.
    fn list_events(&self) -> Result<Vec<Event>>;

    /// Persist the outcome of one call. Either the events and the state both
    /// land or neither does.
    ///
    /// The default journals first, so a failed journal write leaves the
    /// stored state untouched. Backends whose `save_state` can fail after a
    /// successful append must override this and undo the append.
    fn commit(&mut self, state: &RegistryState, events: &[Event]) -> Result<()> {
        self.append_events(events)?;
        self.save_state(state)
    }

    /// Run `f` with exclusive access to the stored registry.
    fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        f(self)
    }
}
