//! # API Facade
//!
//! The API layer is the single entry point for registry operations, whatever
//! client is driving them.
//!
//! ## Role and Responsibilities
//!
//! For every call the facade:
//! - builds the [`Invocation`] (caller identity plus a timestamp from its [`Clock`])
//! - opens a store transaction, which the file backend guards with an
//!   exclusive lock so concurrent processes take turns
//! - loads the registry from the store, failing with `NotDeployed` if absent
//! - dispatches to the command in `commands/*.rs`
//! - on success, commits the new state together with its events, then
//!   notifies observers
//! - on failure, commits nothing
//!
//! Commands check every precondition before touching the state, and the store
//! commit writes the journal and the state as one unit, so every operation is
//! all-or-nothing.
//!
//! Business rules live in the command modules; the facade does no checks of
//! its own and no terminal I/O.

use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::error::{RegistryError, Result};
use crate::event::{Event, EventObserver};
use crate::model::{Address, BookId, Invocation, RegistryState, Symbol};
use crate::store::DataStore;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// The main API facade for registry operations.
///
/// Generic over `DataStore` to allow different storage backends.
pub struct RegistryApi<S: DataStore> {
    store: S,
    clock: Box<dyn Clock>,
    observers: Vec<Box<dyn EventObserver>>,
    config_dir: PathBuf,
}

impl<S: DataStore> RegistryApi<S> {
    pub fn new(store: S, config_dir: PathBuf) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            observers: Vec::new(),
            config_dir,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn register_observer(&mut self, observer: Box<dyn EventObserver>) {
        self.observers.push(observer);
    }

    pub fn deploy(&mut self, storekeeper: Address) -> Result<CmdResult> {
        let result = self
            .store
            .transaction(|store| commands::deploy::run(store, storekeeper.clone()));
        match &result {
            Ok(_) => info!(storekeeper = %storekeeper, "registry deployed"),
            Err(e) => warn!(error = %e, "deploy rejected"),
        }
        result
    }

    pub fn add_book(
        &mut self,
        caller: &Address,
        title: Symbol,
        author: Symbol,
    ) -> Result<CmdResult> {
        self.mutate("add_book", caller, |state, inv| {
            commands::add::run(state, inv, title, author)
        })
    }

    pub fn remove_book(&mut self, caller: &Address, id: BookId) -> Result<CmdResult> {
        self.mutate("remove_book", caller, |state, inv| {
            commands::remove::run(state, inv, id)
        })
    }

    pub fn update_book_title(
        &mut self,
        caller: &Address,
        id: BookId,
        new_title: Symbol,
    ) -> Result<CmdResult> {
        self.mutate("update_book_title", caller, |state, inv| {
            commands::retitle::run(state, inv, id, new_title)
        })
    }

    pub fn transfer_storekeeper(
        &mut self,
        caller: &Address,
        new_storekeeper: Address,
    ) -> Result<CmdResult> {
        self.mutate("transfer_storekeeper", caller, |state, inv| {
            commands::transfer::run(state, inv, new_storekeeper)
        })
    }

    pub fn borrow_book(&mut self, caller: &Address, id: BookId) -> Result<CmdResult> {
        self.mutate("borrow_book", caller, |state, inv| {
            commands::lending::borrow(state, inv, id)
        })
    }

    pub fn return_book(&mut self, caller: &Address, id: BookId) -> Result<CmdResult> {
        self.mutate("return_book", caller, |state, inv| {
            commands::lending::give_back(state, inv, id)
        })
    }

    pub fn get_books(&self) -> Result<CmdResult> {
        Ok(commands::query::books(&self.load()?))
    }

    pub fn get_book(&self, id: BookId) -> Result<CmdResult> {
        commands::query::book(&self.load()?, id)
    }

    pub fn get_total_books(&self) -> Result<CmdResult> {
        Ok(commands::query::total_books(&self.load()?))
    }

    pub fn get_loan(&self, borrower: &Address) -> Result<CmdResult> {
        Ok(commands::query::loan(&self.load()?, borrower))
    }

    pub fn storekeeper(&self) -> Result<CmdResult> {
        Ok(commands::query::storekeeper(&self.load()?))
    }

    pub fn events(&self) -> Result<CmdResult> {
        Ok(CmdResult::default().with_events(self.store.list_events()?))
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    fn load(&self) -> Result<RegistryState> {
        self.store.load_state()?.ok_or(RegistryError::NotDeployed)
    }

    fn mutate<F>(&mut self, op: &'static str, caller: &Address, apply: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut RegistryState, &Invocation) -> Result<CmdResult>,
    {
        let inv = Invocation::new(caller.clone(), self.clock.now());
        debug!(op, caller = %inv.caller, timestamp = inv.timestamp, "invoking");

        let outcome = self.store.transaction(|store| {
            let mut state = store.load_state()?.ok_or(RegistryError::NotDeployed)?;
            let result = apply(&mut state, &inv)?;
            store.commit(&state, &result.events)?;
            Ok(result)
        });
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!(op, caller = %inv.caller, code = ?e.code(), error = %e, "rejected");
                return Err(e);
            }
        };

        for event in &result.events {
            log_event(event);
            for observer in &self.observers {
                observer.on_event(event);
            }
        }
        Ok(result)
    }
}

fn log_event(event: &Event) {
    match event {
        Event::BookAdded {
            book_id,
            title,
            author,
            ..
        } => info!(book_id = %book_id, title = %title, author = %author, "BookAdded"),
        Event::RemovedBook { book_id, .. } => info!(book_id = %book_id, "RemovedBook"),
        Event::BookBorrowed {
            book_id, borrower, ..
        } => info!(book_id = %book_id, borrower = %borrower, "BookBorrowed"),
        Event::BookReturned {
            book_id, borrower, ..
        } => info!(book_id = %book_id, borrower = %borrower, "BookReturned"),
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
