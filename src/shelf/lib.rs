//! # Shelf Architecture
//!
//! Shelf is a **book-lending registry library**. One storekeeper catalogs
//! books; any identity may borrow one book at a time and must return it
//! before borrowing another. The `shelf` binary is one client of the library.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, resolves caller identity and data dir  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Builds the invocation (caller + timestamp)               │
//! │  - Locked load → command → commit, all-or-nothing per call  │
//! │  - Journals events, notifies observers, logs via tracing    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Permission checks and the borrow/return state machine    │
//! │  - Operates on `RegistryState`, returns `CmdResult`         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registry Rules
//!
//! - Book ids are issued from 1 upwards and never reused; removing a book
//!   leaves an empty slot behind.
//! - Only the storekeeper adds, removes and retitles books, and only the
//!   storekeeper can hand the role to someone else.
//! - A loan record is a copy of the book taken at borrow time. Returning
//!   requires the live catalog entry to still match that copy.
//! - Every successful add, remove, borrow and return emits one [`event::Event`].
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of every rule against an
//!    in-memory `RegistryState`. Most testing lives here.
//! 2. **API** (`api.rs`): persistence, rollback on failure, journaling.
//! 3. **CLI** (`tests/`): end-to-end runs of the binary against a temp dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Book`, `BookId`, `Symbol`, `Address`, `RegistryState`)
//! - [`event`]: Events and observers
//! - [`clock`]: Timestamp sources
//! - [`config`]: Client configuration
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod store;
