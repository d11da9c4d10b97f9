//! # CLI Layer
//!
//! This module is **one possible client** of the shelf library.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Reads `SHELF_HOME`, `SHELF_CALLER` and `SHELF_LOG`
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - [`setup`]: clap argument definitions
//! - [`commands`]: `run()`, context setup and per-command handlers
//! - [`print`]: output formatting

mod commands;
mod print;
mod setup;

pub use commands::run;
