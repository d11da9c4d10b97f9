use clap::{Parser, Subcommand};
use shelf::model::{Address, BookId, Symbol};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelf", bin_name = "shelf", version)]
#[command(about = "Single-storekeeper book-lending registry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Identity to invoke as (defaults to SHELF_CALLER, then the `caller` config key)
    #[arg(long = "as", value_name = "IDENTITY", global = true)]
    pub caller: Option<Address>,

    /// Registry data directory (defaults to SHELF_HOME, then the platform data dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the registry with its first storekeeper
    #[command(display_order = 1)]
    Deploy {
        /// Identity of the storekeeper
        storekeeper: Address,
    },

    /// Add a book to the catalog (storekeeper only)
    #[command(alias = "n", display_order = 10)]
    Add {
        /// Title, 1-32 characters of [A-Za-z0-9_]
        title: Symbol,

        /// Author, 1-32 characters of [A-Za-z0-9_]
        author: Symbol,
    },

    /// Remove a book from the catalog (storekeeper only)
    #[command(alias = "rm", display_order = 11)]
    Remove { id: BookId },

    /// Change a book's title (storekeeper only)
    #[command(display_order = 12)]
    Retitle { id: BookId, title: Symbol },

    /// Hand the storekeeper role to another identity (storekeeper only)
    #[command(display_order = 13)]
    Transfer {
        /// Identity of the new storekeeper
        storekeeper: Address,
    },

    /// Borrow a book
    #[command(display_order = 20)]
    Borrow { id: BookId },

    /// Return the book you are borrowing
    #[command(display_order = 21)]
    Return { id: BookId },

    /// List every catalog slot, removed books included
    #[command(alias = "ls", display_order = 30)]
    List,

    /// Show one book
    #[command(alias = "v", display_order = 31)]
    Show { id: BookId },

    /// Count of book ids ever issued
    #[command(display_order = 32)]
    Total,

    /// Show the book an identity is borrowing (defaults to the caller)
    #[command(display_order = 33)]
    Loan { identity: Option<Address> },

    /// Show the current storekeeper
    #[command(display_order = 34)]
    Storekeeper,

    /// Print the event journal
    #[command(display_order = 35)]
    Events,

    /// Get or set configuration
    #[command(display_order = 40)]
    Config {
        /// Configuration key (caller, log-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
