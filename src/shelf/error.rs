use crate::model::{Address, BookId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Caller {caller} is not the storekeeper")]
    Unauthorized { caller: Address },

    #[error("Book not found: {0}")]
    NotFound(BookId),

    #[error("{0} is already borrowing a book")]
    AlreadyBorrowing(Address),

    #[error("{0} is not borrowing a book")]
    NotBorrowing(Address),

    #[error("Book {0} does not match the book on loan")]
    WrongBook(BookId),

    #[error("Catalog is full: every book id has been issued")]
    CatalogFull,

    #[error("Invalid symbol {0:?}: expected 1-32 characters of [A-Za-z0-9_]")]
    InvalidSymbol(String),

    #[error("Invalid identity {0:?}")]
    InvalidAddress(String),

    #[error("Invalid book id {0:?}")]
    InvalidBookId(String),

    #[error("Registry has not been deployed")]
    NotDeployed,

    #[error("Registry is already deployed")]
    AlreadyDeployed,

    #[error("No caller identity: pass --as, set SHELF_CALLER, or run `shelf config caller <id>`")]
    MissingCaller,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl RegistryError {
    /// Stable numeric code for the registry's own failure kinds.
    ///
    /// Host-level failures (storage, parsing, deployment) have no code.
    pub fn code(&self) -> Option<u32> {
        match self {
            RegistryError::Unauthorized { .. } => Some(1),
            RegistryError::NotFound(_) => Some(2),
            RegistryError::AlreadyBorrowing(_) => Some(3),
            RegistryError::NotBorrowing(_) => Some(4),
            RegistryError::WrongBook(_) => Some(5),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
