use crate::config::ShelfConfig;
use crate::event::Event;
use crate::model::{Address, Book};

pub mod add;
pub mod config;
pub mod deploy;
pub mod helpers;
pub mod lending;
pub mod query;
pub mod remove;
pub mod retitle;
pub mod transfer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Books created, changed, lent or returned by the command.
    pub affected_books: Vec<Book>,
    /// Catalog slots in id order; `None` marks a removed book.
    pub listed_slots: Vec<Option<Book>>,
    pub total_books: Option<u16>,
    pub storekeeper: Option<Address>,
    pub events: Vec<Event>,
    pub config: Option<ShelfConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_slots(mut self, slots: Vec<Option<Book>>) -> Self {
        self.listed_slots = slots;
        self
    }

    pub fn with_total_books(mut self, total: u16) -> Self {
        self.total_books = Some(total);
        self
    }

    pub fn with_storekeeper(mut self, storekeeper: Address) -> Self {
        self.storekeeper = Some(storekeeper);
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_config(mut self, config: ShelfConfig) -> Self {
        self.config = Some(config);
        self
    }
}
