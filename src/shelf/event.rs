//! Structured events published by successful registry mutations.
//!
//! Every successful `add_book`, `remove_book`, `borrow_book` and `return_book`
//! produces exactly one [`Event`]. Title edits and storekeeper transfers
//! produce none.
//!
//! Events reach the outside world three ways: in the returned `CmdResult`,
//! in the store's journal, and through any registered [`EventObserver`].

use crate::model::{Address, BookId, Symbol};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    BookAdded {
        book_id: BookId,
        title: Symbol,
        author: Symbol,
        timestamp: u64,
    },
    RemovedBook {
        book_id: BookId,
        timestamp: u64,
    },
    BookBorrowed {
        book_id: BookId,
        borrower: Address,
        timestamp: u64,
    },
    BookReturned {
        book_id: BookId,
        borrower: Address,
        timestamp: u64,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::BookAdded { .. } => "BookAdded",
            Event::RemovedBook { .. } => "RemovedBook",
            Event::BookBorrowed { .. } => "BookBorrowed",
            Event::BookReturned { .. } => "BookReturned",
        }
    }

    pub fn book_id(&self) -> BookId {
        match self {
            Event::BookAdded { book_id, .. }
            | Event::RemovedBook { book_id, .. }
            | Event::BookBorrowed { book_id, .. }
            | Event::BookReturned { book_id, .. } => *book_id,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            Event::BookAdded { timestamp, .. }
            | Event::RemovedBook { timestamp, .. }
            | Event::BookBorrowed { timestamp, .. }
            | Event::BookReturned { timestamp, .. } => *timestamp,
        }
    }
}

/// Notified after a mutation has been committed.
pub trait EventObserver {
    fn on_event(&self, event: &Event);
}

/// Observer that keeps every event it sees. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    seen: std::rc::Rc<std::cell::RefCell<Vec<Event>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.seen.borrow().clone()
    }
}

impl EventObserver for EventRecorder {
    fn on_event(&self, event: &Event) {
        self.seen.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_event_tag() {
        let event = Event::RemovedBook {
            book_id: BookId::new(3),
            timestamp: 42,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"removed_book","book_id":3,"timestamp":42}"#
        );
    }

    #[test]
    fn accessors_cover_every_variant() {
        let event = Event::BookBorrowed {
            book_id: BookId::new(9),
            borrower: Address::new("bob").unwrap(),
            timestamp: 100,
        };
        assert_eq!(event.name(), "BookBorrowed");
        assert_eq!(event.book_id(), BookId::new(9));
        assert_eq!(event.timestamp(), 100);
    }

    #[test]
    fn recorder_clones_share_history() {
        let recorder = EventRecorder::new();
        let handle = recorder.clone();
        recorder.on_event(&Event::RemovedBook {
            book_id: BookId::new(1),
            timestamp: 5,
        });
        assert_eq!(handle.events().len(), 1);
    }
}
