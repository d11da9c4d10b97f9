use super::DataStore;
use crate::error::Result;
use crate::event::Event;
use crate::model::RegistryState;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Option<RegistryState>,
    events: Vec<Event>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn load_state(&self) -> Result<Option<RegistryState>> {
        Ok(self.state.clone())
    }

    fn save_state(&mut self, state: &RegistryState) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn append_events(&mut self, events: &[Event]) -> Result<()> {
        self.events.extend_from_slice(events);
        Ok(())
    }

    fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.events.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Address, Invocation, RegistryState, Symbol};

    pub const STOREKEEPER: &str = "storekeeper";
    pub const READER: &str = "reader";
    pub const T0: u64 = 1_700_000_000;

    pub fn address(name: &str) -> Address {
        Address::new(name).unwrap()
    }

    pub fn symbol(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    pub fn as_storekeeper() -> Invocation {
        Invocation::new(address(STOREKEEPER), T0)
    }

    pub fn as_reader() -> Invocation {
        Invocation::new(address(READER), T0)
    }

    pub fn as_caller(name: &str) -> Invocation {
        Invocation::new(address(name), T0)
    }

    /// Registry state owned by [`STOREKEEPER`].
    pub struct StateFixture {
        pub state: RegistryState,
    }

    impl Default for StateFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StateFixture {
        pub fn new() -> Self {
            Self {
                state: RegistryState::new(address(STOREKEEPER)),
            }
        }

        pub fn with_books(mut self, count: usize) -> Self {
            for i in 0..count {
                let title = symbol(&format!("Title_{}", i + 1));
                let author = symbol(&format!("Author_{}", i + 1));
                self.state.insert_book(title, author).unwrap();
            }
            self
        }

        pub fn with_book(mut self, title: &str, author: &str) -> Self {
            self.state
                .insert_book(symbol(title), symbol(author))
                .unwrap();
            self
        }

        pub fn build(self) -> RegistryState {
            self.state
        }
    }
}
