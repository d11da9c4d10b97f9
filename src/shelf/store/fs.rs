use super::DataStore;
use crate::error::{RegistryError, Result};
use crate::event::Event;
use crate::model::RegistryState;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

const STATE_FILENAME: &str = "registry.json";
const EVENTS_FILENAME: &str = "events.jsonl";
const LOCK_FILENAME: &str = "registry.lock";

pub struct FileStore {
    root: PathBuf,
}

/// Exclusive hold on `registry.lock`, released on drop.
struct RegistryLock {
    file: File,
}

impl Drop for RegistryLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILENAME)
    }

    fn tmp_state_path(&self) -> PathBuf {
        self.root
            .join(format!("{}.{}.tmp", STATE_FILENAME, std::process::id()))
    }

    fn events_path(&self) -> PathBuf {
        self.root.join(EVENTS_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<RegistryLock> {
        self.ensure_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(LOCK_FILENAME))?;
        file.lock_exclusive()?;
        Ok(RegistryLock { file })
    }

    fn journal_len(&self) -> Result<u64> {
        match fs::metadata(self.events_path()) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn truncate_journal(&self, len: u64) -> Result<()> {
        let path = self.events_path();
        if path.exists() {
            OpenOptions::new().write(true).open(path)?.set_len(len)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_state(&self) -> Result<Option<RegistryState>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let state = serde_json::from_str(&content)
            .map_err(|e| RegistryError::Store(format!("{}: {}", STATE_FILENAME, e)))?;
        Ok(Some(state))
    }

    fn save_state(&mut self, state: &RegistryState) -> Result<()> {
        self.ensure_dir()?;

        // Readers must never see a torn file
        let tmp = self.tmp_state_path();
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, self.state_path())?;
        Ok(())
    }

    fn append_events(&mut self, events: &[Event]) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        self.ensure_dir()?;

        let mut buf = String::new();
        for event in events {
            buf.push_str(&serde_json::to_string(event)?);
            buf.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.events_path())?;
        file.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn list_events(&self) -> Result<Vec<Event>> {
        let path = self.events_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str::<Event>(line).map_err(|e| {
                    RegistryError::Store(format!(
                        "{} line {}: {}",
                        EVENTS_FILENAME,
                        n + 1,
                        e
                    ))
                })
            })
            .collect()
    }

    fn commit(&mut self, state: &RegistryState, events: &[Event]) -> Result<()> {
        let mark = self.journal_len()?;
        let written = self
            .append_events(events)
            .and_then(|()| self.save_state(state));

        if let Err(e) = written {
            if let Err(undo) = self.truncate_journal(mark) {
                warn!(error = %undo, "could not roll back event journal");
            }
            return Err(e);
        }
        Ok(())
    }

    fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let _lock = self.lock()?;
        f(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, BookId};
    use crate::store::memory::fixtures::{symbol, StateFixture};

    #[test]
    fn missing_registry_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("shelf"));
        assert!(store.load_state().unwrap().is_none());
        assert!(store.list_events().unwrap().is_empty());
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("shelf");
        let state = StateFixture::new().with_books(2).build();

        let mut store = FileStore::new(root.clone());
        store.save_state(&state).unwrap();

        let reopened = FileStore::new(root.clone());
        assert_eq!(reopened.load_state().unwrap(), Some(state));
        assert!(!reopened.tmp_state_path().exists());
    }

    #[test]
    fn events_append_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        let first = Event::RemovedBook {
            book_id: BookId::new(1),
            timestamp: 10,
        };
        let second = Event::BookReturned {
            book_id: BookId::new(2),
            borrower: Address::new("bob").unwrap(),
            timestamp: 11,
        };

        store.append_events(std::slice::from_ref(&first)).unwrap();
        store.append_events(std::slice::from_ref(&second)).unwrap();

        assert_eq!(store.list_events().unwrap(), vec![first, second]);
    }

    #[test]
    fn corrupt_journal_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EVENTS_FILENAME), "{not json}\n").unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        let err = store.list_events().unwrap_err();
        assert!(matches!(err, RegistryError::Store(msg) if msg.contains("line 1")));
    }

    #[test]
    fn inconsistent_registry_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(STATE_FILENAME),
            r#"{"storekeeper":"alice","catalog":[],"loans":{},"next_id":0}"#,
        )
        .unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        let err = store.load_state().unwrap_err();
        assert!(matches!(err, RegistryError::Store(msg) if msg.starts_with("registry.json")));
    }

    #[test]
    fn failed_state_write_rolls_back_journal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        let state = StateFixture::new().with_books(1).build();
        let added = Event::RemovedBook {
            book_id: BookId::new(1),
            timestamp: 10,
        };
        store.commit(&state, std::slice::from_ref(&added)).unwrap();

        // A directory in the way of the temp file makes the state write fail
        fs::create_dir(store.tmp_state_path()).unwrap();
        let next = StateFixture::new().with_books(2).build();
        let removed = Event::RemovedBook {
            book_id: BookId::new(2),
            timestamp: 11,
        };
        assert!(store.commit(&next, &[removed]).is_err());

        assert_eq!(store.list_events().unwrap(), vec![added]);
        assert_eq!(store.load_state().unwrap(), Some(state));
    }

    #[test]
    fn transactions_are_serialized_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        FileStore::new(root.clone())
            .save_state(&StateFixture::new().build())
            .unwrap();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let root = root.clone();
                std::thread::spawn(move || {
                    let mut store = FileStore::new(root);
                    store
                        .transaction(|store| {
                            let mut state = store.load_state()?.unwrap();
                            let book = state.insert_book(symbol("T"), symbol("A"))?;
                            store.save_state(&state)?;
                            Ok(book.id)
                        })
                        .unwrap()
                })
            })
            .collect();

        let mut ids: Vec<BookId> = workers.into_iter().map(|w| w.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);

        let state = FileStore::new(root).load_state().unwrap().unwrap();
        assert_eq!(state.total_books(), 8);
    }
}
