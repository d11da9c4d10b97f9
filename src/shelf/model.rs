use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const SYMBOL_MAX_LEN: usize = 32;
const ADDRESS_MAX_LEN: usize = 64;

/// Identifier of a single physical copy in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u8);

impl BookId {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u8>()
            .map(BookId)
            .map_err(|_| RegistryError::InvalidBookId(s.to_string()))
    }
}

/// Short symbolic string used for titles and authors: 1 to 32 characters
/// drawn from `[A-Za-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let valid = !raw.is_empty()
            && raw.len() <= SYMBOL_MAX_LEN
            && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(raw))
        } else {
            Err(RegistryError::InvalidSymbol(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Symbol::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self> {
        Symbol::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Identity of whoever invokes a registry operation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let valid = !raw.is_empty()
            && raw.chars().count() <= ADDRESS_MAX_LEN
            && !raw.chars().any(char::is_whitespace);
        if valid {
            Ok(Self(raw))
        } else {
            Err(RegistryError::InvalidAddress(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Address::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self> {
        Address::new(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: Symbol,
    pub author: Symbol,
}

/// Who is calling, and when. Supplied by the client for every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub caller: Address,
    pub timestamp: u64,
}

impl Invocation {
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }
}

/// Complete persisted state of one registry.
///
/// Catalog slot `i` belongs to book id `i + 1`; a removed book leaves `None`
/// behind so ids are never reused. A borrower with no key in `loans` is idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct RegistryState {
    storekeeper: Address,
    catalog: Vec<Option<Book>>,
    loans: BTreeMap<Address, Book>,
    next_id: u16,
}

/// Unchecked shape of a stored registry.
#[derive(Deserialize)]
struct RawState {
    storekeeper: Address,
    catalog: Vec<Option<Book>>,
    loans: BTreeMap<Address, Book>,
    next_id: u16,
}

impl TryFrom<RawState> for RegistryState {
    type Error = String;

    fn try_from(raw: RawState) -> std::result::Result<Self, Self::Error> {
        if usize::from(raw.next_id) != raw.catalog.len() + 1 {
            return Err(format!(
                "next_id {} does not follow a catalog of {} slots",
                raw.next_id,
                raw.catalog.len()
            ));
        }
        for (idx, slot) in raw.catalog.iter().enumerate() {
            if let Some(book) = slot {
                if usize::from(book.id.get()) != idx + 1 {
                    return Err(format!("slot {} holds book {}", idx + 1, book.id));
                }
            }
        }
        Ok(Self {
            storekeeper: raw.storekeeper,
            catalog: raw.catalog,
            loans: raw.loans,
            next_id: raw.next_id,
        })
    }
}

impl RegistryState {
    pub fn new(storekeeper: Address) -> Self {
        Self {
            storekeeper,
            catalog: Vec::new(),
            loans: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn storekeeper(&self) -> &Address {
        &self.storekeeper
    }

    pub fn set_storekeeper(&mut self, storekeeper: Address) {
        self.storekeeper = storekeeper;
    }

    pub fn next_id(&self) -> u16 {
        self.next_id
    }

    /// Number of ids ever issued, removed books included.
    pub fn total_books(&self) -> u16 {
        self.next_id - 1
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        let idx = usize::from(id.get()).checked_sub(1)?;
        self.catalog.get(idx).and_then(Option::as_ref)
    }

    pub fn book_mut(&mut self, id: BookId) -> Option<&mut Book> {
        let idx = usize::from(id.get()).checked_sub(1)?;
        self.catalog.get_mut(idx).and_then(Option::as_mut)
    }

    /// Every issued slot in ascending id order.
    pub fn slots(&self) -> &[Option<Book>] {
        &self.catalog
    }

    /// The id the next `add_book` will receive, if the id space is not exhausted.
    pub fn peek_next_id(&self) -> Option<BookId> {
        u8::try_from(self.next_id).ok().map(BookId::new)
    }

    pub fn insert_book(&mut self, title: Symbol, author: Symbol) -> Result<Book> {
        let id = self.peek_next_id().ok_or(RegistryError::CatalogFull)?;
        let book = Book { id, title, author };
        self.catalog.push(Some(book.clone()));
        self.next_id += 1;
        Ok(book)
    }

    pub fn take_book(&mut self, id: BookId) -> Option<Book> {
        let idx = usize::from(id.get()).checked_sub(1)?;
        self.catalog.get_mut(idx).and_then(Option::take)
    }

    pub fn loan(&self, borrower: &Address) -> Option<&Book> {
        self.loans.get(borrower)
    }

    pub fn loans(&self) -> impl Iterator<Item = (&Address, &Book)> {
        self.loans.iter()
    }

    pub fn set_loan(&mut self, borrower: Address, book: Book) {
        self.loans.insert(borrower, book);
    }

    pub fn clear_loan(&mut self, borrower: &Address) -> Option<Book> {
        self.loans.remove(borrower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn symbol_accepts_word_characters() {
        assert!(Symbol::new("Dune").is_ok());
        assert!(Symbol::new("The_Hobbit_2").is_ok());
        assert!(Symbol::new("a".repeat(32)).is_ok());
    }

    #[test]
    fn symbol_rejects_spaces_empty_and_overlong() {
        assert!(matches!(
            Symbol::new("Two words"),
            Err(RegistryError::InvalidSymbol(_))
        ));
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("a".repeat(33)).is_err());
    }

    #[test]
    fn symbol_deserialization_validates() {
        let ok: Symbol = serde_json::from_str("\"Dune\"").unwrap();
        assert_eq!(ok.as_str(), "Dune");
        assert!(serde_json::from_str::<Symbol>("\"not ok\"").is_err());
    }

    #[test]
    fn address_rejects_whitespace() {
        assert!(Address::new("alice").is_ok());
        assert!(Address::new("al ice").is_err());
        assert!(Address::new("").is_err());
    }

    #[test]
    fn book_id_parses_byte_range() {
        assert_eq!("12".parse::<BookId>().unwrap(), BookId::new(12));
        assert!("256".parse::<BookId>().is_err());
        assert!("x".parse::<BookId>().is_err());
    }

    #[test]
    fn new_state_starts_at_id_one() {
        let state = RegistryState::new(Address::new("admin").unwrap());
        assert_eq!(state.next_id(), 1);
        assert_eq!(state.total_books(), 0);
        assert!(state.book(BookId::new(0)).is_none());
        assert!(state.book(BookId::new(1)).is_none());
    }

    #[test]
    fn taken_slot_keeps_its_place() {
        let mut state = RegistryState::new(Address::new("admin").unwrap());
        state.insert_book(sym("A"), sym("X")).unwrap();
        state.insert_book(sym("B"), sym("Y")).unwrap();

        let taken = state.take_book(BookId::new(1)).unwrap();
        assert_eq!(taken.title, sym("A"));
        assert_eq!(state.slots().len(), 2);
        assert!(state.slots()[0].is_none());
        assert_eq!(state.book(BookId::new(2)).unwrap().id, BookId::new(2));
        assert_eq!(state.total_books(), 2);
    }

    #[test]
    fn id_space_exhausts_after_255_books() {
        let mut state = RegistryState::new(Address::new("admin").unwrap());
        for _ in 0..255 {
            state.insert_book(sym("T"), sym("A")).unwrap();
        }
        assert_eq!(state.book(BookId::new(255)).unwrap().id, BookId::new(255));
        assert!(matches!(
            state.insert_book(sym("T"), sym("A")),
            Err(RegistryError::CatalogFull)
        ));
        assert_eq!(state.total_books(), 255);
    }

    fn stored(state: &RegistryState) -> serde_json::Value {
        serde_json::to_value(state).unwrap()
    }

    #[test]
    fn stored_state_loads_back() {
        let mut state = RegistryState::new(Address::new("admin").unwrap());
        state.insert_book(sym("A"), sym("X")).unwrap();
        state.insert_book(sym("B"), sym("Y")).unwrap();
        state.take_book(BookId::new(1));

        let loaded: RegistryState = serde_json::from_value(stored(&state)).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn stored_state_with_zero_next_id_is_rejected() {
        let state = RegistryState::new(Address::new("admin").unwrap());
        let mut value = stored(&state);
        value["next_id"] = serde_json::json!(0);

        let err = serde_json::from_value::<RegistryState>(value).unwrap_err();
        assert!(err.to_string().contains("next_id 0"));
    }

    #[test]
    fn stored_state_with_short_catalog_is_rejected() {
        let mut state = RegistryState::new(Address::new("admin").unwrap());
        state.insert_book(sym("A"), sym("X")).unwrap();
        let mut value = stored(&state);
        value["next_id"] = serde_json::json!(5);

        assert!(serde_json::from_value::<RegistryState>(value).is_err());
    }

    #[test]
    fn stored_state_with_misplaced_book_is_rejected() {
        let mut state = RegistryState::new(Address::new("admin").unwrap());
        state.insert_book(sym("A"), sym("X")).unwrap();
        state.insert_book(sym("B"), sym("Y")).unwrap();
        let mut value = stored(&state);
        let catalog = value["catalog"].as_array_mut().unwrap();
        catalog.swap(0, 1);

        let err = serde_json::from_value::<RegistryState>(value).unwrap_err();
        assert!(err.to_string().contains("slot 1 holds book 2"));
    }
}
