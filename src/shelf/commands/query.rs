use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Address, BookId, RegistryState};

use super::helpers::existing_book;

/// Every issued slot, ascending by id. Removed books stay in place as `None`.
pub fn books(state: &RegistryState) -> CmdResult {
    CmdResult::default().with_listed_slots(state.slots().to_vec())
}

pub fn book(state: &RegistryState, id: BookId) -> Result<CmdResult> {
    let book = existing_book(state, id)?.clone();
    Ok(CmdResult::default().with_affected_books(vec![book]))
}

/// Count of ids ever issued, including removed books.
pub fn total_books(state: &RegistryState) -> CmdResult {
    CmdResult::default().with_total_books(state.total_books())
}

pub fn loan(state: &RegistryState, borrower: &Address) -> CmdResult {
    match state.loan(borrower) {
        Some(book) => CmdResult::default().with_affected_books(vec![book.clone()]),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!(
                "{} is not borrowing anything",
                borrower
            )));
            result
        }
    }
}

pub fn storekeeper(state: &RegistryState) -> CmdResult {
    CmdResult::default().with_storekeeper(state.storekeeper().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, lending, retitle};
    use crate::error::RegistryError;
    use crate::store::memory::fixtures::{
        address, as_reader, as_storekeeper, symbol, StateFixture, STOREKEEPER,
    };

    #[test]
    fn books_are_listed_in_id_order() {
        let mut state = StateFixture::new().build();
        for title in ["C", "A", "B"] {
            add::run(&mut state, &as_storekeeper(), symbol(title), symbol("X")).unwrap();
        }

        let slots = books(&state).listed_slots;
        let ids: Vec<_> = slots.iter().flatten().map(|b| b.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(slots[0].as_ref().unwrap().title, symbol("C"));
    }

    #[test]
    fn empty_registry_lists_nothing() {
        let state = StateFixture::new().build();
        assert!(books(&state).listed_slots.is_empty());
        assert_eq!(total_books(&state).total_books, Some(0));
    }

    #[test]
    fn book_returns_live_entry() {
        let mut state = StateFixture::new().with_book("Dune", "Herbert").build();
        retitle::run(&mut state, &as_storekeeper(), BookId::new(1), symbol("Dune_II")).unwrap();

        let result = book(&state, BookId::new(1)).unwrap();
        assert_eq!(result.affected_books[0].title, symbol("Dune_II"));
    }

    #[test]
    fn book_never_issued_is_not_found() {
        let state = StateFixture::new().with_books(2).build();
        assert!(matches!(
            book(&state, BookId::new(3)),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn loan_reports_holding_and_idle() {
        let mut state = StateFixture::new().with_books(1).build();
        assert!(loan(&state, &as_reader().caller).affected_books.is_empty());

        lending::borrow(&mut state, &as_reader(), BookId::new(1)).unwrap();
        let result = loan(&state, &as_reader().caller);
        assert_eq!(result.affected_books[0].id, BookId::new(1));
    }

    #[test]
    fn storekeeper_is_reported() {
        let state = StateFixture::new().build();
        assert_eq!(storekeeper(&state).storekeeper, Some(address(STOREKEEPER)));
    }
}
