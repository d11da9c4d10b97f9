//! Borrowing and returning.
//!
//! Each identity is either idle or holding exactly one book. The loan record
//! is a copy of the catalog entry taken at borrow time, and a return is only
//! accepted while the live catalog entry still equals that copy.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{RegistryError, Result};
use crate::event::Event;
use crate::model::{BookId, Invocation, RegistryState};

use super::helpers::existing_book;

pub fn borrow(state: &mut RegistryState, inv: &Invocation, id: BookId) -> Result<CmdResult> {
    if state.loan(&inv.caller).is_some() {
        return Err(RegistryError::AlreadyBorrowing(inv.caller.clone()));
    }
    let book = existing_book(state, id)?.clone();

    state.set_loan(inv.caller.clone(), book.clone());

    let mut result = CmdResult::default();
    result.emit(Event::BookBorrowed {
        book_id: id,
        borrower: inv.caller.clone(),
        timestamp: inv.timestamp,
    });
    result.add_message(CmdMessage::success(format!(
        "Book borrowed ({}): {}",
        id, book.title
    )));
    result.affected_books.push(book);
    Ok(result)
}

/// Return the caller's loan for `id`.
///
/// The loan record is compared with the live catalog entry before the caller
/// is checked for a loan at all, so an idle caller naming a present book gets
/// `WrongBook` and one naming an empty slot gets `NotBorrowing`.
pub fn give_back(state: &mut RegistryState, inv: &Invocation, id: BookId) -> Result<CmdResult> {
    let loan = state.loan(&inv.caller);
    if loan != state.book(id) {
        return Err(RegistryError::WrongBook(id));
    }
    if loan.is_none() {
        return Err(RegistryError::NotBorrowing(inv.caller.clone()));
    }

    let book = state
        .clear_loan(&inv.caller)
        .ok_or_else(|| RegistryError::NotBorrowing(inv.caller.clone()))?;

    let mut result = CmdResult::default();
    result.emit(Event::BookReturned {
        book_id: id,
        borrower: inv.caller.clone(),
        timestamp: inv.timestamp,
    });
    result.add_message(CmdMessage::success(format!(
        "Book returned ({}): {}",
        id, book.title
    )));
    result.affected_books.push(book);
    Ok(result)
}
