use crate::commands::{CmdMessage, CmdResult};
use crate::error::{RegistryError, Result};
use crate::event::Event;
use crate::model::{BookId, Invocation, RegistryState};

use super::helpers::require_storekeeper;

/// Empty the catalog slot for `id`. The id is never reissued.
///
/// Outstanding loans on the book are left in place; the borrower's return
/// will then fail with `WrongBook`.
pub fn run(state: &mut RegistryState, inv: &Invocation, id: BookId) -> Result<CmdResult> {
    require_storekeeper(state, inv)?;

    let book = state.take_book(id).ok_or(RegistryError::NotFound(id))?;

    let mut result = CmdResult::default();
    result.emit(Event::RemovedBook {
        book_id: id,
        timestamp: inv.timestamp,
    });
    result.add_message(CmdMessage::success(format!(
        "Book removed ({}): {}",
        id, book.title
    )));

    let on_loan: Vec<_> = state
        .loans()
        .filter(|(_, loan)| loan.id == id)
        .map(|(borrower, _)| borrower.to_string())
        .collect();
    if !on_loan.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Book {} is still on loan to {}; that loan can no longer be returned",
            id,
            on_loan.join(", ")
        )));
    }

    result.affected_books.push(book);
    Ok(result)
}
