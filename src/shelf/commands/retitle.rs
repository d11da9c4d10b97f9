use crate::commands::{CmdMessage, CmdResult};
use crate::error::{RegistryError, Result};
use crate::model::{BookId, Invocation, RegistryState, Symbol};

use super::helpers::require_storekeeper;

/// Replace the title of a cataloged book. Emits no event.
pub fn run(
    state: &mut RegistryState,
    inv: &Invocation,
    id: BookId,
    new_title: Symbol,
) -> Result<CmdResult> {
    require_storekeeper(state, inv)?;

    let book = state.book_mut(id).ok_or(RegistryError::NotFound(id))?;
    let old_title = std::mem::replace(&mut book.title, new_title);
    let book = book.clone();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book retitled ({}): {} -> {}",
        id, old_title, book.title
    )));
    result.affected_books.push(book);
    Ok(result)
}
