use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::event::Event;
use crate::model::{Invocation, RegistryState, Symbol};

use super::helpers::require_storekeeper;

pub fn run(
    state: &mut RegistryState,
    inv: &Invocation,
    title: Symbol,
    author: Symbol,
) -> Result<CmdResult> {
    require_storekeeper(state, inv)?;

    let book = state.insert_book(title, author)?;

    let mut result = CmdResult::default();
    result.emit(Event::BookAdded {
        book_id: book.id,
        title: book.title.clone(),
        author: book.author.clone(),
        timestamp: inv.timestamp,
    });
    result.add_message(CmdMessage::success(format!(
        "Book added ({}): {} by {}",
        book.id, book.title, book.author
    )));
    result.affected_books.push(book);
    Ok(result)
}
