use crate::error::{RegistryError, Result};
use crate::model::{Book, BookId, Invocation, RegistryState};

pub fn require_storekeeper(state: &RegistryState, inv: &Invocation) -> Result<()> {
    if &inv.caller != state.storekeeper() {
        return Err(RegistryError::Unauthorized {
            caller: inv.caller.clone(),
        });
    }
    Ok(())
}

pub fn existing_book(state: &RegistryState, id: BookId) -> Result<&Book> {
    state.book(id).ok_or(RegistryError::NotFound(id))
}
