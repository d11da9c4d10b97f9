use crate::commands::{CmdMessage, CmdResult};
use crate::error::{RegistryError, Result};
use crate::model::{Address, RegistryState};
use crate::store::DataStore;

/// Create the registry with `storekeeper` as its only administrator.
///
/// A store holds at most one registry for its whole lifetime.
pub fn run<S: DataStore>(store: &mut S, storekeeper: Address) -> Result<CmdResult> {
    if store.load_state()?.is_some() {
        return Err(RegistryError::AlreadyDeployed);
    }

    let state = RegistryState::new(storekeeper.clone());
    store.save_state(&state)?;

    let mut result = CmdResult::default().with_storekeeper(storekeeper.clone());
    result.add_message(CmdMessage::success(format!(
        "Registry deployed with storekeeper {}",
        storekeeper
    )));
    Ok(result)
}
