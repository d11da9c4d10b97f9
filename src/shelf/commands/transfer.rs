use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Address, Invocation, RegistryState};

use super::helpers::require_storekeeper;

/// Hand the storekeeper role to `new_storekeeper`. Emits no event.
pub fn run(
    state: &mut RegistryState,
    inv: &Invocation,
    new_storekeeper: Address,
) -> Result<CmdResult> {
    require_storekeeper(state, inv)?;

    state.set_storekeeper(new_storekeeper.clone());

    let mut result = CmdResult::default().with_storekeeper(new_storekeeper.clone());
    result.add_message(CmdMessage::success(format!(
        "Storekeeper transferred: {} -> {}",
        inv.caller, new_storekeeper
    )));
    Ok(result)
}
