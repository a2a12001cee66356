//! `passvault favorite` — toggle the favorite flag.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `favorite` command.
pub fn execute(cli: &Cli, id: i64) -> Result<()> {
    let (owner, mut vault, _settings) = open_vault(cli)?;
    let favorite = vault.toggle_favorite(&owner, id)?;

    if favorite {
        output::success(&format!("Marked #{id} as favorite"));
    } else {
        output::success(&format!("Removed #{id} from favorites"));
    }
    Ok(())
}
