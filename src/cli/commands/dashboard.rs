//! `passvault dashboard` — security overview.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `dashboard` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (owner, vault, _settings) = open_vault(cli)?;
    let dashboard = vault.dashboard(&owner)?;
    output::print_dashboard(&dashboard);
    Ok(())
}
