//! `passvault show` — print one credential in detail.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: i64, show_password: bool) -> Result<()> {
    let (owner, vault, _settings) = open_vault(cli)?;
    let view = vault.get_credential(&owner, id)?;
    output::print_credential_detail(&view, show_password);
    Ok(())
}
