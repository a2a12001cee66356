//! `passvault delete` — remove a credential.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    let (owner, mut vault, _settings) = open_vault(cli)?;

    // Look the record up first so a bad id fails before the prompt.
    let view = vault.get_credential(&owner, id)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete '{}' ({})?",
                view.record.site_label, view.record.login_name
            ))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.delete_credential(&owner, id)?;
    output::success(&format!("Deleted '{}' (#{id})", view.record.site_label));

    Ok(())
}
