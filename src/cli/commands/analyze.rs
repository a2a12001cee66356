//! `passvault analyze` — score a password without storing it.

use crate::cli::output;
use crate::cli::read_secret;
use crate::errors::{PassVaultError, Result};
use crate::strength::analyze;

/// Execute the `analyze` command.
pub fn execute(password: Option<&str>, as_json: bool) -> Result<()> {
    let secret = read_secret(password, "Password to analyze")?;
    let result = analyze(&secret);

    if as_json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| PassVaultError::SerializationError(e.to_string()))?;
        println!("{json}");
    } else {
        output::print_strength(&result);
    }

    Ok(())
}
