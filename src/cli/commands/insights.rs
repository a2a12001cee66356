//! `passvault insights` — show the weak/duplicate/stale rollup.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PassVaultError, Result};
use crate::insight::InsightRecord;

/// Execute the `insights` command.
pub fn execute(cli: &Cli, refresh: bool, as_json: bool) -> Result<()> {
    let (owner, mut vault, _settings) = open_vault(cli)?;

    let insight = if refresh {
        Some(vault.refresh_insights(&owner)?)
    } else {
        vault.insights(&owner)?
    };

    if as_json {
        let json = serde_json::to_string_pretty(&insight)
            .map_err(|e| PassVaultError::SerializationError(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    match insight {
        Some(ref insight) => {
            output::print_insights(insight);
            print_advice(insight);
        }
        None => {
            output::info("No insights yet.");
            output::tip("Add a credential, or run `passvault insights --refresh`.");
        }
    }

    Ok(())
}

fn print_advice(insight: &InsightRecord) {
    if insight.weak_count > 0 {
        output::warning(&format!(
            "{} password(s) score below 60; consider `passvault update <ID> --generate`.",
            insight.weak_count
        ));
    }
    if insight.duplicate_count > 0 {
        output::warning(&format!(
            "{} password(s) are reused across sites.",
            insight.duplicate_count
        ));
    }
    if insight.stale_count > 0 {
        output::warning(&format!(
            "{} password(s) have not been changed in over 90 days.",
            insight.stale_count
        ));
    }
}
