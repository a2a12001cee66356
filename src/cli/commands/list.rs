//! `passvault list` — display stored credentials in a table.

use serde_json::json;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::{CredentialView, ListQuery};

/// Execute the `list` command.
pub fn execute(cli: &Cli, query: &ListQuery, show_passwords: bool, as_json: bool) -> Result<()> {
    let (owner, vault, _settings) = open_vault(cli)?;
    let views = vault.list_credentials(&owner, query)?;

    if as_json {
        println!("{}", to_json(&views, show_passwords)?);
        return Ok(());
    }

    output::info(&format!("{owner}: {} credential(s)", views.len()));
    output::print_credentials_table(&views, show_passwords);

    Ok(())
}

fn to_json(views: &[CredentialView], show_passwords: bool) -> Result<String> {
    let items: Vec<serde_json::Value> = views
        .iter()
        .map(|v| {
            let mut value = serde_json::to_value(&v.record)
                .map_err(|e| PassVaultError::SerializationError(e.to_string()))?;
            if let Some(obj) = value.as_object_mut() {
                obj.remove("secret_at_rest");
                if show_passwords {
                    obj.insert("password".into(), json!(v.secret.as_str()));
                }
            }
            Ok(value)
        })
        .collect::<Result<_>>()?;

    serde_json::to_string_pretty(&items)
        .map_err(|e| PassVaultError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::analyze;
    use crate::vault::encoding::encode_secret;
    use crate::vault::{CredentialRecord, Owner};

    fn view() -> CredentialView {
        CredentialView::from_record(CredentialRecord {
            id: 1,
            owner: Owner::new("alice"),
            site_label: "GitHub".into(),
            site_url: None,
            login_name: "alice".into(),
            secret_at_rest: encode_secret("hunter2"),
            category: "Work".into(),
            notes: None,
            last_used_at: Some(1),
            is_favorite: true,
            strength: analyze("hunter2"),
        })
        .unwrap()
    }

    #[test]
    fn json_hides_encoded_secret() {
        let out = to_json(&[view()], false).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["site_label"], "GitHub");
        assert_eq!(parsed[0]["strength"]["level"], "fair");
        assert!(parsed[0].get("secret_at_rest").is_none());
        assert!(parsed[0].get("password").is_none());
    }

    #[test]
    fn json_can_include_password() {
        let out = to_json(&[view()], true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["password"], "hunter2");
    }
}
