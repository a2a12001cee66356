//! `passvault update` — change fields of a stored credential.

use crate::cli::output;
use crate::cli::{open_vault, read_secret, Cli, GeneratorArgs};
use crate::errors::Result;
use crate::generator;
use crate::vault::CredentialUpdate;

/// Borrowed view of the `update` arguments.
pub struct UpdateArgs<'a> {
    pub id: i64,
    pub site: Option<&'a str>,
    pub login: Option<&'a str>,
    pub password: Option<&'a str>,
    pub prompt_password: bool,
    pub generate: bool,
    pub generator: &'a GeneratorArgs,
    pub url: Option<&'a str>,
    pub category: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub favorite: Option<bool>,
}

/// Execute the `update` command.
pub fn execute(cli: &Cli, args: &UpdateArgs<'_>) -> Result<()> {
    let (owner, mut vault, settings) = open_vault(cli)?;

    let secret = if args.generate {
        let opts = args.generator.apply(&settings.generator);
        Some(generator::generate(&opts)?.password)
    } else if args.password.is_some() || args.prompt_password {
        Some(read_secret(args.password, &format!("New password for #{}", args.id))?)
    } else {
        None
    };
    let secret_changed = secret.is_some();

    let update = CredentialUpdate {
        site_label: args.site.map(str::to_string),
        site_url: args.url.map(str::to_string),
        login_name: args.login.map(str::to_string),
        secret,
        category: args.category.map(str::to_string),
        notes: args.notes.map(str::to_string),
        is_favorite: args.favorite,
    };

    if update.is_empty() {
        output::warning("Nothing to change; only the last-used time will be refreshed.");
    }

    let record = vault.update_credential(&owner, args.id, &update)?;
    output::success(&format!("Updated '{}' (#{})", record.site_label, record.id));

    if secret_changed {
        output::print_strength(&record.strength);
    }

    Ok(())
}
