//! `passvault add` — store a new credential.

use crate::cli::output;
use crate::cli::{open_vault, read_secret, Cli, GeneratorArgs};
use crate::errors::Result;
use crate::generator;
use crate::vault::NewCredential;

/// Borrowed view of the `add` arguments.
pub struct AddArgs<'a> {
    pub site: &'a str,
    pub login: &'a str,
    pub password: Option<&'a str>,
    pub generate: bool,
    pub generator: &'a GeneratorArgs,
    pub url: Option<&'a str>,
    pub category: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let (owner, mut vault, settings) = open_vault(cli)?;

    let secret = if args.generate {
        let opts = args.generator.apply(&settings.generator);
        generator::generate(&opts)?.password
    } else {
        read_secret(args.password, &format!("Password for {}", args.site))?
    };

    let new = NewCredential {
        site_label: args.site.to_string(),
        site_url: args.url.map(str::to_string),
        login_name: args.login.to_string(),
        secret,
        category: args.category.map(str::to_string),
        notes: args.notes.map(str::to_string),
    };

    let id = vault.add_credential(&owner, &new)?;
    let view = vault.get_credential(&owner, id)?;

    output::success(&format!(
        "Saved '{}' as #{id} ({} total)",
        args.site,
        vault.credential_count(&owner)?
    ));
    output::print_strength(&view.record.strength);

    if args.generate {
        output::tip(&format!("Run `passvault show {id} --show-password` to reveal it."));
    }

    Ok(())
}
