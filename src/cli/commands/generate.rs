//! `passvault generate` — print (or copy) a random password.

use crate::cli::output;
use crate::cli::{clipboard, load_settings, GeneratorArgs};
use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(args: &GeneratorArgs, copy: bool) -> Result<()> {
    let settings = load_settings()?;
    let opts = args.apply(&settings.generator);
    let generated = generator::generate(&opts)?;

    if copy {
        clipboard::copy(&generated.password)?;
        output::success(&format!(
            "Copied a {}-character {} password to the clipboard",
            opts.length, generated.strength.level
        ));
    } else {
        println!("{}", generated.password.as_str());
    }

    output::print_strength(&generated.strength);
    Ok(())
}
