//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::Parser;
use clap_complete::Shell;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::generator::{GeneratorOptions, MAX_LENGTH};
use crate::vault::credential::{ALL_CATEGORIES, CATEGORIES};
use crate::vault::{current_user, Owner, PasswordVault, SortOrder};

/// PassVault CLI: password manager with strength analysis.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Password manager with strength analysis and security insights",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// User to act as
    #[arg(short, long, env = "PASSVAULT_USER", global = true)]
    pub user: Option<String>,

    /// Data directory holding the database (default: .passvault)
    #[arg(long, env = "PASSVAULT_DIR", global = true)]
    pub data_dir: Option<String>,

    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a new credential
    Add {
        /// Site name (e.g. GitHub)
        site: String,

        /// Login name or email
        #[arg(short, long)]
        login: String,

        /// Password (omit for piped input or an interactive prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,

        /// Generate a random password instead of entering one
        #[arg(short, long)]
        generate: bool,

        #[command(flatten)]
        generator: GeneratorArgs,

        /// Site URL
        #[arg(long)]
        url: Option<String>,

        /// Category (default: General)
        #[arg(short, long, value_parser = PossibleValuesParser::new(CATEGORIES))]
        category: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List stored credentials
    List {
        /// Only show this category ("All" shows everything)
        #[arg(short, long, value_parser = category_filter_values())]
        category: Option<String>,

        /// Only show sites whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortOrder::Recent)]
        sort: SortOrder,

        /// Include decoded passwords in the output
        #[arg(long)]
        show_passwords: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one credential in detail
    Show {
        /// Credential id
        id: i64,

        /// Include the decoded password
        #[arg(long)]
        show_password: bool,
    },

    /// Change fields of a stored credential
    Update {
        /// Credential id
        id: i64,

        /// New site name
        #[arg(long)]
        site: Option<String>,

        /// New login name
        #[arg(short, long)]
        login: Option<String>,

        /// New password
        #[arg(short, long, conflicts_with_all = ["generate", "prompt_password"])]
        password: Option<String>,

        /// Read the new password from stdin or an interactive prompt
        #[arg(long, conflicts_with = "generate")]
        prompt_password: bool,

        /// Replace the password with a generated one
        #[arg(short, long)]
        generate: bool,

        #[command(flatten)]
        generator: GeneratorArgs,

        /// New site URL
        #[arg(long)]
        url: Option<String>,

        /// New category
        #[arg(short, long, value_parser = PossibleValuesParser::new(CATEGORIES))]
        category: Option<String>,

        /// New notes
        #[arg(long)]
        notes: Option<String>,

        /// Set or clear the favorite flag
        #[arg(long)]
        favorite: Option<bool>,
    },

    /// Delete a credential
    Delete {
        /// Credential id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Toggle the favorite flag of a credential
    Favorite {
        /// Credential id
        id: i64,
    },

    /// Show security insights (weak, duplicate and stale passwords)
    Insights {
        /// Recompute before showing
        #[arg(long)]
        refresh: bool,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Security overview: score, strength breakdown, recent and favorites
    Dashboard,

    /// Generate a random password
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// Copy the password to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Score a password without storing it
    Analyze {
        /// Password to score (omit for piped input or an interactive prompt)
        password: Option<String>,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generator overrides shared by `generate`, `add` and `update`.
///
/// Unset flags fall back to the `[generator]` table of the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// Password length
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=MAX_LENGTH as i64))]
    pub length: Option<u16>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Allow look-alike characters (i l 1 L o 0 O)
    #[arg(long, conflicts_with = "exclude_similar")]
    pub allow_similar: bool,

    /// Drop look-alike characters (i l 1 L o 0 O)
    #[arg(long)]
    pub exclude_similar: bool,
}

impl GeneratorArgs {
    /// Layer these flags over `base`.
    pub fn apply(&self, base: &GeneratorOptions) -> GeneratorOptions {
        let mut opts = *base;
        if let Some(length) = self.length {
            opts.length = usize::from(length);
        }
        if self.no_uppercase {
            opts.include_uppercase = false;
        }
        if self.no_lowercase {
            opts.include_lowercase = false;
        }
        if self.no_digits {
            opts.include_digits = false;
        }
        if self.no_symbols {
            opts.include_symbols = false;
        }
        if self.allow_similar {
            opts.exclude_similar = false;
        }
        if self.exclude_similar {
            opts.exclude_similar = true;
        }
        opts
    }
}

fn category_filter_values() -> PossibleValuesParser {
    let mut values = vec![ALL_CATEGORIES];
    values.extend(CATEGORIES);
    PossibleValuesParser::new(values)
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `.passvault.toml` in the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Build the full path to the database from CLI args and settings.
///
/// `--data-dir` / `PASSVAULT_DIR` override the config file.
pub fn db_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match cli.data_dir {
        Some(ref dir) => cwd.join(dir).join(crate::vault::schema::DB_FILE_NAME),
        None => settings.db_path(&cwd),
    })
}

/// Resolve the acting user: `--user`, then `PASSVAULT_USER`, then the
/// config file's `default_user`.
pub fn resolve_owner(cli: &Cli, settings: &Settings) -> Result<Owner> {
    current_user([cli.user.as_deref(), settings.default_user.as_deref()])
}

/// Resolve the owner and open the vault in one step.
pub fn open_vault(cli: &Cli) -> Result<(Owner, PasswordVault, Settings)> {
    let settings = load_settings()?;
    let owner = resolve_owner(cli, &settings)?;
    let vault = PasswordVault::open(&db_path(cli, &settings)?)?;
    Ok((owner, vault, settings))
}

/// Read a password from one of three sources:
/// 1. the inline value (warns about shell history),
/// 2. piped stdin,
/// 3. a hidden interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn read_secret(inline: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Password provided on command line; it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed);
        return Ok(buf);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generator_args_override_settings() {
        let base = GeneratorOptions::default();
        let args = GeneratorArgs {
            length: Some(32),
            no_symbols: true,
            allow_similar: true,
            ..GeneratorArgs::default()
        };
        let opts = args.apply(&base);
        assert_eq!(opts.length, 32);
        assert!(!opts.include_symbols);
        assert!(!opts.exclude_similar);
        assert!(opts.include_uppercase);
    }

    #[test]
    fn unset_generator_args_keep_settings() {
        let base = GeneratorOptions {
            length: 40,
            include_digits: false,
            ..GeneratorOptions::default()
        };
        assert_eq!(GeneratorArgs::default().apply(&base), base);
    }

    #[test]
    fn parses_add_with_generator_flags() {
        let cli = Cli::try_parse_from([
            "passvault", "--user", "alice", "add", "GitHub", "--login", "me", "--generate",
            "--length", "24", "--no-symbols",
        ])
        .unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        match cli.command {
            Commands::Add {
                generate,
                generator,
                ..
            } => {
                assert!(generate);
                assert_eq!(generator.length, Some(24));
                assert!(generator.no_symbols);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        let result = Cli::try_parse_from([
            "passvault", "add", "x", "--login", "me", "--category", "Gaming",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn list_accepts_all_category() {
        let cli = Cli::try_parse_from(["passvault", "list", "--category", "All"]).unwrap();
        assert!(matches!(cli.command, Commands::List { .. }));
    }

    #[test]
    fn password_conflicts_with_generate() {
        let result = Cli::try_parse_from([
            "passvault", "add", "x", "--login", "me", "--password", "p", "--generate",
        ]);
        assert!(result.is_err());
    }
}
