use clap::Parser;
use passvault::cli::commands::{add::AddArgs, update::UpdateArgs};
use passvault::cli::{Cli, Commands};
use passvault::vault::ListQuery;

fn main() {
    let cli = Cli::parse();
    passvault::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Add {
            ref site,
            ref login,
            ref password,
            generate,
            ref generator,
            ref url,
            ref category,
            ref notes,
        } => passvault::cli::commands::add::execute(
            &cli,
            &AddArgs {
                site,
                login,
                password: password.as_deref(),
                generate,
                generator,
                url: url.as_deref(),
                category: category.as_deref(),
                notes: notes.as_deref(),
            },
        ),
        Commands::List {
            ref category,
            ref search,
            sort,
            show_passwords,
            json,
        } => {
            let query = ListQuery {
                category: category.clone(),
                search: search.clone(),
                sort,
            };
            passvault::cli::commands::list::execute(&cli, &query, show_passwords, json)
        }
        Commands::Show { id, show_password } => {
            passvault::cli::commands::show::execute(&cli, id, show_password)
        }
        Commands::Update {
            id,
            ref site,
            ref login,
            ref password,
            prompt_password,
            generate,
            ref generator,
            ref url,
            ref category,
            ref notes,
            favorite,
        } => passvault::cli::commands::update::execute(
            &cli,
            &UpdateArgs {
                id,
                site: site.as_deref(),
                login: login.as_deref(),
                password: password.as_deref(),
                prompt_password,
                generate,
                generator,
                url: url.as_deref(),
                category: category.as_deref(),
                notes: notes.as_deref(),
                favorite,
            },
        ),
        Commands::Delete { id, force } => passvault::cli::commands::delete::execute(&cli, id, force),
        Commands::Favorite { id } => passvault::cli::commands::favorite::execute(&cli, id),
        Commands::Insights { refresh, json } => {
            passvault::cli::commands::insights::execute(&cli, refresh, json)
        }
        Commands::Dashboard => passvault::cli::commands::dashboard::execute(&cli),
        Commands::Generate {
            ref generator,
            copy,
        } => passvault::cli::commands::generate::execute(generator, copy),
        Commands::Analyze { ref password, json } => {
            passvault::cli::commands::analyze::execute(password.as_deref(), json)
        }
        Commands::Completions { shell } => passvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        if e.is_not_found() {
            passvault::cli::output::tip("Run `passvault list` to see your credential ids.");
        }
        std::process::exit(1);
    }
}
