use clap::Parser;
use sherlock::cli::commands;
use sherlock::cli::{AddTarget, Cli, Commands, DelTarget, UpdateTarget};

fn main() {
    sherlock::logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        sherlock::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> sherlock::errors::Result<()> {
    // Everything but setup and completions needs an initialised root.
    if !matches!(
        cli.command,
        Commands::Setup { .. } | Commands::Completions { .. }
    ) {
        let (app, _) = sherlock::cli::open(cli)?;
        app.is_setup()?;
    }

    match cli.command {
        Commands::Setup { overwrite } => commands::setup::execute(cli, overwrite),
        Commands::Add { ref target } => match target {
            AddTarget::Group { id, insecure } => commands::add::execute_group(cli, id, *insecure),
            AddTarget::Account {
                query,
                tag,
                insecure,
                generate,
            } => commands::add::execute_account(cli, query, tag, *insecure, *generate),
        },
        Commands::Del {
            target: DelTarget::Account { ref query, force },
        } => commands::del::execute(cli, query, force),
        Commands::Get { ref query, verbose } => commands::get::execute(cli, query, verbose),
        Commands::List {
            ref group,
            ref tag,
            all,
            verbose,
        } => commands::list::execute(cli, group.as_deref(), tag.as_deref(), all, verbose),
        Commands::Update { ref target } => match target {
            UpdateTarget::Password { query, insecure } => {
                commands::update::execute_password(cli, query, *insecure)
            }
            UpdateTarget::Name { query } => commands::update::execute_name(cli, query),
            UpdateTarget::Tag { query } => commands::update::execute_tag(cli, query),
        },
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    }
}
