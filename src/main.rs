use clap::Parser;
use subvault::cli::{Cli, Commands, CredentialAction, SubscriptionAction};
use subvault::cli::commands::{subscription_add, subscription_edit};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => subvault::cli::commands::init::execute(&cli),
        Commands::Credential { ref action } => match action {
            CredentialAction::Add {
                ref label,
                ref username,
                password,
                ref notes,
            } => subvault::cli::commands::credential_add::execute(
                &cli,
                label,
                username,
                *password,
                notes.as_deref(),
            ),
            CredentialAction::List => subvault::cli::commands::credential_list::execute(&cli),
            CredentialAction::Delete { ref id, force } => {
                subvault::cli::commands::credential_delete::execute(&cli, id, *force)
            }
        },
        Commands::Subscription { ref action } => match action {
            SubscriptionAction::Add {
                ref name,
                cost,
                ref currency,
                every,
                ref unit,
                ref start,
                ref category,
                ref credential,
                ref website,
            } => subscription_add::execute(
                &cli,
                &subscription_add::AddArgs {
                    name,
                    cost: *cost,
                    currency: currency.as_deref(),
                    every: *every,
                    unit,
                    start: start.as_deref(),
                    category: category.as_deref(),
                    credential: credential.as_deref(),
                    website: website.as_deref(),
                },
            ),
            SubscriptionAction::List { all } => {
                subvault::cli::commands::subscription_list::execute(&cli, *all)
            }
            SubscriptionAction::Edit {
                ref id,
                ref name,
                cost,
                ref currency,
                every,
                ref unit,
                ref start,
                ref category,
                ref credential,
                no_credential,
                ref website,
                active,
            } => subscription_edit::execute(
                &cli,
                &subscription_edit::EditArgs {
                    id,
                    name: name.as_deref(),
                    cost: *cost,
                    currency: currency.as_deref(),
                    every: *every,
                    unit: unit.as_deref(),
                    start: start.as_deref(),
                    category: category.as_deref(),
                    credential: credential.as_deref(),
                    no_credential: *no_credential,
                    website: website.as_deref(),
                    active: *active,
                },
            ),
            SubscriptionAction::Delete { ref id, force } => {
                subvault::cli::commands::subscription_delete::execute(&cli, id, *force)
            }
        },
        Commands::Export { ref output } => {
            subvault::cli::commands::export::execute(&cli, output.as_deref())
        }
        Commands::Import { ref file, force } => {
            subvault::cli::commands::import_cmd::execute(&cli, file, force)
        }
        Commands::Completions { ref shell } => {
            subvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        subvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
