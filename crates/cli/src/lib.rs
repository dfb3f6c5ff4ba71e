pub mod api;
pub mod args;
pub mod commands;
pub mod fields;
pub mod parse;
pub mod session_store;
pub mod telemetry;
pub mod template;
#[cfg(test)]
mod test_support;
pub mod validate;
pub mod view;

pub use api::{ApiClient, ApiError};
pub use args::*;
pub use commands::CommandContext;
pub use parse::*;

use clap::Parser;
use tracing::warn;

use crate::commands::DynSessionStore;
use crate::commands::account::{handle_login, handle_logout, handle_permissions, handle_whoami};
use crate::commands::auth::handle_auth;
use crate::commands::completions::generate_completions;
use crate::commands::evolutions::handle_evolutions;
use crate::commands::instances::handle_instances;
use crate::commands::integrations::handle_integrations;
use crate::commands::owners::handle_owners;
use crate::commands::paths::handle_paths;
use crate::commands::requests::handle_requests;
use crate::session_store::{FileStorage, SessionStorage, SessionStore, UnavailableStorage};

/// Shared async entrypoint used by the CLI binary.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.globals.verbose);
    run_parsed(cli).await
}

/// Execute the CLI given a pre-parsed argument struct.
pub async fn run_parsed(cli: Cli) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let globals = cli.globals;
    let base = globals.api_url.trim_end_matches('/').to_string();
    let ctx = CommandContext::new(client, base, open_session(&globals));

    match cli.command {
        Commands::Login(args) => handle_login(&ctx, args).await?,
        Commands::Logout => handle_logout(&ctx)?,
        Commands::Whoami(args) => handle_whoami(&ctx, args).await?,
        Commands::Owners { command } => handle_owners(&ctx, command).await?,
        Commands::Auth { command } => handle_auth(&ctx, command).await?,
        Commands::Integrations { command } => handle_integrations(&ctx, command).await?,
        Commands::Paths { command } => handle_paths(&ctx, command).await?,
        Commands::Requests { command } => handle_requests(&ctx, command).await?,
        Commands::Evolutions { command } => handle_evolutions(&ctx, command).await?,
        Commands::Instances { command } => handle_instances(&ctx, command).await?,
        Commands::Permissions { command } => handle_permissions(&ctx, command).await?,
        Commands::Completions { shell } => generate_completions(shell),
    }

    Ok(())
}

/// Session backed by `--session-file` or the default path; a store that
/// cannot be located degrades to one that rejects every operation.
fn open_session(globals: &GlobalArgs) -> DynSessionStore {
    let storage: Box<dyn SessionStorage> = match &globals.session_file {
        Some(path) => Box::new(FileStorage::new(path)),
        None => match FileStorage::at_default_path() {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                warn!(?err, "session storage unavailable");
                Box::new(UnavailableStorage)
            }
        },
    };
    SessionStore::new(storage)
}

/// Message printed for a failed command, with a login hint for rejected sessions.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) if api_err.is_auth_rejection() => {
            format!("error: {err}\nhint: run `ihub login` to sign in again")
        }
        _ => format!("error: {err}"),
    }
}
