use clap::{Args, Subcommand};

use super::common::OutputFormatArgs;

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(long, env = "IHUB_EMAIL")]
    pub email: String,
    #[arg(long, env = "IHUB_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Clone, Args)]
pub struct WhoamiArgs {
    /// Fetch the user from the backend instead of the cached record.
    #[arg(long)]
    pub refresh: bool,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Subcommand)]
pub enum PermissionCommands {
    /// List permissions that can be granted.
    Available(PermissionAvailableArgs),
    /// Replace the current user's permission tags.
    Set(PermissionSetArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PermissionAvailableArgs {
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PermissionSetArgs {
    /// Permission tag (repeatable or comma separated); an empty set is allowed.
    #[arg(long = "permission", num_args = 0.., value_delimiter = ',')]
    pub permissions: Vec<String>,
}
