use ::common::api::EntityId;
use clap::{Args, Subcommand};

use super::common::{IdArgs, OutputFormatArgs};

#[derive(Debug, Subcommand)]
pub enum EvolutionCommands {
    /// List Evolution services.
    List(EvolutionListArgs),
    /// Register an Evolution service.
    Create(EvolutionCreateArgs),
    /// Update an Evolution service; omitted fields keep their current value.
    Update(EvolutionUpdateArgs),
    /// Delete an Evolution service.
    Delete(IdArgs),
}

#[derive(Debug, Clone, Args)]
pub struct EvolutionListArgs {
    /// Show API keys instead of redacting them.
    #[arg(long = "show-keys")]
    pub show_keys: bool,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct EvolutionCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, value_parser = crate::parse_http_url)]
    pub url: String,
    #[arg(long = "api-key", env = "IHUB_EVOLUTION_API_KEY", hide_env_values = true)]
    pub api_key: String,
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: EntityId,
}

#[derive(Debug, Clone, Args)]
pub struct EvolutionUpdateArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = crate::parse_http_url)]
    pub url: Option<String>,
    #[arg(long = "api-key")]
    pub api_key: Option<String>,
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: Option<EntityId>,
}

#[derive(Debug, Subcommand)]
pub enum InstanceCommands {
    /// List messaging instances.
    List(InstanceListArgs),
    /// Create a messaging instance on an Evolution service.
    Create(InstanceCreateArgs),
    /// Delete a messaging instance.
    Delete(IdArgs),
    /// Start pairing and print the pairing code / QR payload.
    Connect(InstanceConnectArgs),
    /// Disconnect the instance from its messaging account.
    Logout(IdArgs),
    /// Show the live connection state.
    State(InstanceStateArgs),
    /// Set the webhook URL that receives instance events.
    Webhook(InstanceWebhookArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InstanceListArgs {
    /// Only instances of this Evolution service.
    #[arg(long = "evolution-id", value_parser = crate::parse_entity_id)]
    pub evolution_id: Option<EntityId>,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct InstanceCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "evolution-id", value_parser = crate::parse_entity_id)]
    pub evolution_id: EntityId,
    /// Messaging integration handled by the instance.
    #[arg(long, default_value = "WHATSAPP-BAILEYS")]
    pub integration: String,
    /// Do not request a QR code on creation.
    #[arg(long = "no-qrcode")]
    pub no_qrcode: bool,
    #[arg(long = "webhook-url", value_parser = crate::parse_http_url)]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct InstanceConnectArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    /// Include the base64 QR image payload.
    #[arg(long = "show-qr")]
    pub show_qr: bool,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct InstanceStateArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct InstanceWebhookArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[arg(long, value_parser = crate::parse_http_url)]
    pub url: String,
}
