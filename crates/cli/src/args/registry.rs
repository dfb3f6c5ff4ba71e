use ::common::api::EntityId;
use clap::{Args, Subcommand};

use super::common::{
    AuthTypeArg, ContentTypeArg, HttpMethodArg, IdArgs, OutputFormatArgs, ShowArgs,
};

#[derive(Debug, Subcommand)]
pub enum OwnerCommands {
    /// List owners.
    List(OwnerListArgs),
    /// Show a single owner.
    Show(ShowArgs),
    /// Create an owner.
    Create(OwnerCreateArgs),
    /// Update an owner; omitted fields keep their current value.
    Update(OwnerUpdateArgs),
    /// Delete an owner.
    Delete(IdArgs),
}

#[derive(Debug, Clone, Args)]
pub struct OwnerListArgs {
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct OwnerCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Debug, Clone, Args)]
pub struct OwnerUpdateArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// List authentication profiles, optionally for one owner.
    List(AuthListArgs),
    /// Show a single authentication profile.
    Show(ShowArgs),
    /// Create an authentication profile.
    Create(AuthCreateArgs),
    /// Update an authentication profile; omitted fields keep their current value.
    Update(AuthUpdateArgs),
    /// Delete an authentication profile.
    Delete(IdArgs),
    /// Execute the authentication call on the backend and record its response fields.
    Test(AuthTestArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AuthListArgs {
    /// Only profiles belonging to this owner.
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: Option<EntityId>,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct AuthCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: EntityId,
    /// URL of the token/authentication endpoint.
    #[arg(long, value_parser = crate::parse_http_url)]
    pub url: String,
    #[arg(long = "type", value_enum, default_value_t = AuthTypeArg::Oauth2)]
    pub auth_type: AuthTypeArg,
    #[arg(long = "content-type", value_enum, default_value_t = ContentTypeArg::Json)]
    pub content_type: ContentTypeArg,
    /// Header in KEY=VALUE form (repeatable); values may contain ${field} references.
    #[arg(long = "header", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub headers: Vec<(String, String)>,
    /// Body field in KEY=VALUE form (repeatable).
    #[arg(long = "body", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub body: Vec<(String, String)>,
}

#[derive(Debug, Clone, Args)]
pub struct AuthUpdateArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: Option<EntityId>,
    #[arg(long, value_parser = crate::parse_http_url)]
    pub url: Option<String>,
    #[arg(long = "type", value_enum)]
    pub auth_type: Option<AuthTypeArg>,
    #[arg(long = "content-type", value_enum)]
    pub content_type: Option<ContentTypeArg>,
    /// Replacement headers in KEY=VALUE form (repeatable).
    #[arg(long = "header", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub headers: Vec<(String, String)>,
    /// Replacement body fields in KEY=VALUE form (repeatable).
    #[arg(long = "body", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub body: Vec<(String, String)>,
    /// Remove all headers.
    #[arg(long = "clear-headers", conflicts_with = "headers")]
    pub clear_headers: bool,
    /// Remove all body fields.
    #[arg(long = "clear-body", conflicts_with = "body")]
    pub clear_body: bool,
}

#[derive(Debug, Clone, Args)]
pub struct AuthTestArgs {
    /// Profile name.
    #[arg(long)]
    pub name: String,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Subcommand)]
pub enum IntegrationCommands {
    /// List integrations, optionally for one owner.
    List(IntegrationListArgs),
    /// Show a single integration.
    Show(ShowArgs),
    /// Create an integration.
    Create(IntegrationCreateArgs),
    /// Update an integration; omitted fields keep their current value.
    Update(IntegrationUpdateArgs),
    /// Delete an integration.
    Delete(IdArgs),
    /// List the ${field} references an authentication profile exposes.
    Fields(IntegrationFieldsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct IntegrationListArgs {
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: Option<EntityId>,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct IntegrationCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long = "base-url", value_parser = crate::parse_http_url)]
    pub base_url: String,
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: EntityId,
    #[arg(long = "auth-id", value_parser = crate::parse_entity_id)]
    pub authentication_id: EntityId,
    /// Header in KEY=VALUE form (repeatable); values may contain ${field} references.
    #[arg(long = "header", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, Args)]
pub struct IntegrationUpdateArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "base-url", value_parser = crate::parse_http_url)]
    pub base_url: Option<String>,
    #[arg(long = "owner-id", value_parser = crate::parse_entity_id)]
    pub owner_id: Option<EntityId>,
    #[arg(long = "auth-id", value_parser = crate::parse_entity_id)]
    pub authentication_id: Option<EntityId>,
    /// Replacement headers in KEY=VALUE form (repeatable).
    #[arg(long = "header", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub headers: Vec<(String, String)>,
    /// Remove all headers.
    #[arg(long = "clear-headers", conflicts_with = "headers")]
    pub clear_headers: bool,
}

#[derive(Debug, Clone, Args)]
pub struct IntegrationFieldsArgs {
    #[arg(long = "auth-id", value_parser = crate::parse_entity_id)]
    pub authentication_id: EntityId,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Subcommand)]
pub enum PathCommands {
    /// List paths, optionally for one integration.
    List(PathListArgs),
    /// Show a single path.
    Show(ShowArgs),
    /// Create a path.
    Create(PathCreateArgs),
    /// Update a path; omitted fields keep their current value.
    Update(PathUpdateArgs),
    /// Delete a path.
    Delete(IdArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PathListArgs {
    #[arg(long = "integration-id", value_parser = crate::parse_entity_id)]
    pub integration_id: Option<EntityId>,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PathCreateArgs {
    #[arg(long)]
    pub name: String,
    /// Endpoint path, e.g. /v1/contacts.
    #[arg(long, value_parser = crate::parse_endpoint_path)]
    pub path: String,
    #[arg(long = "integration-id", value_parser = crate::parse_entity_id)]
    pub integration_id: EntityId,
}

#[derive(Debug, Clone, Args)]
pub struct PathUpdateArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_parser = crate::parse_endpoint_path)]
    pub path: Option<String>,
    #[arg(long = "integration-id", value_parser = crate::parse_entity_id)]
    pub integration_id: Option<EntityId>,
}

#[derive(Debug, Subcommand)]
pub enum RequestCommands {
    /// List requests, optionally for one path.
    List(RequestListArgs),
    /// Show a single request.
    Show(ShowArgs),
    /// Create a request.
    Create(RequestCreateArgs),
    /// Update a request; omitted fields keep their current value.
    Update(RequestUpdateArgs),
    /// Delete a request.
    Delete(IdArgs),
    /// Execute the request on the backend and show the exchange.
    Test(ShowArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RequestListArgs {
    #[arg(long = "path-id", value_parser = crate::parse_entity_id)]
    pub path_id: Option<EntityId>,
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RequestCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_enum, default_value_t = HttpMethodArg::Get)]
    pub method: HttpMethodArg,
    #[arg(long = "path-id", value_parser = crate::parse_entity_id)]
    pub path_id: EntityId,
    #[arg(long = "content-type", value_enum, default_value_t = ContentTypeArg::Json)]
    pub content_type: ContentTypeArg,
    /// Body field in KEY=VALUE form (repeatable).
    #[arg(long = "body", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub body: Vec<(String, String)>,
    /// Header in KEY=VALUE form (repeatable).
    #[arg(long = "header", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub headers: Vec<(String, String)>,
    /// Query parameter in KEY=VALUE form (repeatable).
    #[arg(long = "param", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub params: Vec<(String, String)>,
    /// Example body field in KEY=VALUE form (repeatable).
    #[arg(long = "example", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub example: Vec<(String, String)>,
}

#[derive(Debug, Clone, Args)]
pub struct RequestUpdateArgs {
    #[arg(long, value_parser = crate::parse_entity_id)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_enum)]
    pub method: Option<HttpMethodArg>,
    #[arg(long = "path-id", value_parser = crate::parse_entity_id)]
    pub path_id: Option<EntityId>,
    #[arg(long = "content-type", value_enum)]
    pub content_type: Option<ContentTypeArg>,
    /// Replacement body fields in KEY=VALUE form (repeatable).
    #[arg(long = "body", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub body: Vec<(String, String)>,
    /// Replacement headers in KEY=VALUE form (repeatable).
    #[arg(long = "header", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub headers: Vec<(String, String)>,
    /// Replacement query parameters in KEY=VALUE form (repeatable).
    #[arg(long = "param", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub params: Vec<(String, String)>,
    /// Replacement example body in KEY=VALUE form (repeatable).
    #[arg(long = "example", value_parser = crate::parse_kv, value_name = "KEY=VALUE")]
    pub example: Vec<(String, String)>,
}
