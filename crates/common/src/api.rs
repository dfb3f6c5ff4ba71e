//! Wire DTOs for the integration-hub backend.
//!
//! The backend speaks camelCase JSON with a handful of Portuguese field names
//! (`nome`, `descricao`); every such field is renamed here so Rust callers see
//! English names while the wire format stays untouched.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Backend-assigned numeric identity shared by every resource family.
pub type EntityId = i64;

/// Free-form JSON object used for request bodies and examples.
pub type JsonObject = Map<String, Value>;

/// Reads an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamp string exactly as the backend rendered it.
///
/// The backend is authoritative for timestamps and does not always attach an
/// offset, so the raw text is kept and parsed lazily.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Raw backend representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses RFC 3339 values, falling back to naive `YYYY-MM-DDTHH:MM:SS[.f]`
    /// which is interpreted as UTC.
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Credentials posted to `/api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account e-mail.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Token issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token.
    pub token: String,
    /// Token type reported by the backend (usually `Bearer`).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub token_type: String,
}

/// Capability tags that gate sections of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Manage user permissions.
    Permission,
    /// Manage owners, authentications and integrations.
    ApiManager,
    /// Access omnichannel features.
    Omnichannel,
    /// Manage Evolution services and instances.
    EvolutionManager,
}

impl Capability {
    /// Permission tag as stored on the user record.
    pub fn tag(&self) -> &'static str {
        match self {
            Capability::Permission => "permission",
            Capability::ApiManager => "api-manager",
            Capability::Omnichannel => "omnichannel",
            Capability::EvolutionManager => "evolution-manager",
        }
    }
}

/// Authenticated user and the capability tags granted to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identity.
    #[serde(rename = "userId")]
    pub id: EntityId,
    /// Display name.
    #[serde(rename = "userName")]
    pub display_name: String,
    /// Account e-mail.
    #[serde(rename = "userEmail")]
    pub email: String,
    /// Unordered capability tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: BTreeSet<String>,
}

impl UserRecord {
    /// Whether the user holds the tag for `capability`. Absence means no access.
    pub fn has(&self, capability: Capability) -> bool {
        self.permissions.contains(capability.tag())
    }
}

/// Permission that can be granted to users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Permission identity.
    pub id: EntityId,
    /// Tag name, e.g. `api-manager`.
    pub name: String,
    /// Human-readable description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of `POST /api/permission`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePermissionsRequest {
    /// Full replacement set of permission tags.
    pub permissions: Vec<String>,
}

/// Tenant grouping that scopes authentications, integrations and channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Owner identity.
    pub id: EntityId,
    /// Owner name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "descricao", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of owner create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOwnerRequest {
    /// Owner name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Owner updates replace the whole record.
pub type UpdateOwnerRequest = CreateOwnerRequest;

/// Authentication scheme of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationType {
    /// OAuth 2 token exchange.
    #[serde(rename = "OAUTH2")]
    OAuth2,
    /// HTTP basic auth.
    Basic,
    /// Static bearer token.
    Bearer,
    /// API key header.
    ApiKey,
    /// No authentication.
    None,
}

impl AuthenticationType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationType::OAuth2 => "OAUTH2",
            AuthenticationType::Basic => "BASIC",
            AuthenticationType::Bearer => "BEARER",
            AuthenticationType::ApiKey => "API_KEY",
            AuthenticationType::None => "NONE",
        }
    }
}

/// Content type used when the backend performs an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    /// `application/json`
    ApplicationJson,
    /// `application/xml`
    ApplicationXml,
    /// `application/x-www-form-urlencoded`
    ApplicationFormUrlencoded,
    /// `multipart/form-data`
    MultipartFormData,
    /// `text/plain`
    TextPlain,
}

impl ContentType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "APPLICATION_JSON",
            ContentType::ApplicationXml => "APPLICATION_XML",
            ContentType::ApplicationFormUrlencoded => "APPLICATION_FORM_URLENCODED",
            ContentType::MultipartFormData => "MULTIPART_FORM_DATA",
            ContentType::TextPlain => "TEXT_PLAIN",
        }
    }
}

/// HTTP verb of a request template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
}

impl HttpMethod {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Reusable authentication profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    /// Profile identity.
    pub id: EntityId,
    /// Profile name; also the key used by the test endpoint.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "descricao", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Owning tenant.
    pub owner_id: EntityId,
    /// Owning tenant name.
    #[serde(rename = "ownerNome", default, deserialize_with = "null_as_default")]
    pub owner_name: String,
    /// Target URL of the authentication call.
    pub url: String,
    /// Authentication scheme.
    pub authentication_type: AuthenticationType,
    /// Content type of the authentication call.
    pub content_type: ContentType,
    /// Body template of the authentication call.
    #[serde(default)]
    pub request_body: Option<JsonObject>,
    /// Header templates of the authentication call.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// Fields extractable from the recorded response, keyed by path.
    #[serde(default)]
    pub response_fields: Option<BTreeMap<String, String>>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of authentication create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthenticationRequest {
    /// Profile name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "descricao")]
    pub description: String,
    /// Owning tenant.
    pub owner_id: EntityId,
    /// Target URL.
    pub url: String,
    /// Authentication scheme.
    pub authentication_type: AuthenticationType,
    /// Content type of the authentication call.
    pub content_type: ContentType,
    /// Body template.
    pub request_body: JsonObject,
    /// Header templates; `${field}` references are sent verbatim.
    pub headers: BTreeMap<String, String>,
}

/// Authentication updates replace the whole record.
pub type UpdateAuthenticationRequest = CreateAuthenticationRequest;

/// Result of a backend-executed authentication probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationTestResult {
    /// Whether the probe succeeded.
    pub success: bool,
    /// HTTP status of the probed endpoint.
    pub status_code: u16,
    /// HTTP reason phrase.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_message: String,
    /// Response headers of the probed endpoint.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_headers: BTreeMap<String, String>,
    /// Raw response body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_body: String,
    /// Extracted field path to inferred type.
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_fields: BTreeMap<String, String>,
    /// Failure description, if any.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Elapsed time of the probe.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_time_ms: u64,
}

/// Base URL plus authentication profile plus default headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    /// Integration identity.
    pub id: EntityId,
    /// Integration name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Base URL for all paths.
    pub base_url: String,
    /// Owning tenant.
    pub owner_id: EntityId,
    /// Owning tenant name.
    #[serde(rename = "ownerNome", default, deserialize_with = "null_as_default")]
    pub owner_name: String,
    /// Authentication profile applied to calls.
    pub authentication_id: EntityId,
    /// Authentication profile name.
    #[serde(rename = "authenticationNome", default, deserialize_with = "null_as_default")]
    pub authentication_name: String,
    /// Default header templates.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of integration create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntegrationRequest {
    /// Integration name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Base URL.
    pub base_url: String,
    /// Owning tenant.
    pub owner_id: EntityId,
    /// Authentication profile.
    pub authentication_id: EntityId,
    /// Default header templates.
    pub headers: BTreeMap<String, String>,
}

/// Integration updates replace the whole record.
pub type UpdateIntegrationRequest = CreateIntegrationRequest;

/// Named URL suffix under an integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// Path identity.
    pub id: EntityId,
    /// Path name.
    #[serde(rename = "nome")]
    pub name: String,
    /// URL suffix.
    pub path: String,
    /// Parent integration.
    pub integration_id: EntityId,
    /// Parent integration name.
    #[serde(rename = "integrationNome", default, deserialize_with = "null_as_default")]
    pub integration_name: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of path create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePathRequest {
    /// Path name.
    #[serde(rename = "nome")]
    pub name: String,
    /// URL suffix.
    pub path: String,
    /// Parent integration.
    pub integration_id: EntityId,
}

/// Path updates replace the whole record.
pub type UpdatePathRequest = CreatePathRequest;

/// Fully specified HTTP call template under a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Request identity.
    pub id: EntityId,
    /// Request name.
    #[serde(rename = "nome")]
    pub name: String,
    /// HTTP verb.
    pub http_method: HttpMethod,
    /// Parent path.
    pub path_id: EntityId,
    /// Parent path name.
    #[serde(rename = "pathNome", default, deserialize_with = "null_as_default")]
    pub path_name: String,
    /// Parent path suffix.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_value: String,
    /// Content type of the call.
    pub content_type: ContentType,
    /// Body field schema.
    #[serde(default)]
    pub body_fields: Option<BTreeMap<String, String>>,
    /// Header field schema.
    #[serde(default)]
    pub header_fields: Option<BTreeMap<String, String>>,
    /// Query parameter schema.
    #[serde(default)]
    pub param_fields: Option<BTreeMap<String, String>>,
    /// Example payload.
    #[serde(default)]
    pub request_example: Option<JsonObject>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of request create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestRequest {
    /// Request name.
    #[serde(rename = "nome")]
    pub name: String,
    /// HTTP verb.
    pub http_method: HttpMethod,
    /// Parent path.
    pub path_id: EntityId,
    /// Content type of the call.
    pub content_type: ContentType,
    /// Body field schema.
    pub body_fields: BTreeMap<String, String>,
    /// Header field schema.
    pub header_fields: BTreeMap<String, String>,
    /// Query parameter schema.
    pub param_fields: BTreeMap<String, String>,
    /// Example payload.
    pub request_example: JsonObject,
}

/// Request updates replace the whole record.
pub type UpdateRequestRequest = CreateRequestRequest;

/// Result of a backend-executed request probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTestResult {
    /// Whether the probe succeeded.
    pub success: bool,
    /// HTTP status of the probed endpoint.
    pub status_code: u16,
    /// HTTP reason phrase.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_message: String,
    /// Fully resolved URL that was called.
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_url: String,
    /// Verb that was used.
    pub http_method: HttpMethod,
    /// Headers that were sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_headers: BTreeMap<String, String>,
    /// Query parameters that were sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_params: BTreeMap<String, String>,
    /// Body that was sent.
    #[serde(default)]
    pub request_body: Value,
    /// Response headers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_headers: BTreeMap<String, String>,
    /// Response body.
    #[serde(default)]
    pub response_body: Value,
    /// Extracted field path to inferred type.
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_fields: BTreeMap<String, String>,
    /// Failure description, if any.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Elapsed time of the probe.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_time_ms: u64,
}

/// Configured Evolution messaging-channel service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evolution {
    /// Service identity.
    pub id: EntityId,
    /// Service name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "descricao", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Service URL.
    pub url: String,
    /// Service API key.
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_key: String,
    /// Owning tenant.
    pub owner_id: EntityId,
    /// Owning tenant name.
    #[serde(rename = "ownerNome", default, deserialize_with = "null_as_default")]
    pub owner_name: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of Evolution create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvolutionRequest {
    /// Service name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "descricao")]
    pub description: String,
    /// Service URL.
    pub url: String,
    /// Service API key.
    pub api_key: String,
    /// Owning tenant.
    pub owner_id: EntityId,
}

/// Evolution updates replace the whole record.
pub type UpdateEvolutionRequest = CreateEvolutionRequest;

/// One addressable channel connection under an Evolution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionInstance {
    /// Instance identity.
    pub id: EntityId,
    /// Instance name on the Evolution service.
    pub instance_name: String,
    /// Identifier assigned by the Evolution service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instance_id: String,
    /// Whether pairing uses a QR code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub qrcode: bool,
    /// Last QR code image, base64 encoded.
    #[serde(default)]
    pub qrcode_base64: Option<String>,
    /// Channel integration kind (e.g. `WHATSAPP-BAILEYS`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub integration: String,
    /// Connection status.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Instance hash issued by the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,
    /// Parent Evolution service.
    pub evolution_id: EntityId,
    /// Parent Evolution service name.
    #[serde(rename = "evolutionNome", default, deserialize_with = "null_as_default")]
    pub evolution_name: String,
    /// Creating user.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: EntityId,
    /// Creating user name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    /// Webhook receiving channel events.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

/// Body of `POST /api/evolution-instance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    /// Instance name.
    pub instance_name: String,
    /// Whether pairing uses a QR code.
    pub qrcode: bool,
    /// Parent Evolution service.
    pub evolution_id: EntityId,
    /// Channel integration kind.
    pub integration: String,
    /// Optional webhook URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Pairing payload returned by the connect action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    /// Numeric pairing code, when the channel supports it.
    #[serde(default)]
    pub pairing_code: Option<String>,
    /// Raw QR payload.
    #[serde(default)]
    pub code: Option<String>,
    /// QR image, base64 encoded.
    #[serde(default)]
    pub base64: Option<String>,
    /// Number of QR codes issued so far.
    #[serde(default)]
    pub count: Option<u32>,
}

/// Instance name and state pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    /// Instance name.
    pub instance_name: String,
    /// Connection state, e.g. `open` or `close`.
    pub state: String,
}

/// Response of the connection-state action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStateResponse {
    /// Instance state as reported by the service.
    pub instance: InstanceState,
    /// Top-level state, when present.
    #[serde(default)]
    pub state: Option<String>,
}

/// Message body nested in [`LogoutResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutMessage {
    /// Service message.
    pub message: String,
}

/// Response of the logout action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Status label.
    pub status: String,
    /// Whether the service reported an error.
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: bool,
    /// Service message.
    pub response: LogoutMessage,
}

/// Body of the webhook action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// Webhook receiving channel events.
    pub webhook_url: String,
}
