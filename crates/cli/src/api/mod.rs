use ::common::api::{LoginRequest, LoginResponse, Permission, UpdatePermissionsRequest, UserRecord};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

pub mod error;
pub mod resources;
pub mod session;

pub use error::{ApiError, ApiResult, TRANSPORT_STATUS};
pub use resources::{
    Authentications, Evolutions, Fetchable, Instances, Integrations, Owners, Paths, Requests,
    Resource, ResourceApi, Scoped, Updatable,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8101";

/// Authenticated client for the integration-hub backend.
///
/// The bearer token is a constructor argument; the client never consults the
/// session store on its own.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: String,
    token: String,
}

impl ApiClient {
    pub fn new(client: Client, base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
            token: token.into(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        let trimmed = path.trim_start_matches('/');
        format!("{}/{}", self.base.trim_end_matches('/'), trimmed)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
    }

    async fn send(&self, req: RequestBuilder, action: &str) -> ApiResult<Response> {
        let res = self.authorize(req).send().await.map_err(|err| {
            warn!(?err, "{action} failed before a response arrived");
            ApiError::from(err)
        })?;
        check_response(res, action).await
    }

    pub async fn get<T>(&self, path: &str, action: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(path, "{action}");
        let res = self.send(self.client.get(self.url(path)), action).await?;
        decode_json(res).await
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q, action: &str) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "{action}");
        let req = self.client.get(self.url(path)).query(query);
        let res = self.send(req, action).await?;
        decode_json(res).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B, action: &str) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "{action}");
        let req = self.client.post(self.url(path)).json(body);
        let res = self.send(req, action).await?;
        decode_json(res).await
    }

    pub async fn post_empty<T>(&self, path: &str, action: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(path, "{action}");
        let req = self.client.post(self.url(path));
        let res = self.send(req, action).await?;
        decode_json(res).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B, action: &str) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "{action}");
        let req = self.client.put(self.url(path)).json(body);
        let res = self.send(req, action).await?;
        decode_json(res).await
    }

    /// Deletes a resource; 204 and any other 2xx count as success and the body
    /// is never parsed.
    pub async fn delete(&self, path: &str, action: &str) -> ApiResult<()> {
        debug!(path, "{action}");
        let req = self.client.delete(self.url(path));
        let res = self.send(req, action).await?;
        let status = res.status();
        if status != StatusCode::NO_CONTENT {
            res.bytes()
                .await
                .map_err(|err| ApiError::body_read_failure(status, err))?;
        }
        Ok(())
    }

    /// User record and permission tags of the token holder.
    pub async fn current_user(&self) -> ApiResult<UserRecord> {
        self.get("/api/permission", "fetch current user").await
    }

    pub async fn available_permissions(&self) -> ApiResult<Vec<Permission>> {
        self.get("/api/permission/available", "list available permissions")
            .await
    }

    /// Replaces the caller's permission tags and returns the updated user.
    pub async fn update_permissions(&self, permissions: Vec<String>) -> ApiResult<UserRecord> {
        let body = UpdatePermissionsRequest { permissions };
        self.post_json("/api/permission", &body, "update permissions")
            .await
    }
}

/// Exchanges credentials for a bearer token. Runs before any session exists,
/// so it is not a method on [`ApiClient`].
pub async fn login(
    client: &Client,
    base: &str,
    credentials: &LoginRequest,
) -> ApiResult<LoginResponse> {
    let url = format!("{}/api/auth/login", base.trim_end_matches('/'));
    let res = client.post(url).json(credentials).send().await.map_err(|err| {
        warn!(?err, "login failed before a response arrived");
        ApiError::from(err)
    })?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        warn!(%status, error = %describe_error_body(&body), "login rejected");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: "invalid credentials".to_string(),
        });
    }

    decode_json(res).await
}

async fn check_response(res: Response, action: &str) -> ApiResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let url = res.url().clone();
    let body = res.text().await.unwrap_or_default();
    warn!(%status, %url, error = %describe_error_body(&body), "{action} failed");
    Err(ApiError::status_failure(action, status))
}

async fn decode_json<T>(res: Response) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let status = res.status();
    let bytes = res
        .bytes()
        .await
        .map_err(|err| ApiError::body_read_failure(status, err))?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode {
        status: status.as_u16(),
        message: err.to_string(),
    })
}

fn describe_error_body(body: &str) -> String {
    extract_error_message(body).unwrap_or_else(|| "<empty body>".to_string())
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(val) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(err) = val.get(key).and_then(|e| e.as_str()) {
                return Some(err.to_string());
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
