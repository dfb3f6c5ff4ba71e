use ::common::api::{LoginRequest, UserRecord};
use reqwest::Client;
use tracing::{info, warn};

use super::{ApiClient, ApiResult, login};
use crate::session_store::{SessionStorage, SessionStore};

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    pub token: String,
    /// `None` when the token was stored but the user lookup failed.
    pub user: Option<UserRecord>,
}

/// Logs in, persists the token, then caches the current user.
///
/// A failed user lookup does not undo the login: the token stays stored and
/// the user can be fetched later.
pub async fn establish_session<S: SessionStorage>(
    client: &Client,
    base: &str,
    credentials: &LoginRequest,
    store: &SessionStore<S>,
) -> anyhow::Result<EstablishedSession> {
    let login = login(client, base, credentials).await?;
    store.set_token(&login.token)?;
    info!(email = %credentials.email, "session token stored");

    let api = ApiClient::new(client.clone(), base, login.token.clone());
    let user = match refresh_user(&api, store).await {
        Ok(user) => Some(user),
        Err(err) => {
            warn!(status = err.status(), %err, "logged in but failed to load user; keeping token");
            None
        }
    };

    Ok(EstablishedSession {
        token: login.token,
        user,
    })
}

/// Fetches the current user and replaces the cached record.
pub async fn refresh_user<S: SessionStorage>(
    api: &ApiClient,
    store: &SessionStore<S>,
) -> ApiResult<UserRecord> {
    let user = api.current_user().await?;
    if let Err(err) = store.set_user(&user) {
        warn!(?err, "failed to cache user record");
    }
    Ok(user)
}

/// Builds an authorized client from the stored token.
pub fn authorized_client<S: SessionStorage>(
    store: &SessionStore<S>,
    client: Client,
    base: &str,
) -> ApiResult<ApiClient> {
    let token = store.require_token()?;
    Ok(ApiClient::new(client, base, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::session_store::MemoryStorage;
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::json;

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "ana@example.com".into(),
            password: "s3cret".into(),
        }
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let server = MockServer::start_async().await;
        let login_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/login")
                    .json_body(json!({"email": "ana@example.com", "password": "s3cret"}));
                then.status(200)
                    .json_body(json!({"token": "tok-9", "type": "Bearer"}));
            })
            .await;
        let user_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/permission")
                    .header("authorization", "Bearer tok-9");
                then.status(200).json_body(json!({
                    "userId": 3,
                    "userName": "Ana",
                    "userEmail": "ana@example.com",
                    "permissions": ["api-manager"]
                }));
            })
            .await;

        let store = SessionStore::new(MemoryStorage::default());
        let session = establish_session(&Client::new(), &server.url(""), &credentials(), &store)
            .await
            .expect("login succeeds");

        login_mock.assert_async().await;
        user_mock.assert_async().await;
        assert_eq!(session.token, "tok-9");
        assert_eq!(store.token().as_deref(), Some("tok-9"));
        let cached = store.user().expect("user cached");
        assert_eq!(cached.id, 3);
        assert_eq!(session.user, Some(cached));
    }

    #[tokio::test]
    async fn failed_user_lookup_keeps_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(200)
                    .json_body(json!({"token": "tok-9", "type": "Bearer"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/permission");
                then.status(500).body("boom");
            })
            .await;

        let store = SessionStore::new(MemoryStorage::default());
        let session = establish_session(&Client::new(), &server.url(""), &credentials(), &store)
            .await
            .expect("login still succeeds");

        assert!(session.user.is_none());
        assert_eq!(store.token().as_deref(), Some("tok-9"));
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn rejected_login_stores_nothing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(401).json_body(json!({"error": "bad password"}));
            })
            .await;

        let store = SessionStore::new(MemoryStorage::default());
        let err = establish_session(&Client::new(), &server.url(""), &credentials(), &store)
            .await
            .expect_err("login rejected");

        let api_err = err.downcast_ref::<ApiError>().expect("api error");
        assert_eq!(api_err.status(), 401);
        assert_eq!(api_err.to_string(), "invalid credentials");
        assert!(store.token().is_none());
    }

    #[test]
    fn authorized_client_requires_stored_token() {
        let store = SessionStore::new(MemoryStorage::default());
        let err = authorized_client(&store, Client::new(), "http://localhost:8101")
            .err()
            .expect("no token");
        assert!(matches!(err, ApiError::SessionMissing));

        store.set_token("tok-1").expect("set");
        let api = authorized_client(&store, Client::new(), "http://localhost:8101")
            .expect("client");
        assert_eq!(api.base(), "http://localhost:8101");
    }
}
