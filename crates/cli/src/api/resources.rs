//! Resource-scoped request builders on top of [`ApiClient`].
//!
//! Every backend collection follows the same REST shape, so each family is a
//! marker type implementing [`Resource`]; the optional verbs a family supports
//! are opted into through [`Fetchable`], [`Updatable`] and [`Scoped`].

use std::marker::PhantomData;

use ::common::api::{
    Authentication, AuthenticationTestResult, ConnectResponse, ConnectionStateResponse,
    CreateAuthenticationRequest, CreateEvolutionRequest, CreateInstanceRequest,
    CreateIntegrationRequest, CreateOwnerRequest, CreatePathRequest, CreateRequestRequest,
    EntityId, Evolution, EvolutionInstance, Integration, LogoutResponse, Owner, Path, Request,
    RequestTestResult, UpdateAuthenticationRequest, UpdateEvolutionRequest,
    UpdateIntegrationRequest, UpdateOwnerRequest, UpdatePathRequest, UpdateRequestRequest,
    WebhookRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ApiClient, ApiResult};

pub trait Resource {
    /// Singular name used in error messages.
    const LABEL: &'static str;
    /// Plural name used in error messages.
    const PLURAL: &'static str;
    /// Collection endpoint.
    const PATH: &'static str;

    type Record: DeserializeOwned;
    type Create: Serialize;
}

/// Supports `GET <path>/{id}`.
pub trait Fetchable: Resource {}

/// Supports `PUT <path>/{id}`.
pub trait Updatable: Resource {
    type Update: Serialize;
}

/// Supports narrowing the list call to one parent.
pub trait Scoped: Resource {
    const PARENT_PARAM: &'static str;
}

pub struct Owners;
pub struct Authentications;
pub struct Integrations;
pub struct Paths;
pub struct Requests;
pub struct Evolutions;
pub struct Instances;

impl Resource for Owners {
    const LABEL: &'static str = "owner";
    const PLURAL: &'static str = "owners";
    const PATH: &'static str = "/api/owner";
    type Record = Owner;
    type Create = CreateOwnerRequest;
}
impl Fetchable for Owners {}
impl Updatable for Owners {
    type Update = UpdateOwnerRequest;
}

impl Resource for Authentications {
    const LABEL: &'static str = "authentication";
    const PLURAL: &'static str = "authentications";
    const PATH: &'static str = "/api/register/authentication";
    type Record = Authentication;
    type Create = CreateAuthenticationRequest;
}
impl Fetchable for Authentications {}
impl Updatable for Authentications {
    type Update = UpdateAuthenticationRequest;
}
impl Scoped for Authentications {
    const PARENT_PARAM: &'static str = "ownerId";
}

impl Resource for Integrations {
    const LABEL: &'static str = "integration";
    const PLURAL: &'static str = "integrations";
    const PATH: &'static str = "/api/integration";
    type Record = Integration;
    type Create = CreateIntegrationRequest;
}
impl Fetchable for Integrations {}
impl Updatable for Integrations {
    type Update = UpdateIntegrationRequest;
}
impl Scoped for Integrations {
    const PARENT_PARAM: &'static str = "ownerId";
}

impl Resource for Paths {
    const LABEL: &'static str = "path";
    const PLURAL: &'static str = "paths";
    const PATH: &'static str = "/api/path";
    type Record = Path;
    type Create = CreatePathRequest;
}
impl Fetchable for Paths {}
impl Updatable for Paths {
    type Update = UpdatePathRequest;
}
impl Scoped for Paths {
    const PARENT_PARAM: &'static str = "integrationId";
}

impl Resource for Requests {
    const LABEL: &'static str = "request";
    const PLURAL: &'static str = "requests";
    const PATH: &'static str = "/api/request";
    type Record = Request;
    type Create = CreateRequestRequest;
}
impl Fetchable for Requests {}
impl Updatable for Requests {
    type Update = UpdateRequestRequest;
}
impl Scoped for Requests {
    const PARENT_PARAM: &'static str = "pathId";
}

impl Resource for Evolutions {
    const LABEL: &'static str = "evolution";
    const PLURAL: &'static str = "evolutions";
    const PATH: &'static str = "/api/evolution";
    type Record = Evolution;
    type Create = CreateEvolutionRequest;
}
impl Updatable for Evolutions {
    type Update = UpdateEvolutionRequest;
}

impl Resource for Instances {
    const LABEL: &'static str = "instance";
    const PLURAL: &'static str = "instances";
    const PATH: &'static str = "/api/evolution-instance";
    type Record = EvolutionInstance;
    type Create = CreateInstanceRequest;
}

/// Request builder bound to one resource family.
pub struct ResourceApi<'a, R> {
    api: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceApi<'a, R> {
    fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", R::PATH, id)
    }

    /// Full, unscoped collection.
    pub async fn list(&self) -> ApiResult<Vec<R::Record>> {
        self.api
            .get(R::PATH, &format!("list {}", R::PLURAL))
            .await
    }

    pub async fn create(&self, payload: &R::Create) -> ApiResult<R::Record> {
        self.api
            .post_json(R::PATH, payload, &format!("create {}", R::LABEL))
            .await
    }

    pub async fn delete(&self, id: EntityId) -> ApiResult<()> {
        self.api
            .delete(&Self::item_path(id), &format!("delete {}", R::LABEL))
            .await
    }
}

impl<R: Fetchable> ResourceApi<'_, R> {
    pub async fn get(&self, id: EntityId) -> ApiResult<R::Record> {
        self.api
            .get(&Self::item_path(id), &format!("get {}", R::LABEL))
            .await
    }
}

impl<R: Updatable> ResourceApi<'_, R> {
    pub async fn update(&self, id: EntityId, payload: &R::Update) -> ApiResult<R::Record> {
        self.api
            .put_json(&Self::item_path(id), payload, &format!("update {}", R::LABEL))
            .await
    }
}

impl<R: Scoped> ResourceApi<'_, R> {
    /// Lists the collection, narrowed to one parent when `parent` is set.
    pub async fn list_scoped(&self, parent: Option<EntityId>) -> ApiResult<Vec<R::Record>> {
        match parent {
            Some(id) => {
                self.api
                    .get_with_query(
                        R::PATH,
                        &[(R::PARENT_PARAM, id)],
                        &format!("list {}", R::PLURAL),
                    )
                    .await
            }
            None => self.list().await,
        }
    }
}

impl ResourceApi<'_, Authentications> {
    /// Asks the backend to execute the stored authentication call.
    ///
    /// Authentications are addressed by name here, unlike every other endpoint.
    pub async fn test(&self, name: &str) -> ApiResult<AuthenticationTestResult> {
        self.api
            .post_empty(&authentication_test_path(name), "test authentication")
            .await
    }
}

fn authentication_test_path(name: &str) -> String {
    format!(
        "{}/test/{}?registerTest=true",
        Authentications::PATH,
        urlencoding::encode(name)
    )
}

impl ResourceApi<'_, Requests> {
    /// Asks the backend to execute the stored request template.
    pub async fn test(&self, id: EntityId) -> ApiResult<RequestTestResult> {
        let path = format!("{}/test/{}?registerTest=true", Requests::PATH, id);
        self.api.post_empty(&path, "test request").await
    }
}

impl ResourceApi<'_, Instances> {
    /// Starts pairing and returns the QR / pairing code payload.
    pub async fn connect(&self, id: EntityId) -> ApiResult<ConnectResponse> {
        let path = format!("{}/connect", Self::item_path(id));
        self.api.get(&path, "connect instance").await
    }

    pub async fn logout(&self, id: EntityId) -> ApiResult<LogoutResponse> {
        let path = format!("{}/logout", Self::item_path(id));
        self.api.post_empty(&path, "log out instance").await
    }

    pub async fn connection_state(&self, id: EntityId) -> ApiResult<ConnectionStateResponse> {
        let path = format!("{}/connection-state", Self::item_path(id));
        self.api.get(&path, "fetch instance connection state").await
    }

    pub async fn set_webhook(
        &self,
        id: EntityId,
        webhook_url: impl Into<String>,
    ) -> ApiResult<EvolutionInstance> {
        let path = format!("{}/webhook", Self::item_path(id));
        let body = WebhookRequest {
            webhook_url: webhook_url.into(),
        };
        self.api
            .post_json(&path, &body, "configure instance webhook")
            .await
    }
}

impl ApiClient {
    pub fn owners(&self) -> ResourceApi<'_, Owners> {
        ResourceApi::new(self)
    }

    pub fn authentications(&self) -> ResourceApi<'_, Authentications> {
        ResourceApi::new(self)
    }

    pub fn integrations(&self) -> ResourceApi<'_, Integrations> {
        ResourceApi::new(self)
    }

    pub fn paths(&self) -> ResourceApi<'_, Paths> {
        ResourceApi::new(self)
    }

    pub fn requests(&self) -> ResourceApi<'_, Requests> {
        ResourceApi::new(self)
    }

    pub fn evolutions(&self) -> ResourceApi<'_, Evolutions> {
        ResourceApi::new(self)
    }

    pub fn instances(&self) -> ResourceApi<'_, Instances> {
        ResourceApi::new(self)
    }
}
