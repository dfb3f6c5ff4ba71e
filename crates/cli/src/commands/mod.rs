use std::collections::BTreeMap;

use ::common::api::Capability;
use serde_json::{Map, Value};

use crate::api::session::authorized_client;
use crate::api::{ApiClient, ApiResult};
use crate::session_store::{SessionStorage, SessionStore};
use crate::validate::{collapse_pairs, collapse_pairs_to_json};

pub mod account;
pub mod auth;
pub mod completions;
pub mod evolutions;
pub mod instances;
pub mod integrations;
pub mod owners;
pub mod paths;
pub mod requests;

pub type DynSessionStore = SessionStore<Box<dyn SessionStorage>>;

pub struct CommandContext {
    pub client: reqwest::Client,
    pub base: String,
    pub session: DynSessionStore,
}

impl CommandContext {
    pub fn new(client: reqwest::Client, base: String, session: DynSessionStore) -> Self {
        Self {
            client,
            base,
            session,
        }
    }

    /// Client authorized with the stored token; fails before any I/O when logged out.
    pub fn api(&self) -> ApiResult<ApiClient> {
        authorized_client(&self.session, self.client.clone(), &self.base)
    }

    /// Like [`CommandContext::api`], warning first when the cached user lacks `capability`.
    pub fn gated_api(&self, capability: Capability) -> ApiResult<ApiClient> {
        let api = self.api()?;
        if let Some(warning) = capability_warning(&self.session, capability) {
            eprintln!("{warning}");
        }
        Ok(api)
    }
}

/// A missing user record means unknown, not denied.
pub fn capability_warning<S: SessionStorage>(
    session: &SessionStore<S>,
    capability: Capability,
) -> Option<String> {
    let user = session.user()?;
    if user.has(capability) {
        return None;
    }
    Some(format!(
        "warning: {} lacks the '{}' permission; the backend may reject this call",
        user.email,
        capability.tag()
    ))
}

pub(crate) fn join_lines(lines: Vec<String>) -> String {
    lines.join("\n")
}

/// New pairs replace the current map; `clear` empties it; otherwise it is kept.
pub(crate) fn merge_map(
    pairs: &[(String, String)],
    clear: bool,
    current: Option<BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    if clear {
        BTreeMap::new()
    } else if pairs.is_empty() {
        current.unwrap_or_default()
    } else {
        collapse_pairs(pairs)
    }
}

pub(crate) fn merge_json(
    pairs: &[(String, String)],
    clear: bool,
    current: Option<Map<String, Value>>,
) -> Map<String, Value> {
    if clear {
        Map::new()
    } else if pairs.is_empty() {
        current.unwrap_or_default()
    } else {
        collapse_pairs_to_json(pairs)
    }
}
