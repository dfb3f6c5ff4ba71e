//! Durable holder of the session token and the cached user record.
//!
//! Reads never fail: any storage problem degrades to "logged out" so callers
//! only ever see a token or `None`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ::common::api::UserRecord;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{ApiError, ApiResult};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

/// Key/value substrate behind a [`SessionStore`].
pub trait SessionStorage: Send {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Removes every key in one write.
    fn clear(&mut self, keys: &[&str]) -> anyhow::Result<()>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Box<T> {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set(key, value)
    }

    fn clear(&mut self, keys: &[&str]) -> anyhow::Result<()> {
        (**self).clear(keys)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, keys: &[&str]) -> anyhow::Result<()> {
        for key in keys {
            self.values.remove(*key);
        }
        Ok(())
    }
}

/// Storage for contexts without persistence; every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl SessionStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("session storage is unavailable")
    }

    fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("session storage is unavailable")
    }

    fn clear(&mut self, _keys: &[&str]) -> anyhow::Result<()> {
        anyhow::bail!("session storage is unavailable")
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// TOML file in the user's config directory, written with private permissions.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at [`FileStorage::default_path`].
    pub fn at_default_path() -> anyhow::Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg).join("ihub").join("session.toml"));
        }

        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| anyhow::anyhow!("HOME is not set and XDG_CONFIG_HOME is not set"))?;
        Ok(home.join(".config").join("ihub").join("session.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<SessionFile> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }

        ensure_private_file(&self.path)?;
        let raw = fs::read_to_string(&self.path)?;
        Ok(toml::from_str::<SessionFile>(&raw)?)
    }

    fn save(&self, file: &SessionFile) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("invalid session path: missing parent dir"))?;
        ensure_private_dir(dir)?;

        let rendered = toml::to_string_pretty(file)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        set_private_file_perms(tmp.path())?;
        tmp.write_all(rendered.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut file = self.load()?;
        file.entries.insert(key.to_string(), value.to_string());
        self.save(&file)
    }

    fn clear(&mut self, keys: &[&str]) -> anyhow::Result<()> {
        let mut file = self.load()?;
        let before = file.entries.len();
        for key in keys {
            file.entries.remove(*key);
        }
        if file.entries.len() == before && !self.path.exists() {
            return Ok(());
        }
        self.save(&file)
    }
}

fn ensure_private_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

fn set_private_file_perms(path: &Path) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

fn ensure_private_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(path)?.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            anyhow::bail!(
                "session file is too permissive (mode {:o}); run: chmod 600 {}",
                mode,
                path.display()
            );
        }
    }
    Ok(())
}

/// Session token plus cached user record over a pluggable storage substrate.
///
/// All storage access goes through one lock, so `clear` is never observed
/// half-done by another thread.
pub struct SessionStore<S = FileStorage> {
    storage: Mutex<S>,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    fn with_storage<T>(&self, op: impl FnOnce(&mut S) -> anyhow::Result<T>) -> anyhow::Result<T> {
        let mut guard = self
            .storage
            .lock()
            .map_err(|_| anyhow::anyhow!("session storage lock poisoned"))?;
        op(&mut guard)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.with_storage(|storage| storage.get(key)) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, ?err, "session storage read failed; treating as logged out");
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> anyhow::Result<()> {
        if token.is_empty() {
            anyhow::bail!("session token must not be empty");
        }
        self.with_storage(|storage| storage.set(TOKEN_KEY, token))
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// Token for an authenticated call, or [`ApiError::SessionMissing`].
    pub fn require_token(&self) -> ApiResult<String> {
        self.token().ok_or(ApiError::SessionMissing)
    }

    pub fn set_user(&self, user: &UserRecord) -> anyhow::Result<()> {
        let serialized = serde_json::to_string(user)?;
        self.with_storage(|storage| storage.set(USER_KEY, &serialized))
    }

    /// Cached user record; stale or corrupt values read as `None`.
    pub fn user(&self) -> Option<UserRecord> {
        let raw = self.read(USER_KEY)?;
        if matches!(raw.as_str(), "" | "undefined" | "null") {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(?err, "ignoring unreadable cached user record");
                None
            }
        }
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.with_storage(|storage| storage.clear(&[TOKEN_KEY, USER_KEY]))
    }
}
