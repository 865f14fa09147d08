use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with session storage
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Session-scoped key-value storage with opaque string values
///
/// Plays the role of browser storage for handing data between views.
/// Entries expire after the configured TTL.
pub struct SessionStore {
    entries: moka::sync::Cache<String, String>,
}

impl SessionStore {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::sync::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = self.entries.get(key);
        tracing::trace!("Session get {}: {}", key, if value.is_some() { "hit" } else { "miss" });
        value
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
        tracing::trace!("Session set: {}", key);
    }

    pub fn remove(&self, key: &str) {
        self.entries.invalidate(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Decode a JSON value stored under `key`
    pub fn get_json<T>(&self, key: &str) -> Result<Option<T>, SessionStoreError>
    where
        T: DeserializeOwned,
    {
        match self.get(key) {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T>(&self, key: &str, value: &T) -> Result<(), SessionStoreError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, json);
        Ok(())
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

/// Keys shared between views
pub struct SessionKey;

impl SessionKey {
    pub const PROFILE: &'static str = "userProfile";
    pub const HACK_PROFILE: &'static str = "hackProfile";
    pub const VERIFICATION_EMAIL: &'static str = "verificationEmail";
    pub const VERIFICATION_CODE: &'static str = "verificationCode";
    pub const VERIFIED_EVENT: &'static str = "verifiedEvent";
}
