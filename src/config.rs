//! Connector configuration supplied by the host application.
//!
//! The host persists the connector settings as an opaque JSON object and hands
//! them back on startup and on every reconfiguration. Configuration is held as
//! an immutable snapshot behind a published reference: readers clone the
//! current `Arc`, writers replace it wholesale. Fields are never mutated in
//! place, so a login flow that started before a reconfiguration keeps seeing a
//! consistent snapshot.

use std::sync::{Arc, RwLock};

use secrecy::SecretString;
use serde::Deserialize;
use tracing::warn;

/// Static connector settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorConfig {
    /// Display name override shown on the login button. Empty means unset.
    #[serde(default)]
    pub name: String,
    /// OAuth client ID issued by Gitee.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret issued by Gitee.
    #[serde(default = "empty_secret")]
    pub client_secret: SecretString,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            client_id: String::new(),
            client_secret: empty_secret(),
        }
    }
}

/// Published configuration snapshot holder.
///
/// Safe to share across concurrently executing login flows: a snapshot taken
/// at the start of a flow stays valid for its whole duration regardless of
/// reconfigurations happening in parallel.
pub struct ConfigStore {
    current: RwLock<Arc<ConnectorConfig>>,
}

impl ConfigStore {
    /// Create a store holding an empty configuration.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(ConnectorConfig::default())),
        }
    }

    /// Get the current configuration snapshot.
    pub fn snapshot(&self) -> Arc<ConnectorConfig> {
        self.current.read().unwrap().clone()
    }

    /// Replace the configuration wholesale.
    pub fn replace(&self, config: ConnectorConfig) {
        *self.current.write().unwrap() = Arc::new(config);
    }

    /// Load configuration from the host-supplied JSON object.
    ///
    /// Malformed input leaves the previous snapshot in effect; the parse
    /// failure is logged rather than surfaced, matching the permissive
    /// contract the host expects. Unknown fields are ignored.
    pub fn load_json(&self, raw: &str) {
        match serde_json::from_str::<ConnectorConfig>(raw) {
            Ok(config) => self.replace(config),
            Err(err) => {
                warn!("ignoring malformed connector configuration: {}", err);
            }
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
