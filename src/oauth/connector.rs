//! Connector trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Authorization request with URL and state management data.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to.
    pub url: String,
    /// CSRF state parameter embedded in the URL, to be echoed on callback.
    pub state: String,
}

/// Normalized identity record produced by a completed login flow.
///
/// Ownership transfers to the host on return; the connector keeps no copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalLoginUserInfo {
    /// Provider's opaque user identifier. Empty means the provider returned a
    /// profile without an id; such a record cannot be used for login and
    /// callers must check for it before account lookup or creation.
    pub external_id: String,
    /// User's display name.
    pub display_name: String,
    /// Username, normalized for host account creation.
    pub username: String,
    /// Avatar URL.
    pub avatar: String,
    /// Primary email address.
    pub email: String,
    /// Raw profile payload, preserved verbatim for audit and debugging.
    pub meta_info: String,
}

/// Trait for external identity connectors.
///
/// Models the two operations the host framework consumes: building the
/// authorization redirect and exchanging a callback code for a normalized
/// identity record. Registration, session handling, and account linking stay
/// on the host side.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Stable identifier for this connector.
    fn slug(&self) -> &'static str;

    /// Display name: the configured override when set, the provider default
    /// otherwise.
    fn display_name(&self) -> String;

    /// Generate the authorization URL for the provider's consent screen.
    ///
    /// # Arguments
    ///
    /// * `receiver_url` - Callback URL the provider will redirect back to.
    ///   Must be registered with the provider as a valid redirect target.
    fn authorization_url(&self, receiver_url: &str) -> AuthorizationRequest;

    /// Exchange an authorization code for a normalized identity record.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the provider callback
    /// * `state` - State parameter echoed back by the provider
    /// * `receiver_url` - The same callback URL used to build the redirect
    ///
    /// # Returns
    ///
    /// The identity record, or an error identifying the pipeline stage that
    /// failed. A record with an empty `external_id` is returned as `Ok` but is
    /// unusable for login.
    async fn exchange(
        &self,
        code: &str,
        state: &str,
        receiver_url: &str,
    ) -> Result<ExternalLoginUserInfo, Error>;
}
