//! OAuth 2.0 login flow for the Gitee identity provider.

mod connector;
mod state;
mod username;

pub mod providers;

pub use connector::{AuthorizationRequest, Connector, ExternalLoginUserInfo};
pub use providers::{GiteeConnector, GiteeEndpoints};
pub use state::StateManager;
pub use username::{normalize_username, CharsetPolicy, UsernamePolicy};
