//! # gitee-connector
//!
//! OAuth 2.0 external identity connector for Gitee:
//! - Authorization redirect URL generation with per-request CSRF state
//! - Authorization code exchange against the Gitee token endpoint
//! - Profile and primary-email retrieval from the Gitee API
//! - Username normalization for host account creation
//!
//! ## Architecture
//!
//! The host application owns login sessions, account lookup and persistence;
//! this crate only turns an authorization code into a normalized
//! [`ExternalLoginUserInfo`](oauth::ExternalLoginUserInfo) record.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gitee_connector::{
//!     config::ConfigStore,
//!     oauth::{Connector, GiteeConnector},
//! };
//!
//! let config = Arc::new(ConfigStore::new());
//! config.load_json(r#"{"client_id":"id","client_secret":"secret"}"#);
//!
//! let connector = GiteeConnector::new(config)?;
//! let request = connector.authorization_url("https://host.example.com/callback");
//! // ...redirect the user, then on callback:
//! // let user_info = connector.exchange(code, state, receiver_url).await?;
//! ```

pub mod config;
pub mod error;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
