//! Identity provider implementations.

pub mod gitee;

pub use gitee::{GiteeConnector, GiteeEndpoints};
