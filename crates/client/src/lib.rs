//! Guildhall accounts client.
//!
//! HTTP implementation of the [`guildhall_session::api::AccountsApi`]
//! boundary, plus the portal configuration layer.

pub mod accounts;
pub mod config;

pub use accounts::AccountsClient;
pub use config::{AccountsConfig, GateConfig, PortalConfig};
