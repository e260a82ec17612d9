//! Guildhall Session Core
//!
//! This crate provides the member-session state machine for the Guildhall
//! portal:
//!
//! - **Session Store**: fetch and cache the authenticated member, run the
//!   one-time welcome announcement, and publish loading/auth state
//! - **Entitlement Evaluation**: pure trial-window and pro-membership checks
//! - **Content Gate**: a small state machine deciding between loading,
//!   login hand-off, upsell hand-off, and rendering
//! - **Badge Toast**: a stateless view model for "badge earned" toasts
//!
//! ## Architecture
//!
//! The remote accounts service is an opaque boundary behind the
//! [`api::AccountsApi`] trait; navigation is behind [`api::Navigator`].
//! Dependencies are threaded explicitly from the composition root via
//! [`context::PortalContext`] - there is no ambient lookup, a missing
//! dependency fails at compile time.
//!
//! ## Modules
//!
//! - [`api`]: boundaries to the accounts service and navigation layer
//! - [`store`]: session state ownership and the reload flow
//! - [`entitlement`]: pure access decisions
//! - [`gate`]: gate state machine and redirect dispatch
//! - [`notify`]: badge toast view model
//! - [`error`]: boundary error types

pub mod api;
pub mod context;
pub mod entitlement;
pub mod error;
pub mod gate;
pub mod notify;
pub mod store;
pub mod user;

pub use api::{AccountsApi, Navigator, NotificationRequest};
pub use context::PortalContext;
pub use entitlement::has_access;
pub use error::{ApiError, ApiResult};
pub use gate::{GateController, GateState};
pub use store::{SessionState, SessionStore};
pub use user::{User, UserUpdate};
