//! Boundaries to the remote accounts service and the navigation layer.
//!
//! The session core never talks HTTP itself. Implementations of these
//! traits live outside the crate (the reqwest client in
//! `guildhall-client`, fakes in tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::user::{User, UserUpdate};

/// A notification record addressed to the operations team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Remote accounts service boundary.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Fetch the member owning the ambient authenticated session.
    async fn current_user(&self) -> ApiResult<User>;

    /// Create a notification record.
    async fn create_notification(&self, request: NotificationRequest) -> ApiResult<()>;

    /// Partially update the current member's record.
    async fn update_current_user(&self, update: UserUpdate) -> ApiResult<()>;
}

/// Navigation boundary used by the gate controller for redirects.
pub trait Navigator: Send + Sync {
    /// Hand the visitor to the login flow.
    fn redirect_to_login(&self);

    /// Navigate to an in-app path.
    fn redirect_to(&self, path: &str);
}
