//! HTTP client for the accounts service.
//!
//! Thin reqwest wrapper over the three operations the session core needs:
//! fetch the current member, create a notification, patch the member
//! record. Auth statuses map to [`ApiError::Unauthenticated`]; every other
//! non-success status surfaces as a service error with status and body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use guildhall_session::api::{AccountsApi, NotificationRequest};
use guildhall_session::error::{ApiError, ApiResult};
use guildhall_session::user::{User, UserUpdate};

/// HTTP client for the accounts service API.
#[derive(Clone, Debug)]
pub struct AccountsClient {
    base_url: String,
    http: reqwest::Client,
}

impl AccountsClient {
    /// Create a client against `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthenticated);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl AccountsApi for AccountsClient {
    /// GET /api/users/me
    async fn current_user(&self) -> ApiResult<User> {
        let url = format!("{}/api/users/me", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let user: User = serde_json::from_str(&body)?;

        tracing::debug!(email = %user.email, "Fetched current member");
        Ok(user)
    }

    /// POST /api/notifications
    async fn create_notification(&self, request: NotificationRequest) -> ApiResult<()> {
        let url = format!("{}/api/notifications", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status(response).await?;

        Ok(())
    }

    /// PATCH /api/users/me
    async fn update_current_user(&self, update: UserUpdate) -> ApiResult<()> {
        let url = format!("{}/api/users/me", self.base_url);

        let response = self
            .http
            .patch(&url)
            .json(&update)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status(response).await?;

        Ok(())
    }
}
