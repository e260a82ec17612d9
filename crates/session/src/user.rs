//! Member account model as served by the accounts service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated member, as returned by `GET /api/users/me`.
///
/// The accounts service owns this record; the session store only caches it.
/// `welcome_notification_sent` moves false to true at most once per member,
/// only after the welcome notification actually exists, and never reverts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub is_pro_member: bool,
    #[serde(default)]
    pub trial_started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trial_used: bool,
    #[serde(default)]
    pub welcome_notification_sent: bool,
}

/// Partial update payload for `PATCH /api/users/me`.
///
/// Absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_notification_sent: Option<bool>,
}
