//! Trial-window and pro-membership entitlement evaluation.

use chrono::{DateTime, Duration, Utc};

use crate::user::User;

/// Length of the free trial window in days.
pub const TRIAL_DAYS: i64 = 7;

/// End of a member's trial window, if a trial was ever started.
///
/// The window is exactly `TRIAL_DAYS * 24h` from the start timestamp, with
/// no calendar-month handling.
pub fn trial_end(user: &User) -> Option<DateTime<Utc>> {
    user.trial_started_at
        .map(|started| started + Duration::days(TRIAL_DAYS))
}

/// Decide whether a member may enter gated content at `now`.
///
/// Pro membership grants access unconditionally. A consumed trial never
/// grants access, even inside an unexpired window. The window end is
/// exclusive: nothing is granted at the exact instant of expiry.
pub fn has_access(user: Option<&User>, now: DateTime<Utc>) -> bool {
    let user = match user {
        Some(user) => user,
        None => return false,
    };

    if user.is_pro_member {
        return true;
    }

    if user.trial_used {
        return false;
    }

    match trial_end(user) {
        Some(end) => now < end,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> User {
        User {
            full_name: "Test Member".to_string(),
            email: "member@guild.test".to_string(),
            is_pro_member: false,
            trial_started_at: None,
            trial_used: false,
            welcome_notification_sent: true,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_absent_user_is_denied() {
        assert!(!has_access(None, Utc::now()));
    }

    #[test]
    fn test_pro_member_always_passes() {
        let mut user = member();
        user.is_pro_member = true;
        user.trial_started_at = Some(at("2020-01-01T00:00:00Z"));
        user.trial_used = true;

        // Even with an expired, consumed trial.
        assert!(has_access(Some(&user), at("2024-06-01T00:00:00Z")));
    }

    #[test]
    fn test_used_trial_overrides_active_window() {
        let mut user = member();
        user.trial_started_at = Some(at("2024-01-01T00:00:00Z"));
        user.trial_used = true;

        assert!(!has_access(Some(&user), at("2024-01-02T00:00:00Z")));
    }

    #[test]
    fn test_active_trial_window() {
        let mut user = member();
        user.trial_started_at = Some(at("2024-01-01T00:00:00Z"));

        assert!(has_access(Some(&user), at("2024-01-01T00:00:00Z")));
        assert!(has_access(Some(&user), at("2024-01-05T00:00:00Z")));
        assert!(has_access(Some(&user), at("2024-01-07T23:59:59Z")));
    }

    #[test]
    fn test_window_end_is_exclusive() {
        let mut user = member();
        user.trial_started_at = Some(at("2024-01-01T00:00:00Z"));

        assert_eq!(
            trial_end(&user),
            Some(at("2024-01-08T00:00:00Z"))
        );
        assert!(!has_access(Some(&user), at("2024-01-08T00:00:00Z")));
        assert!(!has_access(Some(&user), at("2024-01-09T00:00:00Z")));
    }

    #[test]
    fn test_no_trial_started_is_denied() {
        let user = member();
        assert!(!has_access(Some(&user), Utc::now()));
    }
}
