//! Member session state and the bootstrap/reload flow.
//!
//! The store owns the only mutable session state in the crate. It is
//! mutated exclusively from the store's own reload flow; consumers observe
//! it through a watch subscription and trigger refreshes via
//! [`SessionStore::reload`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{AccountsApi, NotificationRequest};
use crate::error::ApiResult;
use crate::user::{User, UserUpdate};

/// Snapshot of the session as seen by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// The authenticated member. `None` means "not authenticated" once
    /// `is_loading` has settled to false.
    pub user: Option<User>,
    /// True only while a fetch is in flight.
    pub is_loading: bool,
}

impl SessionState {
    fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

/// Fetches and caches the authenticated member.
///
/// Identity failures never escape this store: every failure path settles
/// the state to unauthenticated so the UI can fall back to "please log in"
/// instead of a raw error.
#[derive(Clone)]
pub struct SessionStore {
    accounts: Arc<dyn AccountsApi>,
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    /// Create the store and run the initial [`reload`](Self::reload) once.
    pub async fn bootstrap(accounts: Arc<dyn AccountsApi>) -> Self {
        let store = Self::new(accounts);
        store.reload().await;
        store
    }

    /// Create the store without fetching. The state starts as loading.
    pub fn new(accounts: Arc<dyn AccountsApi>) -> Self {
        let (tx, _rx) = watch::channel(SessionState::loading());
        Self {
            accounts,
            state: Arc::new(tx),
        }
    }

    /// Current snapshot of the session state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Re-fetch the current member from the accounts service.
    ///
    /// Concurrent invocations are not serialized; the last completed fetch
    /// wins. The state always settles with `is_loading = false`, whatever
    /// the outcome.
    pub async fn reload(&self) {
        self.state.send_modify(|state| state.is_loading = true);

        let user = match self.accounts.current_user().await {
            Ok(user) => {
                if !user.welcome_notification_sent {
                    // Best effort: a failed announcement must not disturb
                    // the resolved session.
                    if let Err(e) = self.announce_new_member(&user).await {
                        tracing::warn!(
                            error = %e,
                            email = %user.email,
                            "Welcome announcement failed"
                        );
                    }
                }
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Fetching current member failed, session unauthenticated");
                None
            }
        };

        // The fetched member and the settled loading flag land in a single
        // notification, loading cleared last.
        self.state.send_modify(|state| {
            state.user = user;
            state.is_loading = false;
        });
    }

    /// One-time onboarding announcement for members that have not been
    /// welcomed yet. The member record is marked only after the
    /// notification record exists.
    async fn announce_new_member(&self, user: &User) -> ApiResult<()> {
        self.accounts
            .create_notification(NotificationRequest {
                title: "New member".to_string(),
                message: format!("{} ({}) just joined the guild", user.full_name, user.email),
                kind: "new_user".to_string(),
            })
            .await?;

        self.accounts
            .update_current_user(UserUpdate {
                welcome_notification_sent: Some(true),
                ..UserUpdate::default()
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeAccounts {
        user: Mutex<Option<User>>,
        fail_notification: bool,
        notifications: Mutex<Vec<NotificationRequest>>,
        updates: Mutex<Vec<UserUpdate>>,
        fetches: AtomicUsize,
    }

    impl FakeAccounts {
        fn with_user(user: User) -> Self {
            Self {
                user: Mutex::new(Some(user)),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl AccountsApi for FakeAccounts {
        async fn current_user(&self) -> ApiResult<User> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.user
                .lock()
                .unwrap()
                .clone()
                .ok_or(ApiError::Unauthenticated)
        }

        async fn create_notification(&self, request: NotificationRequest) -> ApiResult<()> {
            if self.fail_notification {
                return Err(ApiError::Service {
                    status: 500,
                    body: "notification service down".to_string(),
                });
            }
            self.notifications.lock().unwrap().push(request);
            Ok(())
        }

        async fn update_current_user(&self, update: UserUpdate) -> ApiResult<()> {
            self.updates.lock().unwrap().push(update);
            Ok(())
        }
    }

    fn member(welcomed: bool) -> User {
        User {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@guild.test".to_string(),
            is_pro_member: false,
            trial_started_at: None,
            trial_used: false,
            welcome_notification_sent: welcomed,
        }
    }

    #[tokio::test]
    async fn test_bootstrap_fetches_once_and_settles() {
        let accounts = Arc::new(FakeAccounts::with_user(member(true)));
        let store = SessionStore::bootstrap(accounts.clone()).await;

        let state = store.current();
        assert!(!state.is_loading);
        assert_eq!(state.user.as_ref().map(|u| u.email.as_str()), Some("ada@guild.test"));
        assert_eq!(accounts.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_settles_unauthenticated() {
        let accounts = Arc::new(FakeAccounts::default());
        let store = SessionStore::bootstrap(accounts).await;

        let state = store.current();
        assert!(!state.is_loading);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_welcome_flow_marks_member_exactly_once() {
        let accounts = Arc::new(FakeAccounts::with_user(member(false)));
        let store = SessionStore::bootstrap(accounts.clone()).await;

        let notifications = accounts.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, "new_user");
        assert!(notifications[0].message.contains("ada@guild.test"));
        drop(notifications);

        let updates = accounts.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].welcome_notification_sent, Some(true));
        drop(updates);

        // The session itself resolved normally.
        assert!(store.current().user.is_some());
    }

    #[tokio::test]
    async fn test_failed_notification_skips_member_update() {
        let accounts = Arc::new(FakeAccounts {
            user: Mutex::new(Some(member(false))),
            fail_notification: true,
            ..FakeAccounts::default()
        });
        let store = SessionStore::bootstrap(accounts.clone()).await;

        assert!(accounts.updates.lock().unwrap().is_empty());
        // Swallowed: the session still resolves with the member.
        let state = store.current();
        assert!(!state.is_loading);
        assert!(state.user.is_some());
    }

    #[tokio::test]
    async fn test_welcomed_member_triggers_no_side_effects() {
        let accounts = Arc::new(FakeAccounts::with_user(member(true)));
        SessionStore::bootstrap(accounts.clone()).await;

        assert!(accounts.notifications.lock().unwrap().is_empty());
        assert!(accounts.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reload_handle_refetches() {
        let accounts = Arc::new(FakeAccounts::with_user(member(true)));
        let store = SessionStore::bootstrap(accounts.clone()).await;

        *accounts.user.lock().unwrap() = None;
        store.reload().await;

        assert!(store.current().user.is_none());
        assert_eq!(accounts.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_subscribers_observe_settled_state() {
        let accounts = Arc::new(FakeAccounts::with_user(member(true)));
        let store = SessionStore::new(accounts);

        let mut rx = store.subscribe();
        assert!(rx.borrow().is_loading);

        store.reload().await;
        rx.changed().await.unwrap();

        let state = rx.borrow_and_update().clone();
        assert!(!state.is_loading);
        assert!(state.user.is_some());
    }
}
