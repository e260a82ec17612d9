//! Badge toast view model.
//!
//! Presentation only. The owner decides visibility and lifetime; the toast
//! keeps no timers and closes only on an explicit member action.

use serde::{Deserialize, Serialize};

/// An earned badge, supplied by whatever awarded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub icon: String,
    pub name: String,
    pub description: String,
    pub points: i64,
}

/// What a renderer shows for a visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub icon: String,
    pub title: String,
    pub body: String,
    pub points: i64,
}

/// Gamified "badge earned" toast.
pub struct BadgeToast {
    badge: Option<Badge>,
    visible: bool,
    on_close: Option<Box<dyn FnOnce() + Send>>,
}

impl BadgeToast {
    pub fn new(
        badge: Option<Badge>,
        visible: bool,
        on_close: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            badge,
            visible,
            on_close: Some(Box::new(on_close)),
        }
    }

    /// The view to render, or `None` when there is nothing to show.
    pub fn view(&self) -> Option<ToastView> {
        if !self.visible {
            return None;
        }

        self.badge.as_ref().map(|badge| ToastView {
            icon: badge.icon.clone(),
            title: badge.name.clone(),
            body: badge.description.clone(),
            points: badge.points,
        })
    }

    /// Handle the member dismissing the toast.
    ///
    /// The close callback runs on the first call only; later calls are
    /// no-ops.
    pub fn dismiss(&mut self) {
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
    }
}
