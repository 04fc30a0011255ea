//! # Notifications
//!
//! Ephemeral toast messages. The wallet lifecycle pushes into a [`Notifier`];
//! the browser app backs it with a [`NotificationQueue`] that it renders and
//! expires.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Maximum number of toasts kept at once. Oldest are dropped first.
pub const MAX_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Danger,
}

impl NotificationKind {
    /// CSS modifier used by the toast container.
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "toast-info",
            NotificationKind::Success => "toast-success",
            NotificationKind::Warning => "toast-warning",
            NotificationKind::Danger => "toast-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn danger(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationKind::Danger)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationKind::Success)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}

impl From<&Error> for Notification {
    fn from(err: &Error) -> Self {
        Notification::danger(err.title(), err.user_message())
    }
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Bounded FIFO of live notifications, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        while self.items.len() >= MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Remove a notification. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop everything older than `ttl`. Returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now, ttl));
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
