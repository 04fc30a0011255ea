//! Toast notifications

use chrono::{Duration, Utc};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use lib_core::{Notification, NotificationQueue, Notifier};
use uuid::Uuid;

/// Live toast queue. Passed to the components that render or push toasts.
#[derive(Clone, Copy)]
pub struct Toasts {
    pub queue: RwSignal<NotificationQueue>,
    ttl_secs: i64,
}

impl Toasts {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::new()),
            ttl_secs,
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        self.queue.update(|queue| {
            queue.dismiss(id);
        });
    }
}

impl Notifier for Toasts {
    fn notify(&self, notification: Notification) {
        log::info!("Notification: {} - {}", notification.title, notification.message);
        let id = notification.id;
        let ttl = Duration::seconds(self.ttl_secs);

        self.queue.update(|queue| {
            queue.expire(Utc::now(), ttl);
            queue.push(notification);
        });

        let toasts = *self;
        let millis = u32::try_from(ttl.num_milliseconds()).unwrap_or(u32::MAX);
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(millis).await;
            toasts.dismiss(id);
        });
    }
}
