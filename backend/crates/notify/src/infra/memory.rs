//! In-memory notification store
//!
//! One `parking_lot::Mutex` guards the whole map. Every operation takes the
//! lock for its entire critical section and never awaits while holding it.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::entities::{EvictionReport, Notification};
use crate::domain::repository::NotificationRepository;
use crate::domain::value_objects::{EndpointKey, NotificationDraft};
use crate::error::NotifyResult;

/// Process-wide notification store, shared behind an `Arc`
#[derive(Debug, Default)]
pub struct InMemoryNotificationStore {
    endpoints: Mutex<HashMap<EndpointKey, Vec<Notification>>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of endpoint keys ever posted to
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.lock().len()
    }

    /// Total number of stored notifications across all keys
    pub fn notification_count(&self) -> usize {
        self.endpoints.lock().values().map(Vec::len).sum()
    }

    fn snapshot(&self, key: &EndpointKey) -> Vec<Notification> {
        self.endpoints.lock().get(key).cloned().unwrap_or_default()
    }

    fn insert(&self, key: &EndpointKey, draft: NotificationDraft) -> Notification {
        let mut endpoints = self.endpoints.lock();
        let entry = endpoints.entry(key.clone()).or_default();

        // Stamped under the lock; clamped so a backwards clock step cannot
        // reorder post times within one entry.
        let mut now = Utc::now();
        if let Some(last) = entry.last() {
            now = now.max(last.posted_at);
        }

        let notification = Notification::new(draft, now);
        entry.push(notification.clone());
        notification
    }

    /// Sweep with an explicit clock reading
    pub fn evict_older_than_at(&self, cool_off: Duration, now: DateTime<Utc>) -> EvictionReport {
        let mut endpoints = self.endpoints.lock();
        let mut report = EvictionReport {
            endpoints: endpoints.len(),
            ..EvictionReport::default()
        };

        for (key, notifications) in endpoints.iter_mut() {
            notifications.retain(|notification| match notification.age_at(now) {
                Some(age) if age > cool_off => {
                    report.evicted += 1;
                    false
                }
                Some(_) => true,
                None => {
                    tracing::warn!(
                        endpoint = %key,
                        fingerprint = %notification.fingerprint,
                        posted_at = %notification.posted_at,
                        "Notification posted after sweep clock, keeping it"
                    );
                    report.skipped += 1;
                    true
                }
            });
            report.retained += notifications.len();
        }

        report
    }
}

impl NotificationRepository for InMemoryNotificationStore {
    async fn get(&self, key: &EndpointKey) -> Vec<Notification> {
        self.snapshot(key)
    }

    async fn append(
        &self,
        key: &EndpointKey,
        title: &str,
        content: &str,
    ) -> NotifyResult<Notification> {
        let draft = NotificationDraft::new(title, content)?;
        Ok(self.insert(key, draft))
    }

    async fn evict_older_than(&self, cool_off: Duration) -> EvictionReport {
        self.evict_older_than_at(cool_off, Utc::now())
    }
}
