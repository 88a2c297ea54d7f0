//! Repository Traits
//!
//! Interfaces for notification storage. Implementation is in infrastructure layer.

use std::time::Duration;

use crate::domain::entities::{EvictionReport, Notification};
use crate::domain::value_objects::EndpointKey;
use crate::error::NotifyResult;

/// Notification repository trait
///
/// Implementations must serialize every operation against one another so that
/// no caller ever observes a partially-updated store.
#[trait_variant::make(NotificationRepository: Send)]
pub trait LocalNotificationRepository {
    /// Current notifications for `key`, oldest first. Unknown keys yield an
    /// empty list.
    async fn get(&self, key: &EndpointKey) -> Vec<Notification>;

    /// Validate, stamp and append a notification, creating the entry if
    /// absent. Fails without touching the store when title or content is empty.
    async fn append(
        &self,
        key: &EndpointKey,
        title: &str,
        content: &str,
    ) -> NotifyResult<Notification>;

    /// Remove every notification older than `cool_off` across all keys.
    /// Entries emptied by the sweep are kept.
    async fn evict_older_than(&self, cool_off: Duration) -> EvictionReport;
}
