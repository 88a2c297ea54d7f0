//! List Notifications Use Case

use std::sync::Arc;

use crate::domain::entities::Notification;
use crate::domain::repository::NotificationRepository;
use crate::domain::value_objects::EndpointKey;

/// List Notifications Use Case
pub struct ListNotificationsUseCase<R>
where
    R: NotificationRepository,
{
    repo: Arc<R>,
}

impl<R> ListNotificationsUseCase<R>
where
    R: NotificationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Notifications currently held for the request target's endpoint
    pub async fn execute(&self, request_target: &str) -> Vec<Notification> {
        let key = EndpointKey::from_request_target(request_target);
        let notifications = self.repo.get(&key).await;

        tracing::debug!(
            endpoint = %key,
            count = notifications.len(),
            "Listed notifications"
        );

        notifications
    }
}
