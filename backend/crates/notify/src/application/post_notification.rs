//! Post Notification Use Case

use std::sync::Arc;

use crate::domain::entities::Notification;
use crate::domain::repository::NotificationRepository;
use crate::domain::value_objects::EndpointKey;
use crate::error::NotifyResult;

/// Input for posting a notification
#[derive(Debug, Clone)]
pub struct PostNotificationInput {
    /// Request path, optionally with a query string
    pub request_target: String,
    pub title: String,
    pub content: String,
}

/// Post Notification Use Case
pub struct PostNotificationUseCase<R>
where
    R: NotificationRepository,
{
    repo: Arc<R>,
}

impl<R> PostNotificationUseCase<R>
where
    R: NotificationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: PostNotificationInput) -> NotifyResult<Notification> {
        let key = EndpointKey::from_request_target(&input.request_target);

        let notification = self
            .repo
            .append(&key, &input.title, &input.content)
            .await?;

        tracing::info!(
            endpoint = %key,
            fingerprint = %notification.fingerprint,
            "Notification stored"
        );

        Ok(notification)
    }
}
