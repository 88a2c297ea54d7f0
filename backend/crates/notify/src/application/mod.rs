//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations and the background cleanup worker.

pub mod cleanup;
pub mod config;
pub mod list_notifications;
pub mod post_notification;

pub use cleanup::CleanupWorker;
pub use list_notifications::ListNotificationsUseCase;
pub use post_notification::{PostNotificationInput, PostNotificationUseCase};
