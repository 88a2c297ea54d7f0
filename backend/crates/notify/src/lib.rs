//! Notify (Notification Relay) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, configuration, cleanup worker
//! - `infra/` - In-memory store implementation
//! - `presentation/` - HTTP dispatcher, auth gate, router
//!
//! ## Model
//! - Notifications are grouped by endpoint key (request path without query)
//! - Each endpoint holds an append-only list, oldest first
//! - A background worker evicts notifications older than the cool-off duration
//! - Every request must carry the single configured Basic credential pair

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::cleanup::CleanupWorker;
pub use application::config::{Credentials, NotifyConfig};
pub use domain::entities::{EvictionReport, Notification};
pub use domain::repository::NotificationRepository;
pub use domain::value_objects::EndpointKey;
pub use error::{ConfigError, NotifyError, NotifyResult};
pub use infra::memory::InMemoryNotificationStore;
pub use presentation::router::notify_router;

#[cfg(test)]
mod tests;
