//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Notification, EvictionReport)
//! - Domain value objects (EndpointKey, NotificationDraft)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
