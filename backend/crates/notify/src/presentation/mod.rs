//! Presentation Layer
//!
//! HTTP handlers, DTOs and the auth gate for the relay.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
