//! Notify Router

use axum::{Router, middleware};
use std::sync::Arc;

use crate::application::config::NotifyConfig;
use crate::domain::repository::NotificationRepository;
use crate::presentation::handlers::{self, NotifyAppState};
use crate::presentation::middleware::require_basic_auth;

/// Create the relay router for any repository implementation.
///
/// Every path is served by the method dispatcher, behind the auth gate.
pub fn notify_router<R>(repo: Arc<R>, config: Arc<NotifyConfig>) -> Router
where
    R: NotificationRepository + Send + Sync + 'static,
{
    let state = NotifyAppState { repo };

    Router::new()
        .fallback(handlers::dispatch::<R>)
        .layer(middleware::from_fn_with_state(config, require_basic_auth))
        .with_state(state)
}
