//! Auth Middleware
//!
//! Basic-authentication gate in front of every route.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::basic_auth::extract_basic_credentials;
use std::sync::Arc;

use crate::application::config::NotifyConfig;
use crate::error::NotifyError;

/// Middleware that requires the configured Basic credentials.
///
/// A missing or malformed header is treated exactly like wrong credentials:
/// 401 with a `WWW-Authenticate` challenge, and the wrapped handler is not
/// invoked.
pub async fn require_basic_auth(
    State(config): State<Arc<NotifyConfig>>,
    req: Request,
    next: Next,
) -> Result<Response, NotifyError> {
    let supplied = match extract_basic_credentials(req.headers()) {
        Ok(supplied) => supplied,
        Err(e) => {
            tracing::debug!(reason = %e, "No usable Basic credentials");
            return Err(NotifyError::Unauthorized);
        }
    };

    if !config.credentials.verify(&supplied) {
        tracing::debug!("Basic credentials did not match");
        return Err(NotifyError::Unauthorized);
    }

    Ok(next.run(req).await)
}
