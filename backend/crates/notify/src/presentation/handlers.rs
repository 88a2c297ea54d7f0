//! HTTP Handlers
//!
//! A single method-dispatched handler serves every path. The path (without
//! query string) selects the endpoint feed.

use axum::Json;
use axum::extract::{Form, FromRequest, Multipart, Query, Request, State};
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::{
    ListNotificationsUseCase, PostNotificationInput, PostNotificationUseCase,
};
use crate::domain::repository::NotificationRepository;
use crate::error::{NotifyError, NotifyResult};
use crate::presentation::dto::{NotificationResponse, PostForm};

/// Shared state for notify handlers
pub struct NotifyAppState<R>
where
    R: NotificationRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for NotifyAppState<R>
where
    R: NotificationRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// ANY /{endpoint}
///
/// - GET lists the endpoint's notifications as a JSON array
/// - POST stores the `title`/`content` form fields
/// - anything else is answered with a plain-text notice
pub async fn dispatch<R>(
    State(state): State<NotifyAppState<R>>,
    req: Request,
) -> NotifyResult<Response>
where
    R: NotificationRepository + Send + Sync + 'static,
{
    let request_target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    match req.method().clone() {
        Method::GET => {
            let response = list_notifications(&state, &request_target).await;
            Ok(response.into_response())
        }
        Method::POST => {
            let response = post_notification(&state, request_target, req).await?;
            Ok(response.into_response())
        }
        other => Err(NotifyError::UnsupportedMethod(other.to_string())),
    }
}

async fn list_notifications<R>(
    state: &NotifyAppState<R>,
    request_target: &str,
) -> Json<Vec<NotificationResponse>>
where
    R: NotificationRepository + Send + Sync + 'static,
{
    let use_case = ListNotificationsUseCase::new(state.repo.clone());

    let notifications = use_case.execute(request_target).await;

    Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    )
}

async fn post_notification<R>(
    state: &NotifyAppState<R>,
    request_target: String,
    req: Request,
) -> NotifyResult<&'static str>
where
    R: NotificationRepository + Send + Sync + 'static,
{
    let form = read_post_form(req).await;

    let use_case = PostNotificationUseCase::new(state.repo.clone());

    let input = PostNotificationInput {
        request_target,
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
    };

    use_case.execute(input).await?;

    Ok("Success")
}

/// Read `title`/`content` from a url-encoded or multipart body, falling
/// back to the query string for fields the body does not carry. A key that
/// repeats keeps its first value.
async fn read_post_form(req: Request) -> PostForm {
    let query = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
        .map(|Query(pairs)| PostForm::from_pairs(pairs))
        .unwrap_or_default();

    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let body = if is_multipart {
        read_multipart_form(req).await
    } else {
        match Form::<Vec<(String, String)>>::from_request(req, &()).await {
            Ok(Form(pairs)) => PostForm::from_pairs(pairs),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "POST body is not a url-encoded form");
                PostForm::default()
            }
        }
    };

    body.or(query)
}

async fn read_multipart_form(req: Request) -> PostForm {
    let mut multipart = match Multipart::from_request(req, &()).await {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "POST body is not a multipart form");
            return PostForm::default();
        }
    };

    let mut pairs = Vec::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                match field.text().await {
                    Ok(value) => pairs.push((name, value)),
                    Err(e) => {
                        tracing::debug!(error = %e, field = %name, "Unreadable multipart field");
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed multipart body");
                break;
            }
        }
    }

    PostForm::from_pairs(pairs)
}
