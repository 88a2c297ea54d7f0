//! Unit tests for notify crate

#[cfg(test)]
mod http_tests {
    use crate::application::config::NotifyConfig;
    use crate::domain::repository::NotificationRepository;
    use crate::domain::value_objects::EndpointKey;
    use crate::error::WWW_AUTHENTICATE_CHALLENGE;
    use crate::infra::memory::InMemoryNotificationStore;
    use crate::presentation::router::notify_router;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use platform::basic_auth::encode_basic_value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    const USER: &str = "relay";
    const PASS: &str = "s3cret";

    fn app() -> (Router, Arc<InMemoryNotificationStore>) {
        let store = Arc::new(InMemoryNotificationStore::new());
        let config = NotifyConfig::new(USER, PASS, Duration::from_secs(3600)).unwrap();
        (notify_router(store.clone(), Arc::new(config)), store)
    }

    fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, encode_basic_value(USER, PASS))
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        authed("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        authed("GET", uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn list(app: &Router, uri: &str) -> Vec<serde_json::Value> {
        let (status, _, body) = send(app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn test_post_then_get_round_trip() {
        let (app, _) = app();

        let (status, _, body) = send(&app, post_form("/deploys", "title=Deploy&content=v2+is+live")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Success");

        let items = list(&app, "/deploys").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["Title"], "Deploy");
        assert_eq!(items[0]["Content"], "v2 is live");
        assert_eq!(items[0]["Checksum"].as_str().unwrap().len(), 64);
        assert!(items[0]["PostTime"].is_string());
    }

    #[tokio::test]
    async fn test_query_string_does_not_change_endpoint() {
        let (app, _) = app();
        send(&app, post_form("/foo?source=ci", "title=a&content=b")).await;

        for uri in ["/foo?x=1", "/foo?y=2", "/foo"] {
            assert_eq!(list(&app, uri).await.len(), 1, "GET {uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_endpoint_is_empty_array() {
        let (app, _) = app();
        let (status, headers, body) = send(&app, get("/never-posted")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_validation_messages_without_mutation() {
        let (app, store) = app();

        let (status, _, body) = send(&app, post_form("/v", "title=&content=x")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Title is required");

        let (status, _, body) = send(&app, post_form("/v", "title=x")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Content is required");

        let (_, _, body) = send(&app, post_form("/v", "")).await;
        assert_eq!(body, "Title is required");

        assert_eq!(store.endpoint_count(), 0);
        assert!(list(&app, "/v").await.is_empty());
    }

    #[tokio::test]
    async fn test_form_fields_fall_back_to_query_string() {
        let (app, _) = app();

        let req = authed("POST", "/q?title=From+query&content=also")
            .body(Body::empty())
            .unwrap();
        let (_, _, body) = send(&app, req).await;
        assert_eq!(body, "Success");

        let (_, _, body) = send(&app, post_form("/q?title=ignored", "title=Body&content=c")).await;
        assert_eq!(body, "Success");

        let items = list(&app, "/q").await;
        assert_eq!(items[0]["Title"], "From query");
        assert_eq!(items[1]["Title"], "Body");
    }

    #[tokio::test]
    async fn test_multipart_form_is_accepted() {
        let (app, _) = app();

        let body = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"title\"\r\n\r\n\
            T\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"content\"\r\n\r\n\
            C\r\n\
            --XYZ--\r\n";
        let req = authed("POST", "/m")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
            .body(Body::from(body))
            .unwrap();
        let (status, _, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Success");

        let items = list(&app, "/m").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["Title"], "T");
        assert_eq!(items[0]["Content"], "C");
    }

    #[tokio::test]
    async fn test_repeated_form_field_keeps_first_value() {
        let (app, _) = app();

        let (_, _, body) = send(&app, post_form("/dup", "title=a&title=b&content=c")).await;
        assert_eq!(body, "Success");

        let items = list(&app, "/dup").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["Title"], "a");
        assert_eq!(items[0]["Content"], "c");
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let (app, store) = app();
        let req = authed("DELETE", "/x").body(Body::empty()).unwrap();

        let (status, _, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Unsupported method : DELETE");
        assert_eq!(store.endpoint_count(), 0);
    }

    #[tokio::test]
    async fn test_insertion_order() {
        let (app, _) = app();
        for i in 0..10 {
            send(&app, post_form("/ordered", &format!("title=n{i}&content=c"))).await;
        }

        let titles: Vec<String> = list(&app, "/ordered")
            .await
            .iter()
            .map(|item| item["Title"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<String> = (0..10).map(|i| format!("n{i}")).collect();
        assert_eq!(titles, expected);
    }

    async fn assert_rejected(app: &Router, req: Request<Body>) {
        let (status, headers, body) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            headers[header::WWW_AUTHENTICATE],
            WWW_AUTHENTICATE_CHALLENGE
        );
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_auth_gate_rejects_bad_credentials() {
        let (app, store) = app();

        let no_header = Request::builder()
            .method("POST")
            .uri("/secure")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("title=a&content=b"))
            .unwrap();
        assert_rejected(&app, no_header).await;

        for (user, pass) in [(USER, "wrong"), ("intruder", PASS), ("", "")] {
            let req = Request::builder()
                .method("POST")
                .uri("/secure")
                .header(header::AUTHORIZATION, encode_basic_value(user, pass))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("title=a&content=b"))
                .unwrap();
            assert_rejected(&app, req).await;
        }

        let garbage = Request::builder()
            .uri("/secure")
            .header(header::AUTHORIZATION, "Basic !!!")
            .body(Body::empty())
            .unwrap();
        assert_rejected(&app, garbage).await;

        assert_eq!(store.endpoint_count(), 0);
    }

    #[tokio::test]
    async fn test_auth_gate_passes_correct_credentials() {
        let (app, store) = app();
        let (status, _, body) = send(&app, post_form("/secure", "title=a&content=b")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Success");
        assert_eq!(store.endpoint_count(), 1);
    }

    #[tokio::test]
    async fn test_eviction_visible_over_http() {
        let (app, store) = app();
        send(&app, post_form("/ttl", "title=a&content=b")).await;

        let later = chrono::Utc::now() + chrono::Duration::seconds(5);
        store.evict_older_than_at(Duration::from_secs(1), later);

        assert!(list(&app, "/ttl").await.is_empty());
        assert_eq!(store.endpoint_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_posts_are_not_lost() {
        let (app, store) = app();
        const N: usize = 64;

        let mut tasks = Vec::new();
        for i in 0..N {
            let app = app.clone();
            tasks.push(tokio::spawn(async move {
                let body = format!("title=t&content=c{i}");
                send(&app, post_form("/busy", &body)).await
            }));
        }

        let sweeper = {
            let store = store.clone();
            tokio::spawn(async move {
                for _ in 0..N {
                    store.evict_older_than(Duration::from_secs(3600)).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        for task in tasks {
            let (status, _, body) = task.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "Success");
        }
        sweeper.await.unwrap();

        let mut contents: Vec<String> = store
            .get(&EndpointKey::from_request_target("/busy"))
            .await
            .into_iter()
            .map(|n| n.content)
            .collect();
        contents.sort();
        let mut expected: Vec<String> = (0..N).map(|i| format!("c{i}")).collect();
        expected.sort();
        assert_eq!(contents, expected);
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::domain::entities::Notification;
    use crate::domain::value_objects::NotificationDraft;
    use crate::presentation::dto::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_notification_response_serialization() {
        let posted_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let notification =
            Notification::new(NotificationDraft::new("Title", "Body").unwrap(), posted_at);
        let checksum = notification.fingerprint.clone();

        let json = serde_json::to_value(NotificationResponse::from(notification)).unwrap();
        assert_eq!(json["Title"], "Title");
        assert_eq!(json["Content"], "Body");
        assert_eq!(json["Checksum"], checksum.as_str());
        assert_eq!(json["PostTime"], "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_post_form_fallback() {
        let body = PostForm {
            title: Some(String::new()),
            content: Some("body".into()),
        };
        let query = PostForm {
            title: Some("query".into()),
            content: Some("query".into()),
        };

        let merged = body.or(query);
        assert_eq!(merged.title.as_deref(), Some("query"));
        assert_eq!(merged.content.as_deref(), Some("body"));
    }

    #[test]
    fn test_post_form_from_pairs() {
        let pairs = [("title", "first"), ("other", "x"), ("title", "second"), ("content", "c")]
            .map(|(k, v)| (k.to_string(), v.to_string()));

        let form = PostForm::from_pairs(pairs);
        assert_eq!(form.title.as_deref(), Some("first"));
        assert_eq!(form.content.as_deref(), Some("c"));

        let empty = PostForm::from_pairs(Vec::new());
        assert!(empty.title.is_none());
        assert!(empty.content.is_none());
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(NotifyError, StatusCode)> = vec![
            (NotifyError::TitleRequired, StatusCode::OK),
            (NotifyError::ContentRequired, StatusCode::OK),
            (NotifyError::UnsupportedMethod("PUT".into()), StatusCode::OK),
            (NotifyError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_unauthorized_sets_challenge() {
        let response = NotifyError::Unauthorized.into_response();
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            r#"Basic realm="restricted", charset="UTF-8""#
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(NotifyError::TitleRequired.to_string(), "Title is required");
        assert_eq!(NotifyError::ContentRequired.to_string(), "Content is required");
        assert_eq!(
            NotifyError::UnsupportedMethod("PATCH".into()).to_string(),
            "Unsupported method : PATCH"
        );
    }
}
