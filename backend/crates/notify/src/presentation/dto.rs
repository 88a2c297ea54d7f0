//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Notification;

/// One element of the GET response array.
///
/// Field names follow the relay's established JSON shape, which polling
/// clients already parse.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationResponse {
    pub title: String,
    pub content: String,
    pub checksum: String,
    pub post_time: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            title: notification.title,
            content: notification.content,
            checksum: notification.fingerprint,
            post_time: notification.posted_at,
        }
    }
}

/// Form fields for POST
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostForm {
    /// Collect `title`/`content` from decoded form pairs, first value wins
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> PostForm {
        let mut form = PostForm::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "title" => &mut form.title,
                "content" => &mut form.content,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }

    /// Fill fields that are missing or empty here from `fallback`
    pub fn or(self, fallback: PostForm) -> PostForm {
        fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
            primary.filter(|v| !v.is_empty()).or(fallback)
        }

        PostForm {
            title: pick(self.title, fallback.title),
            content: pick(self.content, fallback.content),
        }
    }
}
