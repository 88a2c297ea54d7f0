//! Domain Entities
//!
//! Core business entities for the notification domain.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;

use crate::domain::value_objects::NotificationDraft;

/// Notification entity - one posting stored under an endpoint key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub content: String,
    /// Hex SHA-256 over title, content and post time. Unique per posting,
    /// so it identifies a record but cannot be used to detect duplicates.
    pub fingerprint: String,
    pub posted_at: DateTime<Utc>,
}

impl Notification {
    /// Stamp a validated draft with its post time
    pub fn new(draft: NotificationDraft, posted_at: DateTime<Utc>) -> Self {
        let (title, content) = draft.into_parts();
        let fingerprint = compute_fingerprint(&title, &content, posted_at);
        Self {
            title,
            content,
            fingerprint,
            posted_at,
        }
    }

    /// Age of the notification relative to `now`.
    ///
    /// Returns `None` when `posted_at` lies after `now`, which happens when the
    /// wall clock stepped backwards after the record was stored.
    pub fn age_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        now.signed_duration_since(self.posted_at).to_std().ok()
    }
}

fn compute_fingerprint(title: &str, content: &str, posted_at: DateTime<Utc>) -> String {
    let stamp = posted_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    platform::crypto::sha256_hex(&[title.as_bytes(), content.as_bytes(), stamp.as_bytes()])
}

/// Outcome of one eviction sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionReport {
    /// Endpoint entries visited
    pub endpoints: usize,
    /// Records removed because they outlived the cool-off duration
    pub evicted: usize,
    /// Records kept because their age could not be determined
    pub skipped: usize,
    /// Records left in the store after the sweep
    pub retained: usize,
}
