//! Domain Value Objects
//!
//! Immutable value types for the notification domain.

use std::fmt;

use crate::error::{NotifyError, NotifyResult};

/// Endpoint key - identifies one independent notification feed
///
/// Derived from the request target by stripping everything from the first
/// `?` onward, so `/alerts?since=1` and `/alerts` name the same feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointKey(String);

impl EndpointKey {
    pub fn from_request_target(target: &str) -> Self {
        let path = match target.split_once('?') {
            Some((path, _query)) => path,
            None => target,
        };
        Self(path.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated title/content pair that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    title: String,
    content: String,
}

impl NotificationDraft {
    /// Validate a posting. The title is checked before the content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> NotifyResult<Self> {
        let title = title.into();
        let content = content.into();

        if title.is_empty() {
            return Err(NotifyError::TitleRequired);
        }
        if content.is_empty() {
            return Err(NotifyError::ContentRequired);
        }

        Ok(Self { title, content })
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.title, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_strips_query() {
        assert_eq!(EndpointKey::from_request_target("/foo?x=1").as_str(), "/foo");
        assert_eq!(
            EndpointKey::from_request_target("/foo?x=1?y=2").as_str(),
            "/foo"
        );
        assert_eq!(EndpointKey::from_request_target("/foo").as_str(), "/foo");
        assert_eq!(EndpointKey::from_request_target("/foo?").as_str(), "/foo");
    }

    #[test]
    fn test_keys_differing_only_in_query_are_equal() {
        assert_eq!(
            EndpointKey::from_request_target("/foo?x=1"),
            EndpointKey::from_request_target("/foo?y=2")
        );
        assert_ne!(
            EndpointKey::from_request_target("/foo"),
            EndpointKey::from_request_target("/foo/")
        );
    }

    #[test]
    fn test_draft_validation_order() {
        assert!(matches!(
            NotificationDraft::new("", ""),
            Err(NotifyError::TitleRequired)
        ));
        assert!(matches!(
            NotificationDraft::new("t", ""),
            Err(NotifyError::ContentRequired)
        ));

        let draft = NotificationDraft::new("t", "c").unwrap();
        assert_eq!(draft.into_parts(), ("t".to_string(), "c".to_string()));
    }
}
