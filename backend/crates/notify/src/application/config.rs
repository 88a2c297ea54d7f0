//! Application Configuration
//!
//! Configuration for the notification relay, built once at startup.

use std::fmt;
use std::time::Duration;

use platform::basic_auth::BasicCredentials;
use platform::crypto::{digest_eq, sha256};
use platform::duration::parse_duration;

use crate::error::ConfigError;

/// Interval between two cleanup sweeps
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(10);

/// The single username/password pair accepted by the auth gate.
///
/// Only SHA-256 digests are retained; the plain values are dropped after
/// construction.
#[derive(Clone)]
pub struct Credentials {
    username_digest: [u8; 32],
    password_digest: [u8; 32],
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, ConfigError> {
        if username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        if password.is_empty() {
            return Err(ConfigError::MissingPassword);
        }
        Ok(Self {
            username_digest: sha256(username.as_bytes()),
            password_digest: sha256(password.as_bytes()),
        })
    }

    /// Check supplied credentials in constant time.
    ///
    /// Both comparisons always run, so the timing does not reveal which of
    /// the two fields was wrong.
    pub fn verify(&self, supplied: &BasicCredentials) -> bool {
        let username_match = digest_eq(supplied.username.as_bytes(), &self.username_digest);
        let password_match = digest_eq(supplied.password.as_bytes(), &self.password_digest);
        username_match & password_match
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}

/// Notify application configuration
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Accepted Basic credentials
    pub credentials: Credentials,
    /// Maximum age of a notification before the cleanup worker evicts it
    pub cool_off: Duration,
    /// Tick of the cleanup worker
    pub cleanup_interval: Duration,
}

impl NotifyConfig {
    pub fn new(username: &str, password: &str, cool_off: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            credentials: Credentials::new(username, password)?,
            cool_off,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        })
    }

    /// Build from raw configuration values, parsing `timeoff` as a Go-style
    /// duration such as `"1h30m"`.
    pub fn from_raw(username: &str, password: &str, timeoff: &str) -> Result<Self, ConfigError> {
        let credentials = Credentials::new(username, password)?;

        if timeoff.trim().is_empty() {
            return Err(ConfigError::MissingTimeOff);
        }
        let cool_off = parse_duration(timeoff).map_err(|source| ConfigError::InvalidTimeOff {
            value: timeoff.to_string(),
            source,
        })?;

        Ok(Self {
            credentials,
            cool_off,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        })
    }
}
