//! HTTP Basic authentication
//!
//! Decoding of the `Authorization: Basic <base64>` request header (RFC 7617).

use axum::http::{HeaderMap, header};

use crate::crypto::from_base64;

const BASIC_SCHEME: &str = "basic ";

/// Username/password pair supplied by a client
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Error when extracting Basic credentials
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BasicAuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization scheme is not Basic")]
    WrongScheme,

    #[error("Malformed Basic credentials")]
    Malformed,
}

/// Extract Basic credentials from request headers
///
/// The scheme name is matched case-insensitively. The decoded payload is split
/// at the first `:`, so passwords may themselves contain colons.
///
/// ## Returns
/// * `Ok(BasicCredentials)` - Successfully decoded credentials
/// * `Err(BasicAuthError)` - Header missing, not Basic, or undecodable
pub fn extract_basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, BasicAuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BasicAuthError::MissingHeader)?
        .to_str()
        .map_err(|_| BasicAuthError::Malformed)?;

    decode_basic_value(value)
}

/// Decode the value of an `Authorization` header
pub fn decode_basic_value(value: &str) -> Result<BasicCredentials, BasicAuthError> {
    let encoded = match value.get(..BASIC_SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BASIC_SCHEME) => {
            &value[BASIC_SCHEME.len()..]
        }
        _ => return Err(BasicAuthError::WrongScheme),
    };

    let decoded = from_base64(encoded.trim())
        .map_err(|_| BasicAuthError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::Malformed)?;

    let (username, password) = decoded.split_once(':').ok_or(BasicAuthError::Malformed)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Build an `Authorization` header value (used by clients and tests)
pub fn encode_basic_value(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        crate::crypto::to_base64(format!("{username}:{password}").as_bytes())
    )
}
