//! Captured HTTP responses and their classification.
//!
//! The classifier decides how a body should be treated: declared JSON is
//! parsed (and may turn out to be malformed), anything else is kept as text
//! and shortened for display.

use std::borrow::Cow;

use log::warn;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde_json::Value;

use crate::error::DetectorError;

/// Maximum number of characters of a non-JSON body shown to the user.
pub const BODY_SNIPPET_LEN: usize = 200;

/// Trim `text` to `max` characters, appending `...` when truncated.
#[must_use]
pub fn snippet(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_string(),
    }
}

/// Whether a `Content-Type` value names a JSON media type.
///
/// Parameters such as `charset` are ignored, and structured-syntax types
/// like `application/problem+json` count as JSON.
#[must_use]
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// The response returned by the API under investigation.
#[derive(Debug, Clone)]
pub struct ObservedResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

/// How an [`ObservedResponse`] body was interpreted.
#[derive(Debug)]
pub enum Classification {
    /// Declared JSON that parsed cleanly.
    Json(Value),
    /// Declared JSON that failed to parse.
    MalformedJson(DetectorError),
    /// Any other content type; holds the shortened body text.
    NotJson(String),
}

impl ObservedResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Mirrors the usual "OK" notion of HTTP clients: anything below 400.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(is_json_media_type)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as JSON regardless of the declared content type.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::MalformedJson`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, DetectorError> {
        serde_json::from_slice(&self.body).map_err(DetectorError::MalformedJson)
    }

    /// Decide how the body should be reported.
    #[must_use]
    pub fn classify(&self) -> Classification {
        if !self.is_json() {
            return Classification::NotJson(snippet(&self.text(), BODY_SNIPPET_LEN));
        }
        match self.json() {
            Ok(value) => Classification::Json(value),
            Err(err) => {
                warn!(
                    "status {} declared JSON but body failed to parse: {err}",
                    self.status
                );
                Classification::MalformedJson(err)
            }
        }
    }
}
