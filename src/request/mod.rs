//! Request description and the single-shot HTTP executor.
//!
//! A [`RequestSpec`] captures everything the caller supplies about the call:
//! target URL, method, extra headers and an optional body. The [`Executor`]
//! performs exactly one attempt with a fixed timeout and hands back an
//! [`ObservedResponse`]; any failure to reach the API is returned as a
//! network-class [`DetectorError`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use url::Url;

use crate::error::DetectorError;
use crate::response::ObservedResponse;


/// Value of the `User-Agent` header sent with every request.
pub const USER_AGENT_VALUE: &str = "API-Lie-Detector/1.0 (TrustNoDocs)";

/// Time allowed for the whole exchange, from connect to the last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP methods accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}

/// A validated request header given as `Name: value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderPair {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderPair {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Header value as text, or `None` when it holds opaque bytes.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.to_str().ok()
    }
}

impl FromStr for HeaderPair {
    type Err = DetectorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| DetectorError::InvalidHeader {
            header: raw.to_string(),
            reason,
        };
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| invalid("expected 'Name: value'".to_string()))?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| invalid(format!("bad name: {e}")))?;
        let value =
            HeaderValue::from_str(value.trim()).map_err(|e| invalid(format!("bad value: {e}")))?;
        Ok(Self { name, value })
    }
}

/// Everything needed to issue the request under investigation.
#[derive(Clone, Debug, Default)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    pub headers: Vec<HeaderPair>,
    pub body: Option<String>,
}

impl RequestSpec {
    /// A `GET` request for `url` with no extra headers or body.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: HeaderPair) -> Self {
        self.headers.push(header);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Caller headers as a map. Repeated names are kept in order.
    #[must_use]
    pub fn header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for header in &self.headers {
            map.append(header.name.clone(), header.value.clone());
        }
        map
    }
}

/// Parse `raw` into an absolute `http` or `https` URL.
///
/// # Errors
///
/// Returns [`DetectorError::InvalidUrl`] when `raw` is not a URL and
/// [`DetectorError::UnsupportedScheme`] for any scheme other than HTTP(S).
pub fn parse_target(raw: &str) -> Result<Url, DetectorError> {
    let url = Url::parse(raw).map_err(|source| DetectorError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DetectorError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// Headers attached to every request before caller headers are applied.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}

/// Issues one HTTP request per call. No retries.
pub struct Executor {
    client: reqwest::Client,
}

impl Executor {
    /// Build an executor with the fixed timeout and default headers.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, DetectorError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(default_headers())
            .build()
            .map_err(DetectorError::Client)?;
        Ok(Self { client })
    }

    /// Perform the request described by `spec` and capture the response.
    ///
    /// Any HTTP status counts as a response; only transport failures are
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns a network-class [`DetectorError`] when the URL is unusable,
    /// the connection fails, the timeout elapses or the body cannot be read.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ObservedResponse, DetectorError> {
        let url = parse_target(&spec.url)?;
        let network = |source| DetectorError::Network {
            url: spec.url.clone(),
            source,
        };
        debug!("{} {url}", spec.method);
        let mut request = self
            .client
            .request(spec.method.into(), url)
            .headers(spec.header_map());
        if let Some(body) = &spec.body {
            request = request.body(body.clone());
        }
        let response = request.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(network)?;
        debug!("received status {status} with {} body bytes", body.len());
        Ok(ObservedResponse::new(status, headers, body.to_vec()))
    }
}
