//! Command-line argument structures.
//!
//! Isolates clap derivations so `main.rs` stays focused on runtime logic.

use clap::Parser;
use serde_json::Value;

use crate::error::DetectorError;
use crate::request::{HeaderPair, Method, RequestSpec};

/// Short usage line printed for argument errors.
pub const USAGE: &str = "Usage: api-lie-detector <api_url> '<expected_json>'";

/// Example invocation printed below [`USAGE`].
pub const EXAMPLE: &str =
    r#"Example: api-lie-detector "https://api.example.com/users/1" '{"id":1,"name":"John"}'"#;

/// Arguments accepted by the binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "api-lie-detector",
    version,
    about = "Call an API once and check whether it returns what its docs promise"
)]
pub struct Args {
    /// URL of the endpoint under investigation
    pub api_url: String,
    /// JSON the documentation says the endpoint returns
    #[arg(allow_hyphen_values = true)]
    pub expected_json: String,
    /// HTTP method to use
    #[arg(short = 'X', long, value_enum, default_value_t = Method::Get)]
    pub method: Method,
    /// Extra request header, may be repeated
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<HeaderPair>,
    /// Request body, sent verbatim
    #[arg(short = 'd', long = "data", value_name = "BODY")]
    pub data: Option<String>,
}

impl Args {
    /// Parse the documented response.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::InvalidExpected`] if the argument is not JSON.
    pub fn expected(&self) -> Result<Value, DetectorError> {
        serde_json::from_str(&self.expected_json).map_err(DetectorError::InvalidExpected)
    }

    /// Describe the request these arguments ask for.
    #[must_use]
    pub fn request_spec(&self) -> RequestSpec {
        let spec = self.headers.iter().cloned().fold(
            RequestSpec::new(&self.api_url).with_method(self.method),
            RequestSpec::with_header,
        );
        match &self.data {
            Some(body) => spec.with_body(body.as_str()),
            None => spec,
        }
    }
}
