//! Library exports for the binary and integration tests.
//!
//! Exposes the request executor, the response classifier, the comparator
//! and the reporter so tests can drive a whole investigation in process.

pub mod cli_args;
pub mod compare;
pub mod detector;
pub mod error;
pub mod report;
pub mod request;
pub mod response;
pub mod verdict;

pub use cli_args::Args;
pub use compare::structurally_equal;
pub use detector::detect_lies;
pub use error::DetectorError;
pub use request::{Executor, HeaderPair, Method, RequestSpec};
pub use response::{Classification, ObservedResponse};
pub use verdict::Verdict;
