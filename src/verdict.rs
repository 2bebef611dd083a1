//! Final classification of a run.

use std::fmt;

/// Outcome reported at the end of an investigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Observed JSON equals the documented JSON.
    Accurate,
    /// Observed JSON differs from the documented JSON.
    Lied,
    /// The response did not declare a JSON content type.
    NotJson,
    /// The response declared JSON but the body failed to parse.
    InvalidJson,
    /// No response could be obtained.
    DeadApi,
}

impl Verdict {
    #[must_use]
    pub fn from_comparison(equal: bool) -> Self {
        if equal { Self::Accurate } else { Self::Lied }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Accurate => "accurate",
            Self::Lied => "lied",
            Self::NotJson => "not JSON",
            Self::InvalidJson => "invalid JSON",
            Self::DeadApi => "dead API",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
