//! Console rendering of an investigation.
//!
//! Every function writes to a generic [`Write`] so output can be asserted in
//! tests without capturing stdout. Lines are plain text with emoji markers;
//! nothing here knows about log levels or exit codes.

use std::io::{self, Write};

use serde_json::Value;

use crate::response::ObservedResponse;
use crate::verdict::Verdict;


fn pretty(value: &Value) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

fn status_marker(response: &ObservedResponse) -> &'static str {
    if response.is_success() { "✅" } else { "❌" }
}

/// Write the target URL and the documented JSON.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_investigation<W: Write>(out: &mut W, url: &str, expected: &Value) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "🔍 Investigating: {url}")?;
    writeln!(out, "📚 Docs claim: {}", pretty(expected)?)
}

/// Write the observed status code and whether it counts as success.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_status<W: Write>(out: &mut W, response: &ObservedResponse) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📊 Reality says:")?;
    writeln!(
        out,
        "Status: {} {}",
        response.status(),
        status_marker(response)
    )
}

/// Write an observed JSON body.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_json_body<W: Write>(out: &mut W, body: &Value) -> io::Result<()> {
    writeln!(out, "Response: {}", pretty(body)?)
}

/// Write an already shortened non-JSON body.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_text_body<W: Write>(out: &mut W, snippet: &str) -> io::Result<()> {
    writeln!(out, "Response: {snippet}")
}

/// Write the closing verdict block.
///
/// `detail` carries the decoder error for [`Verdict::InvalidJson`] and the
/// transport error for [`Verdict::DeadApi`]; other verdicts ignore it.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_verdict<W: Write>(out: &mut W, verdict: Verdict, detail: Option<&str>) -> io::Result<()> {
    writeln!(out)?;
    match verdict {
        Verdict::Accurate => writeln!(out, "🎉 Miracles happen! Docs are (mostly) accurate!"),
        Verdict::Lied => {
            writeln!(
                out,
                "🤥 Surprise! Documentation lied! (Or maybe you misread? Nah, probably lied.)"
            )?;
            writeln!(out, "Differences found between promise and reality.")
        }
        Verdict::NotJson => writeln!(
            out,
            "⚠️  Non-JSON response - docs might be lying about format too!"
        ),
        Verdict::InvalidJson => {
            writeln!(out, "🤡 API returned invalid JSON - another lie uncovered!")?;
            match detail {
                Some(detail) => writeln!(out, "Decoder said: {detail}"),
                None => Ok(()),
            }
        }
        Verdict::DeadApi => writeln!(
            out,
            "💀 API is dead, missing, or pretending to be offline: {}",
            detail.unwrap_or("no response")
        ),
    }
}
