//! One complete investigation: request, classify, compare, report.

use std::io::{self, Write};

use log::{info, warn};
use serde_json::Value;

use crate::compare::structurally_equal;
use crate::report;
use crate::request::{Executor, RequestSpec};
use crate::response::Classification;
use crate::verdict::Verdict;

/// Compare what the API returns for `spec` with what the docs promise.
///
/// Network and decoding failures are reported to `out` and turned into a
/// [`Verdict`]; they never abort the run.
///
/// # Errors
///
/// Returns an error only if writing the report to `out` fails.
pub async fn detect_lies<W: Write>(
    out: &mut W,
    executor: &Executor,
    spec: &RequestSpec,
    expected: &Value,
) -> io::Result<Verdict> {
    report::write_investigation(out, &spec.url, expected)?;

    let response = match executor.execute(spec).await {
        Ok(response) => response,
        Err(err) => {
            warn!("{} {} unreachable: {err}", spec.method, spec.url);
            let verdict = Verdict::DeadApi;
            report::write_verdict(out, verdict, Some(&err.to_string()))?;
            return Ok(verdict);
        }
    };

    report::write_status(out, &response)?;
    let verdict = match response.classify() {
        Classification::Json(observed) => {
            report::write_json_body(out, &observed)?;
            let verdict = Verdict::from_comparison(structurally_equal(expected, &observed));
            report::write_verdict(out, verdict, None)?;
            verdict
        }
        Classification::NotJson(snippet) => {
            report::write_text_body(out, &snippet)?;
            report::write_verdict(out, Verdict::NotJson, None)?;
            Verdict::NotJson
        }
        Classification::MalformedJson(err) => {
            report::write_verdict(out, Verdict::InvalidJson, Some(&err.to_string()))?;
            Verdict::InvalidJson
        }
    };
    info!("verdict for {}: {verdict}", spec.url);
    Ok(verdict)
}
