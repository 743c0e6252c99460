//! Per-record probe: fetch a download URL and classify the response.
//!
//! A download is [`AuditResult::Dead`] when the fetch fails outright, when the
//! status is 400 or above, or when the first [`BODY_SNIFF_LIMIT`] bytes of the
//! body contain [`ACCESS_DENIED_MARKER`]. Some object stores answer a missing
//! or private object with `200 OK` and an XML error document, so the status
//! alone undercounts dead links.

use doomsday_core::{AuditResult, BodyStream, DoomsdayError, Fetcher, FirmwareRecord, Result};
use futures_util::StreamExt;
use tracing::debug;

/// Number of body bytes inspected for the access-denied marker
pub const BODY_SNIFF_LIMIT: usize = 1024;

/// Substring identifying a disguised access-denied payload
pub const ACCESS_DENIED_MARKER: &[u8] = b"AccessDenied";

/// Probe one record's download URL.
///
/// Transport errors, including a body that times out mid-read, are folded
/// into [`AuditResult::Dead`]. The response body is dropped before returning
/// on every path, which releases the connection.
pub async fn probe<F: Fetcher + ?Sized>(fetcher: &F, record: &FirmwareRecord) -> AuditResult {
    let response = match fetcher.fetch(&record.download_url).await {
        Ok(response) => response,
        Err(e) => {
            debug!(firmware = %record, error = %e, "probe failed");
            return AuditResult::Dead;
        }
    };

    let status = response.status;
    let window = if is_error_status(status) {
        Vec::new()
    } else {
        match read_window(response.body, BODY_SNIFF_LIMIT).await {
            Ok(window) => window,
            Err(e) => {
                debug!(firmware = %record, error = %e, "body timed out");
                return AuditResult::Dead;
            }
        }
    };

    let result = classify(status, &window);
    if result.is_dead() {
        debug!(firmware = %record, status, "dead link");
    }
    result
}

/// Classify a status code and body prefix without any I/O.
#[must_use]
pub fn classify(status: u16, body_prefix: &[u8]) -> AuditResult {
    if is_error_status(status) {
        AuditResult::Dead
    } else {
        classify_body(body_prefix)
    }
}

/// Statuses of 400 and above mark a dead link
#[must_use]
pub const fn is_error_status(status: u16) -> bool {
    status >= 400
}

/// Inspect at most [`BODY_SNIFF_LIMIT`] bytes for the access-denied marker
#[must_use]
pub fn classify_body(body: &[u8]) -> AuditResult {
    let window = &body[..body.len().min(BODY_SNIFF_LIMIT)];

    if contains(window, ACCESS_DENIED_MARKER) {
        AuditResult::Dead
    } else {
        AuditResult::Alive
    }
}

/// Pull chunks until `limit` bytes are buffered or the body ends.
///
/// A timeout is returned as an error. Any other read error ends the window
/// early; whatever arrived before it is kept.
async fn read_window(mut body: BodyStream, limit: usize) -> Result<Vec<u8>> {
    let mut window = Vec::with_capacity(limit);

    while window.len() < limit {
        match body.next().await {
            Some(Ok(chunk)) => {
                let take = chunk.len().min(limit - window.len());
                window.extend_from_slice(&chunk[..take]);
            }
            Some(Err(e @ DoomsdayError::Timeout(_))) => return Err(e),
            Some(Err(e)) => {
                debug!(error = %e, "body read failed");
                break;
            }
            None => break,
        }
    }

    Ok(window)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
