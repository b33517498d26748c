//! The line parser: turns one provider's raw log into a sequence of
//! `TxRecord`s, in log order.
//!
//! A line looks like `<hash>\t<anything>Timestamp:<token><anything>`. The hash
//! is everything before the first tab, and the metadata field runs from there
//! to the next tab (or the end of the line). The timestamp token is the
//! whitespace-delimited word following the first `Timestamp:` marker.
use bstr::ByteSlice;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use memchr::{memchr, memmem};

use crate::error::{MalformedReason, RaceError, Result};

const MARKER: &[u8] = b"Timestamp:";

/// One observation of a transaction by a provider. The hash is borrowed from
/// the provider's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxRecord<'data> {
    /// Opaque transaction identifier, not validated
    pub hash: &'data [u8],
    /// When the provider saw the transaction
    pub timestamp: DateTime<Utc>,
}

/// Parses every non-blank line of `log`. Parsing is fail-fast: the first
/// malformed line aborts with `RaceError::MalformedLine`, naming `provider`
/// and the 1-based line number (blank lines are counted).
pub fn parse_log<'data>(provider: &str, log: &'data [u8]) -> Result<Vec<TxRecord<'data>>> {
    let mut records = Vec::new();
    for (index, line) in log.split_str("\n").enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_line(line).map_err(|reason| RaceError::MalformedLine {
            provider: provider.to_owned(),
            line_number: index + 1,
            line: line.to_str_lossy().into_owned(),
            reason,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Parses a single non-blank line.
pub fn parse_line(line: &[u8]) -> std::result::Result<TxRecord<'_>, MalformedReason> {
    let tab = memchr(b'\t', line).ok_or(MalformedReason::MissingSeparator)?;
    let (hash, rest) = (&line[..tab], &line[tab + 1..]);
    let metadata = match memchr(b'\t', rest) {
        Some(end) => &rest[..end],
        None => rest,
    };
    let at = memmem::find(metadata, MARKER).ok_or(MalformedReason::MissingMarker)?;
    let token = metadata[at + MARKER.len()..].fields().next().unwrap_or_default();
    let timestamp = parse_timestamp(token)
        .ok_or_else(|| MalformedReason::BadTimestamp(token.to_str_lossy().into_owned()))?;
    Ok(TxRecord { hash, timestamp })
}

/// Accepts RFC 3339 (`2024-01-01T00:00:00.000Z`), a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, or a bare `YYYY-MM-DD`. Anything without an
/// offset is taken to be UTC.
#[must_use]
pub fn parse_timestamp(token: &[u8]) -> Option<DateTime<Utc>> {
    let token = token.to_str().ok()?;
    if let Ok(t) = DateTime::parse_from_rfc3339(token) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&t));
    }
    let date = NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
