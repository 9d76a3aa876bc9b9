//! Inbound data contracts for raw slot records.
//!
//! Busy records arrive pre-merged by an upstream collaborator (only the
//! participant count survives); preferred records arrive one per user range.
//! Instants are RFC 3339 strings, or naive `YYYY-MM-DDTHH:MM:SS` strings taken
//! as UTC.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};

/// An opaque identifier supplied by the data source.
///
/// Sources emit either strings or integers; both are normalized to their
/// string form so equality is independent of the JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => RecordId(s),
            RawId::Signed(n) => RecordId(n.to_string()),
            RawId::Unsigned(n) => RecordId(n.to_string()),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pre-aggregated busy interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusyRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub busy_participants_count: u32,
}

/// One user's preferred range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferredRecord {
    pub id: RecordId,
    pub user_id: RecordId,
    /// Display name; absent or `null` names render as an empty label.
    pub user_name: Option<String>,
    pub start_time_utc: DateTime<Utc>,
    pub end_time_utc: DateTime<Utc>,
}

// Wire shapes. Bounds stay optional until conversion so a `null` or missing
// bound is reported by record index and field name.

#[derive(Deserialize)]
struct BusyInput {
    start_time: Option<String>,
    end_time: Option<String>,
    busy_participants_count: u32,
}

#[derive(Deserialize)]
struct PreferredInput {
    id: RecordId,
    user_id: RecordId,
    #[serde(default)]
    user_name: Option<String>,
    start_time_utc: Option<String>,
    end_time_utc: Option<String>,
}

/// Parse an instant as RFC 3339, falling back to a naive
/// `YYYY-MM-DDTHH:MM:SS` string interpreted as UTC.
///
/// # Errors
/// Returns `OverlayError::InvalidInstant` if neither form matches.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|source| OverlayError::InvalidInstant {
            value: value.to_string(),
            source,
        })
}

fn required_instant(
    value: Option<&str>,
    kind: &'static str,
    index: usize,
    field: &'static str,
) -> Result<DateTime<Utc>> {
    let raw = value.ok_or(OverlayError::MissingBound { kind, index, field })?;
    parse_instant(raw)
}

/// Parse a JSON array of busy records.
///
/// # Errors
/// Returns `OverlayError::InvalidRecords` if the JSON is malformed,
/// `OverlayError::MissingBound` if a record has a missing or `null` bound, and
/// `OverlayError::InvalidInstant` if a bound is not a recognized datetime.
pub fn parse_busy_records(json: &str) -> Result<Vec<BusyRecord>> {
    let inputs: Vec<BusyInput> =
        serde_json::from_str(json).map_err(|source| OverlayError::InvalidRecords {
            kind: "busy",
            source,
        })?;

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            Ok(BusyRecord {
                start_time: required_instant(input.start_time.as_deref(), "busy", i, "start_time")?,
                end_time: required_instant(input.end_time.as_deref(), "busy", i, "end_time")?,
                busy_participants_count: input.busy_participants_count,
            })
        })
        .collect()
}

/// Parse a JSON array of preferred records.
///
/// # Errors
/// Same as [`parse_busy_records`]; a missing identifier is `InvalidRecords`.
pub fn parse_preferred_records(json: &str) -> Result<Vec<PreferredRecord>> {
    let inputs: Vec<PreferredInput> =
        serde_json::from_str(json).map_err(|source| OverlayError::InvalidRecords {
            kind: "preferred",
            source,
        })?;

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            Ok(PreferredRecord {
                start_time_utc: required_instant(
                    input.start_time_utc.as_deref(),
                    "preferred",
                    i,
                    "start_time_utc",
                )?,
                end_time_utc: required_instant(
                    input.end_time_utc.as_deref(),
                    "preferred",
                    i,
                    "end_time_utc",
                )?,
                id: input.id,
                user_id: input.user_id,
                user_name: input.user_name,
            })
        })
        .collect()
}
