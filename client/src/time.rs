//! Conversions between the server's wire timestamp encodings and `chrono`.
//!
//! Artifactory mixes two encodings: ISO-8601 strings with an offset
//! (e.g. `2024-03-01T10:15:30.000+02:00`) for most metadata fields, and
//! epoch-millisecond integers for download statistics, where `0` means
//! "never" rather than 1970.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Encode a timestamp for a query parameter: epoch milliseconds,
/// truncated to whole seconds.
pub(crate) fn query_millis(ts: &DateTime<Utc>) -> i64 {
    ts.timestamp() * 1000
}

/// Deserialize an epoch-millisecond field where `0` (or absence) means
/// the event never happened.
pub(crate) fn de_epoch_millis_nonzero<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = Option::<i64>::deserialize(deserializer)?;
    Ok(millis
        .filter(|&ms| ms != 0)
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single()))
}
