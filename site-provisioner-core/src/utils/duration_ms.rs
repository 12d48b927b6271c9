//! `Duration` serialization helpers.
//!
//! Provides custom Serde serialization/deserialization support:
//! - Serialization: `Duration` -> integer milliseconds
//! - Deserialization: integer milliseconds, or a string with an `ms`/`s`/`m` suffix -> `Duration`

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `Duration` as whole milliseconds.
pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Deserializes `Duration` from milliseconds or a suffixed string (`"1500ms"`, `"10s"`, `"2m"`).
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MillisOrString {
        Millis(u64),
        String(String),
    }

    match MillisOrString::deserialize(deserializer)? {
        MillisOrString::Millis(ms) => Ok(Duration::from_millis(ms)),
        MillisOrString::String(s) => {
            parse_duration(&s).ok_or_else(|| Error::custom(format!("Invalid duration: {s:?}")))
        }
    }
}

/// Parses `"250ms"`, `"10s"`, `"2m"` or a bare millisecond count.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        return ms.trim().parse().ok().map(Duration::from_millis);
    }
    if let Some(secs) = s.strip_suffix('s') {
        return secs.trim().parse().ok().map(Duration::from_secs);
    }
    if let Some(mins) = s.strip_suffix('m') {
        return mins
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs);
    }
    s.parse().ok().map(Duration::from_millis)
}
