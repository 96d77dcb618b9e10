//! Wall-clock time for claim expiry.
//!
//! Expiry is a pure predicate over a stored timestamp and the evaluation time;
//! nothing here reads the system clock (that is `PhysicalTimeEffects`).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// UTC wall-clock instant
pub type Timestamp = DateTime<Utc>;

/// Last instant the persisted form can carry: `9999-12-31T23:59:59.999Z`.
///
/// Later years render with an expanded `+YYYYY` year that RFC 3339 parsing
/// rejects, so nothing past this may be written to the ledger.
pub fn latest_persistable() -> Timestamp {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_milli_opt(23, 59, 59, 999))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Whether `ts` survives a write and read of the persisted form
pub fn is_persistable(ts: &Timestamp) -> bool {
    *ts <= latest_persistable()
}

/// Render a timestamp in the persisted form: ISO-8601, UTC, millisecond
/// precision, `Z` suffix (`2025-01-01T00:00:00.000Z`).
pub fn to_iso8601(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a persisted ISO-8601 timestamp with any UTC offset.
pub fn parse_iso8601(raw: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

/// Serde adapter for `Timestamp` fields stored as ISO-8601 strings.
pub mod iso8601 {
    use super::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub fn serialize<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_iso8601(ts))
    }

    /// Deserialize from any RFC 3339 string
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso8601(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_millisecond_precision_with_zulu_suffix() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(to_iso8601(&ts), "2025-03-04T05:06:07.000Z");
    }

    #[test]
    fn parses_offsets_into_utc() {
        let ts = parse_iso8601("2025-03-04T07:06:07.250+02:00").unwrap();
        assert_eq!(to_iso8601(&ts), "2025-03-04T05:06:07.250Z");
    }

    #[test]
    fn latest_persistable_instant_round_trips() {
        let last = latest_persistable();
        assert_eq!(to_iso8601(&last), "9999-12-31T23:59:59.999Z");
        assert_eq!(parse_iso8601(&to_iso8601(&last)).unwrap(), last);

        let beyond = last + chrono::Duration::milliseconds(1);
        assert!(!is_persistable(&beyond));
        assert!(parse_iso8601(&to_iso8601(&beyond)).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_iso8601("yesterday").is_err());
    }
}
