//! UTC timestamp helpers shared by the audit block, history, and snapshots.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp format stored in the collection file (second resolution, UTC)
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Snapshot file stem format
const SNAPSHOT_FORMAT: &str = "%Y%m%d%H%M%S";

/// Current time formatted with [`ISO_FORMAT`]
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

pub fn format_iso(at: DateTime<Utc>) -> String {
    at.format(ISO_FORMAT).to_string()
}

/// Parse a timestamp written by [`now_iso`]
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, ISO_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Current time as a snapshot file stem, e.g. `20240101093000`
pub fn snapshot_stamp() -> String {
    Utc::now().format(SNAPSHOT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_iso() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_iso(at), "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_parse_iso_round_trip() {
        let now = now_iso();
        let parsed = parse_iso(&now).unwrap();
        assert_eq!(format_iso(parsed), now);
    }

    #[test]
    fn test_parse_iso_rejects_rfc3339_offsets() {
        assert!(parse_iso("2024-01-02T03:04:05+02:00").is_none());
        assert!(parse_iso("not a date").is_none());
    }

    #[test]
    fn test_snapshot_stamp_shape() {
        let stamp = snapshot_stamp();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}
