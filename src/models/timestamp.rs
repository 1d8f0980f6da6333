//! Normalization for backend `created_at` values.
//!
//! The backend may emit datetimes without a zone designator. Those are
//! UTC; parsing them as local time would skew every relative age by the
//! viewer's offset. RFC 3339 with an explicit offset is the preferred
//! wire format — this module is a compatibility shim for the rest.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a wire timestamp into UTC. Returns `None` for unparsable input
/// rather than guessing.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // Space-separated datetimes: retry in RFC 3339 form so explicit
    // offsets and trailing Z still parse.
    if raw.contains(' ') {
        let iso = raw.replacen(' ', "T", 1);
        if let Ok(dt) = DateTime::parse_from_rfc3339(&iso) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // No zone designator at all: the backend means UTC.
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────
