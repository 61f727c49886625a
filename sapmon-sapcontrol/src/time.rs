//! sapcontrol time and duration formats.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Layout of `starttime` and alert `Time` cells, e.g. `2026 10 16 08:00:00`.
pub const SAP_TIME_FORMAT: &str = "%Y %m %d %H:%M:%S";

/// Parse a sapcontrol timestamp. sapcontrol does not print a zone; the
/// value is taken as UTC.
pub fn parse_sap_time(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), SAP_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse an `elapsedtime` cell (`H:MM:SS` or `MM:SS`) into seconds.
///
/// The hour part is not limited to 24.
pub fn parse_elapsed(s: &str) -> Option<f64> {
    let parts = s
        .trim()
        .split(':')
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let seconds = match parts.as_slice() {
        [h, m, s] if *m < 60 && *s < 60 => h.checked_mul(3600)?.checked_add(m * 60 + s)?,
        [m, s] if *s < 60 => m.checked_mul(60)?.checked_add(*s)?,
        _ => return None,
    };
    Some(seconds as f64)
}
