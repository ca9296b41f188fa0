use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

// ── DateProcessor ─────────────────────────────────────────────────────────────

/// Parses admission dates from the variety of formats found in exported CSVs.
pub struct DateProcessor;

impl DateProcessor {
    /// Attempt to parse `s` into a calendar date.
    ///
    /// Handles:
    /// * plain dates: `2024-01-31`, `2024/01/31`, `01/31/2024`
    /// * naive date-times (`T` or space separated, optional fractional
    ///   seconds); the time of day is discarded
    /// * RFC 3339 with an offset; the date is taken as written
    ///
    /// Returns `None` for empty or unrecognised input.
    pub fn parse(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(date);
            }
        }

        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%m/%d/%Y %H:%M:%S",
        ];
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt.date());
            }
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }

        debug!("DateProcessor: could not parse date string \"{}\"", s);
        None
    }
}

// ── NumericProcessor ──────────────────────────────────────────────────────────

/// Lenient numeric coercion for CSV cells.
pub struct NumericProcessor;

impl NumericProcessor {
    /// Parse a decimal amount.  Non-numeric and non-finite values yield `None`.
    pub fn parse_amount(s: &str) -> Option<f64> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                debug!("NumericProcessor: \"{}\" is not a finite number", s);
                None
            }
        }
    }

    /// Parse a non-negative whole age.  `"34.0"` is accepted and truncated;
    /// negative or non-numeric values yield `None`.
    pub fn parse_age(s: &str) -> Option<u32> {
        let s = s.trim();
        if let Ok(v) = s.parse::<u32>() {
            return Some(v);
        }
        let v = Self::parse_amount(s)?;
        if v < 0.0 || v > u32::MAX as f64 {
            return None;
        }
        Some(v.trunc() as u32)
    }
}
