use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub use web_time::Instant as AppInstant;

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const MONTH_FORMAT: &str = "%Y-%m";

    /// Formats accepted for CSV date columns, most specific first.
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    /// Parse the date/time shapes found in exported CSV files (`2018-04-03 12:01:00`,
    /// ISO `T` separator, or a bare date which maps to midnight).
    pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Self::DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, Self::STANDARD_DATE_FORMAT)
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
    }

    /// Epoch seconds (possibly fractional) to a naive UTC timestamp.
    /// Non-finite or out-of-range input yields None.
    pub fn from_epoch_secs(secs: f64) -> Option<NaiveDateTime> {
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
            return None;
        }
        let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
        chrono::DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
    }

    pub fn date_string(dt: &NaiveDateTime) -> String {
        dt.format(Self::STANDARD_DATE_FORMAT).to_string()
    }
}
