//! Local mean solar time: `UTC + longitude / 15`, no equation-of-time term.

use chrono::{DateTime, Timelike, Utc};

/// Decimal hours of UTC time-of-day.
pub fn utc_hours(instant: &DateTime<Utc>) -> f64 {
    f64::from(instant.hour())
        + f64::from(instant.minute()) / 60.0
        + f64::from(instant.second()) / 3600.0
}

/// Solar time in decimal hours, in `[0, 24)`.
///
/// A single wraparound step is enough while `longitude` stays in
/// `[-180, 180]`: the raw value is then within `[-12, 36)`.
pub fn solar_time(instant: &DateTime<Utc>, longitude: f64) -> f64 {
    debug_assert!((-180.0..=180.0).contains(&longitude));

    let mut local = utc_hours(instant) + longitude / 15.0;
    if local < 0.0 {
        local += 24.0;
    }
    if local >= 24.0 {
        local -= 24.0;
    }
    local
}

/// Render decimal hours as `HH:MM:SS`. Every field is floored, never rounded.
pub fn format_hms(decimal_hours: f64) -> String {
    let h = decimal_hours.floor();
    let minutes = (decimal_hours - h) * 60.0;
    let m = minutes.floor();
    let s = ((minutes - m) * 60.0).floor();

    format!("{:02}:{:02}:{:02}", h as i64, m as i64, s as i64)
}
