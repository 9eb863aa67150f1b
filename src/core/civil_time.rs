//! Civil date/time parsing and fixed-offset normalization to UTC.
//!
//! The offset is subtracted from the raw fields first and the UTC value is
//! built afterwards, so out-of-range fields (a negative hour after removing
//! +05:30, a day past the end of the month) borrow and carry across the
//! calendar. Nothing here consults the host timezone.

use crate::domain::model::{CivilDateTime, UtcOffset};
use crate::utils::error::{GeoChronError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

impl CivilDateTime {
    /// Parse `YYYY-MM-DD` and `HH:MM[:SS]`. Seconds default to 0.
    pub fn parse(date: &str, time: &str) -> Result<Self> {
        validate_non_empty_string("date", date)?;
        validate_non_empty_string("time", time)?;

        let date_parts: Vec<&str> = date.trim().split('-').collect();
        if date_parts.len() != 3 {
            return Err(GeoChronError::validation(format!(
                "Invalid date '{}', expected YYYY-MM-DD",
                date
            )));
        }
        let year: i32 = parse_field("year", date_parts[0])?;
        let month: u32 = parse_field("month", date_parts[1])?;
        let day: u32 = parse_field("day", date_parts[2])?;

        let time_parts: Vec<&str> = time.trim().split(':').collect();
        if !(2..=3).contains(&time_parts.len()) {
            return Err(GeoChronError::validation(format!(
                "Invalid time '{}', expected HH:MM or HH:MM:SS",
                time
            )));
        }
        let hour: u32 = parse_field("hour", time_parts[0])?;
        let minute: u32 = parse_field("minute", time_parts[1])?;
        let second: u32 = match time_parts.get(2) {
            Some(s) => parse_field("second", s)?,
            None => 0,
        };

        let civil = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        civil.validate()?;
        Ok(civil)
    }

    pub fn validate(&self) -> Result<()> {
        validate_range("month", self.month, 1, 12)?;
        validate_range("day", self.day, 1, 31)?;
        validate_range("hour", self.hour, 0, 23)?;
        validate_range("minute", self.minute, 0, 59)?;
        validate_range("second", self.second, 0, 59)?;
        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(GeoChronError::validation(format!(
            "Invalid {} '{}'",
            name, raw
        )));
    }
    raw.parse::<T>()
        .map_err(|_| GeoChronError::validation(format!("Invalid {} '{}'", name, raw)))
}

/// Convert a civil date/time observed at `offset` into a UTC instant.
pub fn to_utc(civil: &CivilDateTime, offset: UtcOffset) -> Result<DateTime<Utc>> {
    let month_start = NaiveDate::from_ymd_opt(civil.year, civil.month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            GeoChronError::validation(format!(
                "Invalid calendar month {}-{:02}",
                civil.year, civil.month
            ))
        })?;

    // 先減去時差再建構 UTC，溢位交給日曆進位/借位
    let shift = TimeDelta::days(i64::from(civil.day) - 1)
        + TimeDelta::hours(i64::from(civil.hour) - i64::from(offset.hours))
        + TimeDelta::minutes(i64::from(civil.minute) - i64::from(offset.minutes))
        + TimeDelta::seconds(i64::from(civil.second));

    month_start
        .checked_add_signed(shift)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| GeoChronError::validation("Date is outside the supported range"))
}

/// Parse and normalize in one step.
pub fn parse_to_utc(date: &str, time: &str, offset: UtcOffset) -> Result<DateTime<Utc>> {
    let civil = CivilDateTime::parse(date, time)?;
    to_utc(&civil, offset)
}
