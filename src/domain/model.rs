use crate::utils::error::{GeoChronError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// 郵局目錄服務回傳的一個地區
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostalArea {
    pub office_name: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
}

impl PostalArea {
    /// 下拉選單上顯示的文字
    pub fn label(&self) -> String {
        format!("{} - {}", self.office_name, self.district)
    }
}

/// A latitude/longitude pair. Only constructible with finite, in-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoChronError::validation(format!(
                "latitude out of range: {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoChronError::validation(format!(
                "longitude out of range: {}",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn display(&self, precision: usize) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.latitude,
            self.longitude,
            prec = precision
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(4))
    }
}

/// A wall-clock date and time with no offset attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Fixed civil offset from UTC. Both fields carry the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset {
    pub hours: i32,
    pub minutes: i32,
}

impl UtcOffset {
    /// Indian Standard Time, UTC+05:30.
    pub const IST: UtcOffset = UtcOffset {
        hours: 5,
        minutes: 30,
    };
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::IST
    }
}

/// What the geocoder is asked to find.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoQuery {
    Area(PostalArea),
    Place(String),
}

impl GeoQuery {
    /// 由最精確到最粗略的查詢字串
    pub fn tiers(&self, country: &str) -> Vec<String> {
        match self {
            GeoQuery::Area(area) => vec![
                format!(
                    "{}, {}, {}, {}",
                    area.office_name, area.district, area.state, country
                ),
                format!("{}, {}, {}", area.district, area.state, country),
                format!("{}, {}", area.pincode, country),
            ],
            GeoQuery::Place(place) => vec![place.clone()],
        }
    }

    pub fn describe(&self) -> String {
        match self {
            GeoQuery::Area(area) => format!("{} ({})", area.label(), area.pincode),
            GeoQuery::Place(place) => place.clone(),
        }
    }
}

/// One hit from a place-search provider, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TierFailure {
    NoResult,
    Failed(String),
}

impl fmt::Display for TierFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierFailure::NoResult => f.write_str("no result"),
            TierFailure::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierAttempt {
    pub tier: usize,
    pub query: String,
    pub outcome: std::result::Result<Coordinate, TierFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
    pub tier: usize,
    pub attempts: Vec<TierAttempt>,
}

/// Result of the time computation for one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarReading {
    pub utc: DateTime<Utc>,
    pub solar_hours: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoChronReport {
    pub area: Option<PostalArea>,
    pub label: String,
    pub coordinate: Coordinate,
    pub tier: usize,
    pub utc: DateTime<Utc>,
    pub solar_hours: f64,
    pub solar_time: String,
}
