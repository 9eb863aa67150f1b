use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::adapters::india_post::DEFAULT_POSTAL_ENDPOINT;
use crate::config::{
    default_geocoder_endpoint, validate_provider, DEFAULT_COORDINATE_PRECISION, DEFAULT_COUNTRY,
    DEFAULT_THROTTLE_MS, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::engine::{Target, DEFAULT_MARKER_ZOOM};
use crate::domain::model::UtcOffset;
use crate::domain::ports::{ConfigProvider, GeocoderKind};
use crate::utils::error::{GeoChronError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "geochron")]
#[command(about = "Local mean solar time for an Indian pincode or place")]
pub struct CliConfig {
    /// Civil date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Civil time, HH:MM or HH:MM:SS
    #[arg(long)]
    pub time: String,

    /// 6-digit Indian pincode
    #[arg(long, conflicts_with = "place", required_unless_present = "place")]
    pub pincode: Option<String>,

    /// Free-text place to geocode directly, skipping the postal lookup
    #[arg(long)]
    pub place: Option<String>,

    /// 1-based position of the postal area to use; prompts when omitted
    #[arg(long, requires = "pincode")]
    pub area: Option<usize>,

    /// TOML configuration file; service settings below are ignored when given
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_POSTAL_ENDPOINT)]
    pub postal_endpoint: String,

    #[arg(long, value_enum)]
    pub geocoder: Option<GeocoderKind>,

    #[arg(long)]
    pub geocoder_endpoint: Option<String>,

    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Delay between geocoding fallback queries
    #[arg(long)]
    pub throttle_ms: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, default_value_t = UtcOffset::IST.hours, allow_hyphen_values = true)]
    pub offset_hours: i32,

    #[arg(long, default_value_t = UtcOffset::IST.minutes, allow_hyphen_values = true)]
    pub offset_minutes: i32,

    #[arg(long, default_value_t = DEFAULT_MARKER_ZOOM)]
    pub zoom: u8,

    #[arg(long, default_value_t = DEFAULT_COORDINATE_PRECISION)]
    pub precision: usize,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn target(&self) -> Result<Target> {
        match (&self.pincode, &self.place) {
            (Some(pincode), None) => Ok(Target::Pincode(pincode.clone())),
            (None, Some(place)) => Ok(Target::Place(place.clone())),
            _ => Err(GeoChronError::validation(
                "Please provide either a pincode or a place",
            )),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn postal_endpoint(&self) -> &str {
        &self.postal_endpoint
    }

    fn geocoder(&self) -> GeocoderKind {
        self.geocoder.unwrap_or(GeocoderKind::Nominatim)
    }

    fn geocoder_endpoint(&self) -> &str {
        match self.geocoder_endpoint.as_deref() {
            Some(endpoint) => endpoint,
            None => default_geocoder_endpoint(self.geocoder()),
        }
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms.unwrap_or(DEFAULT_THROTTLE_MS))
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn utc_offset(&self) -> UtcOffset {
        UtcOffset {
            hours: self.offset_hours,
            minutes: self.offset_minutes,
        }
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn coordinate_precision(&self) -> usize {
        self.precision
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
