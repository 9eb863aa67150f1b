#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::adapters::nominatim::DEFAULT_NOMINATIM_ENDPOINT;
use crate::adapters::photon::DEFAULT_PHOTON_ENDPOINT;
use crate::core::geocoding::DEFAULT_THROTTLE;
use crate::domain::ports::{ConfigProvider, GeocoderKind};
use crate::utils::error::{GeoChronError, Result};
use crate::utils::validation::{validate_config_range, validate_non_empty_config, validate_url};

pub const DEFAULT_COUNTRY: &str = "India";
pub const DEFAULT_THROTTLE_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_COORDINATE_PRECISION: usize = 4;

pub fn default_geocoder_endpoint(kind: GeocoderKind) -> &'static str {
    match kind {
        GeocoderKind::Nominatim => DEFAULT_NOMINATIM_ENDPOINT,
        GeocoderKind::Photon => DEFAULT_PHOTON_ENDPOINT,
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("services.postal_endpoint", config.postal_endpoint())?;
    validate_url("services.geocoder_endpoint", config.geocoder_endpoint())?;
    validate_non_empty_config("services.user_agent", config.user_agent())?;
    validate_non_empty_config("geocoding.country", config.country())?;
    if config.throttle() < DEFAULT_THROTTLE {
        return Err(GeoChronError::InvalidConfigValueError {
            field: "geocoding.throttle_ms".to_string(),
            value: config.throttle().as_millis().to_string(),
            reason: format!(
                "Public geocoding services need at least {}ms between queries",
                DEFAULT_THROTTLE.as_millis()
            ),
        });
    }

    let offset = config.utc_offset();
    validate_config_range("time.offset_hours", offset.hours, -14, 14)?;
    validate_config_range("time.offset_minutes", offset.minutes, -59, 59)?;
    validate_config_range("display.zoom", config.zoom(), 0, 19)?;
    validate_config_range("display.coordinate_precision", config.coordinate_precision(), 0, 10)?;
    Ok(())
}
