use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::adapters::india_post::DEFAULT_POSTAL_ENDPOINT;
use crate::config::{
    default_geocoder_endpoint, validate_provider, DEFAULT_COORDINATE_PRECISION, DEFAULT_COUNTRY,
    DEFAULT_THROTTLE_MS, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::engine::DEFAULT_MARKER_ZOOM;
use crate::domain::model::UtcOffset;
use crate::domain::ports::{ConfigProvider, GeocoderKind};
use crate::utils::error::{GeoChronError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub postal_endpoint: Option<String>,
    pub geocoder: Option<GeocoderKind>,
    pub geocoder_endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub throttle_ms: Option<u64>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeConfig {
    pub offset_hours: Option<i32>,
    pub offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub zoom: Option<u8>,
    pub coordinate_precision: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| GeoChronError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${GEOCHRON_USER_AGENT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| GeoChronError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&mut self, geocoder: Option<GeocoderKind>, throttle_ms: Option<u64>) {
        if let Some(kind) = geocoder {
            if self.services.geocoder != Some(kind) {
                // 換了供應商就不能沿用原本的端點
                self.services.geocoder_endpoint = None;
            }
            self.services.geocoder = Some(kind);
            tracing::info!("🔧 Geocoder overridden to: {:?}", kind);
        }
        if let Some(ms) = throttle_ms {
            self.geocoding.throttle_ms = Some(ms);
            tracing::info!("🔧 Throttle overridden to: {}ms", ms);
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn postal_endpoint(&self) -> &str {
        self.services
            .postal_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_POSTAL_ENDPOINT)
    }

    fn geocoder(&self) -> GeocoderKind {
        self.services.geocoder.unwrap_or(GeocoderKind::Nominatim)
    }

    fn geocoder_endpoint(&self) -> &str {
        match self.services.geocoder_endpoint.as_deref() {
            Some(endpoint) => endpoint,
            None => default_geocoder_endpoint(self.geocoder()),
        }
    }

    fn country(&self) -> &str {
        self.geocoding.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }

    fn throttle(&self) -> Duration {
        Duration::from_millis(self.geocoding.throttle_ms.unwrap_or(DEFAULT_THROTTLE_MS))
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.services
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    fn user_agent(&self) -> &str {
        self.services
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    fn utc_offset(&self) -> UtcOffset {
        UtcOffset {
            hours: self.time.offset_hours.unwrap_or(UtcOffset::IST.hours),
            minutes: self.time.offset_minutes.unwrap_or(UtcOffset::IST.minutes),
        }
    }

    fn zoom(&self) -> u8 {
        self.display.zoom.unwrap_or(DEFAULT_MARKER_ZOOM)
    }

    fn coordinate_precision(&self) -> usize {
        self.display
            .coordinate_precision
            .unwrap_or(DEFAULT_COORDINATE_PRECISION)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
