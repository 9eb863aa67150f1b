use crate::utils::error::{GeoChronError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Exactly six ASCII digits, nothing else.
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_pincode(pincode: &str) -> Result<()> {
    if pincode.is_empty() {
        return Err(GeoChronError::validation("Please enter a pincode"));
    }
    if !is_valid_pincode(pincode) {
        return Err(GeoChronError::validation(format!(
            "Please enter a valid 6-digit pincode (got '{}')",
            pincode
        )));
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GeoChronError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GeoChronError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GeoChronError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_config(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GeoChronError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_config_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GeoChronError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GeoChronError::validation(format!(
            "Please fill the {} field",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GeoChronError::validation(format!(
            "{} must be between {} and {} (got {})",
            field_name, min, max, value
        )));
    }
    Ok(())
}
