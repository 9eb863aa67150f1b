use crate::utils::error::{GeoChronError, Result};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("geochron/", env!("CARGO_PKG_VERSION"));

/// Shared client for every outbound service call.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| GeoChronError::config(format!("failed to build HTTP client: {}", e)))
}

/// Join a base URL and a path without doubling or dropping the slash.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// GET a URL and decode the JSON body; non-2xx becomes a network error.
pub async fn get_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if !status.is_success() {
        return Err(GeoChronError::network(format!(
            "service responded with HTTP {}",
            status
        )));
    }

    Ok(response.json::<T>().await?)
}
