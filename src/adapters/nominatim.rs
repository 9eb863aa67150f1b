use crate::adapters::http::{endpoint, get_json};
use crate::domain::model::{Candidate, Coordinate};
use crate::domain::ports::PlaceSearch;
use crate::utils::error::{GeoChronError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Nominatim sends coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn into_candidate(self) -> Result<Candidate> {
        let lat: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| GeoChronError::network(format!("bad latitude '{}'", self.lat)))?;
        let lon: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| GeoChronError::network(format!("bad longitude '{}'", self.lon)))?;
        let coordinate =
            Coordinate::new(lat, lon).map_err(|e| GeoChronError::network(e.to_string()))?;
        Ok(Candidate {
            coordinate,
            display_name: self.display_name,
        })
    }
}

pub struct NominatimSearch {
    client: Client,
    base_url: String,
}

impl NominatimSearch {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PlaceSearch for NominatimSearch {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let url = endpoint(&self.base_url, "search");
        let request = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", query), ("limit", "1")]);

        let places: Vec<NominatimPlace> = get_json(request).await?;
        // 只取第一筆，後面的紀錄不影響結果
        let first = places
            .into_iter()
            .next()
            .map(NominatimPlace::into_candidate)
            .transpose()?;
        Ok(first.into_iter().collect())
    }
}
