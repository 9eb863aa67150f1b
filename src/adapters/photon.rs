use crate::adapters::http::{endpoint, get_json};
use crate::domain::model::{Candidate, Coordinate};
use crate::domain::ports::PlaceSearch;
use crate::utils::error::{GeoChronError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_PHOTON_ENDPOINT: &str = "https://photon.komoot.io";

/// Photon answers with a GeoJSON FeatureCollection.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    // GeoJSON order: [lon, lat]
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    name: Option<String>,
}

impl Feature {
    fn into_candidate(self) -> Result<Candidate> {
        let (lon, lat) = match self.geometry.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            other => {
                return Err(GeoChronError::network(format!(
                    "feature geometry has {} coordinate(s), expected 2",
                    other.len()
                )))
            }
        };
        let coordinate =
            Coordinate::new(lat, lon).map_err(|e| GeoChronError::network(e.to_string()))?;
        Ok(Candidate {
            coordinate,
            display_name: self.properties.name,
        })
    }
}

pub struct PhotonSearch {
    client: Client,
    base_url: String,
}

impl PhotonSearch {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PlaceSearch for PhotonSearch {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let url = endpoint(&self.base_url, "api/");
        let request = self.client.get(&url).query(&[("q", query), ("limit", "1")]);

        let collection: FeatureCollection = get_json(request).await?;
        let first = collection
            .features
            .into_iter()
            .next()
            .map(Feature::into_candidate)
            .transpose()?;
        Ok(first.into_iter().collect())
    }
}
