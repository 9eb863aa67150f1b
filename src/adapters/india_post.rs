//! India Post pincode directory (`api.postalpincode.in`).
//!
//! `GET /pincode/{code}` returns a one-element array:
//! `[{"Status": "Success", "PostOffice": [{"Name", "District", "State", ...}]}]`.
//! Unknown codes come back with `Status: "Error"` and a null `PostOffice`.

use crate::adapters::http::{endpoint, get_json};
use crate::domain::model::PostalArea;
use crate::domain::ports::PostalDirectory;
use crate::utils::error::{GeoChronError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_POSTAL_ENDPOINT: &str = "https://api.postalpincode.in";

#[derive(Debug, Deserialize)]
struct PincodeResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice", default)]
    post_office: Option<Vec<PostOffice>>,
}

#[derive(Debug, Deserialize)]
struct PostOffice {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
}

pub struct IndiaPostClient {
    client: Client,
    base_url: String,
}

impl IndiaPostClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PostalDirectory for IndiaPostClient {
    async fn lookup(&self, pincode: &str) -> Result<Vec<PostalArea>> {
        let url = endpoint(&self.base_url, &format!("pincode/{}", pincode));
        tracing::debug!("Making API request to: {}", url);

        let body: Vec<PincodeResponse> = get_json(self.client.get(&url)).await?;
        let first = body
            .into_iter()
            .next()
            .ok_or_else(|| GeoChronError::network("postal service returned an empty array"))?;

        if first.status != "Success" {
            tracing::debug!("Postal service status for {}: {}", pincode, first.status);
            return Err(GeoChronError::NotFoundError {
                pincode: pincode.to_string(),
            });
        }

        let offices = first.post_office.unwrap_or_default();
        Ok(offices
            .into_iter()
            .map(|po| PostalArea {
                office_name: po.name,
                district: po.district,
                state: po.state,
                pincode: pincode.to_string(),
            })
            .collect())
    }
}
