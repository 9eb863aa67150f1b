use crate::domain::model::{
    Candidate, CivilDateTime, Coordinate, GeoQuery, PostalArea, Resolution, SolarReading,
    UtcOffset,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Postal directory lookup by pincode. Implementations do not validate the code.
#[async_trait]
pub trait PostalDirectory: Send + Sync {
    async fn lookup(&self, pincode: &str) -> Result<Vec<PostalArea>>;
}

/// Free-text place search. Returns candidates in provider order.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>>;
}

#[async_trait]
impl<T: PlaceSearch + ?Sized> PlaceSearch for Box<T> {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        (**self).search(query).await
    }
}

/// 使用者從多個郵政地區中挑選一個（阻塞式，無逾時）
pub trait AreaSelector {
    fn select(&self, areas: &[PostalArea]) -> Result<PostalArea>;
}

/// Rendering collaborator: one marker, one view.
pub trait MapView {
    fn set_marker(&mut self, coordinate: Coordinate, label: &str);
    fn recenter(&mut self, coordinate: Coordinate, zoom: u8);
    /// Clear the marker and return to the default view.
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum GeocoderKind {
    Nominatim,
    Photon,
}

pub trait ConfigProvider: Send + Sync {
    fn postal_endpoint(&self) -> &str;
    fn geocoder(&self) -> GeocoderKind;
    fn geocoder_endpoint(&self) -> &str;
    fn country(&self) -> &str;
    fn throttle(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn utc_offset(&self) -> UtcOffset;
    fn zoom(&self) -> u8;
    fn coordinate_precision(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn resolve_areas(&self, pincode: &str) -> Result<Vec<PostalArea>>;
    async fn locate(&self, query: &GeoQuery) -> Result<Resolution>;
    fn compute(&self, when: &CivilDateTime, coordinate: Coordinate) -> Result<SolarReading>;
}
