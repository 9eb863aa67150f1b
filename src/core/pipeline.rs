use crate::adapters::http::build_client;
use crate::adapters::india_post::IndiaPostClient;
use crate::adapters::nominatim::NominatimSearch;
use crate::adapters::photon::PhotonSearch;
use crate::core::civil_time::to_utc;
use crate::core::geocoding::GeocodingResolver;
use crate::core::postal::PostalCodeResolver;
use crate::core::solar_time::{format_hms, solar_time};
use crate::core::{ConfigProvider, Pipeline};
use crate::domain::model::{
    CivilDateTime, Coordinate, GeoQuery, PostalArea, Resolution, SolarReading, UtcOffset,
};
use crate::domain::ports::{GeocoderKind, PlaceSearch, PostalDirectory};
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct GeoChronPipeline<D: PostalDirectory, P: PlaceSearch> {
    postal: PostalCodeResolver<D>,
    geocoder: GeocodingResolver<P>,
    offset: UtcOffset,
}

/// Pipeline wired to the real HTTP services.
pub type HttpPipeline = GeoChronPipeline<IndiaPostClient, Box<dyn PlaceSearch>>;

impl<D: PostalDirectory, P: PlaceSearch> GeoChronPipeline<D, P> {
    pub fn new(
        postal: PostalCodeResolver<D>,
        geocoder: GeocodingResolver<P>,
        offset: UtcOffset,
    ) -> Self {
        Self {
            postal,
            geocoder,
            offset,
        }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl HttpPipeline {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = build_client(config.user_agent(), config.request_timeout())?;

        let search: Box<dyn PlaceSearch> = match config.geocoder() {
            GeocoderKind::Nominatim => Box::new(NominatimSearch::new(
                client.clone(),
                config.geocoder_endpoint(),
            )),
            GeocoderKind::Photon => Box::new(PhotonSearch::new(
                client.clone(),
                config.geocoder_endpoint(),
            )),
        };
        tracing::debug!(
            "Using {:?} geocoder at {}",
            config.geocoder(),
            config.geocoder_endpoint()
        );

        Ok(Self::new(
            PostalCodeResolver::new(IndiaPostClient::new(client, config.postal_endpoint())),
            GeocodingResolver::new(search, config.throttle(), config.country()),
            config.utc_offset(),
        ))
    }
}

#[async_trait]
impl<D: PostalDirectory, P: PlaceSearch> Pipeline for GeoChronPipeline<D, P> {
    async fn resolve_areas(&self, pincode: &str) -> Result<Vec<PostalArea>> {
        self.postal.resolve(pincode).await
    }

    async fn locate(&self, query: &GeoQuery) -> Result<Resolution> {
        self.geocoder.resolve(query).await
    }

    fn compute(&self, when: &CivilDateTime, coordinate: Coordinate) -> Result<SolarReading> {
        let utc = to_utc(when, self.offset)?;
        let solar_hours = solar_time(&utc, coordinate.longitude());
        Ok(SolarReading {
            utc,
            solar_hours,
            formatted: format_hms(solar_hours),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Candidate;
    use std::time::Duration;

    struct NoDirectory;

    #[async_trait]
    impl PostalDirectory for NoDirectory {
        async fn lookup(&self, _pincode: &str) -> Result<Vec<PostalArea>> {
            Ok(vec![])
        }
    }

    struct NoSearch;

    #[async_trait]
    impl PlaceSearch for NoSearch {
        async fn search(&self, _query: &str) -> Result<Vec<Candidate>> {
            Ok(vec![])
        }
    }

    fn pipeline() -> GeoChronPipeline<NoDirectory, NoSearch> {
        GeoChronPipeline::new(
            PostalCodeResolver::new(NoDirectory),
            GeocodingResolver::new(NoSearch, Duration::from_millis(500), "India"),
            UtcOffset::IST,
        )
    }

    #[test]
    fn test_compute_worked_example() {
        let when = CivilDateTime::parse("2024-06-15", "12:00:00").unwrap();
        let coordinate = Coordinate::new(28.6139, 77.2090).unwrap();

        let reading = pipeline().compute(&when, coordinate).unwrap();

        assert_eq!(reading.utc.to_rfc3339(), "2024-06-15T06:30:00+00:00");
        assert!((reading.solar_hours - 11.6473).abs() < 1e-4);
        assert_eq!(reading.formatted, "11:38:50");
    }

    #[test]
    fn test_compute_is_repeatable() {
        let when = CivilDateTime::parse("2024-01-01", "02:15:00").unwrap();
        let coordinate = Coordinate::new(8.5241, 76.9366).unwrap();
        let p = pipeline();

        assert_eq!(
            p.compute(&when, coordinate).unwrap(),
            p.compute(&when, coordinate).unwrap()
        );
    }
}
