use crate::core::Pipeline;
use crate::domain::model::{CivilDateTime, GeoChronReport, GeoQuery};
use crate::domain::ports::{AreaSelector, MapView};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

pub const DEFAULT_MARKER_ZOOM: u8 = 7;

/// Where to look: a pincode (goes through the postal directory) or a free-text place.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Pincode(String),
    Place(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub when: CivilDateTime,
    pub target: Target,
}

impl LookupRequest {
    pub fn new(date: &str, time: &str, target: Target) -> Result<Self> {
        let request = Self {
            when: CivilDateTime::parse(date, time)?,
            target,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        self.when.validate()?;
        match &self.target {
            // 郵遞區號格式由 PostalCodeResolver 在連網前檢查
            Target::Pincode(_) => Ok(()),
            Target::Place(place) => validate_non_empty_string("place", place),
        }
    }
}

/// Runs one lookup end to end and keeps the map view between runs.
pub struct GeoChronEngine<P: Pipeline, V: MapView> {
    pipeline: P,
    view: V,
    zoom: u8,
}

impl<P: Pipeline, V: MapView> GeoChronEngine<P, V> {
    pub fn new(pipeline: P, view: V) -> Self {
        Self {
            pipeline,
            view,
            zoom: DEFAULT_MARKER_ZOOM,
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Run one lookup. A failed run clears the view so no stale marker is
    /// left next to the error.
    pub async fn run<S: AreaSelector + ?Sized>(
        &mut self,
        request: &LookupRequest,
        selector: &S,
    ) -> Result<GeoChronReport> {
        match self.execute(request, selector).await {
            Ok(report) => Ok(report),
            Err(e) => {
                self.view.reset();
                Err(e)
            }
        }
    }

    async fn execute<S: AreaSelector + ?Sized>(
        &mut self,
        request: &LookupRequest,
        selector: &S,
    ) -> Result<GeoChronReport> {
        request.validate()?;

        let (query, area) = match &request.target {
            Target::Pincode(pincode) => {
                tracing::info!("🔍 Resolving postal areas for {}", pincode);
                let areas = self.pipeline.resolve_areas(pincode).await?;
                let area = selector.select(&areas)?;
                tracing::info!("📍 Selected area: {}", area.label());
                (GeoQuery::Area(area.clone()), Some(area))
            }
            Target::Place(place) => (GeoQuery::Place(place.clone()), None),
        };

        let resolution = self.pipeline.locate(&query).await?;
        let reading = self.pipeline.compute(&request.when, resolution.coordinate)?;

        let label = match (&area, &request.target) {
            (Some(area), _) => area.office_name.clone(),
            (None, Target::Place(place)) => resolution
                .display_name
                .clone()
                .unwrap_or_else(|| place.clone()),
            (None, Target::Pincode(pincode)) => pincode.clone(),
        };

        self.view.set_marker(resolution.coordinate, &label);
        self.view.recenter(resolution.coordinate, self.zoom);

        tracing::info!(
            "☀️ Solar time at {} ({}): {}",
            label,
            resolution.coordinate,
            reading.formatted
        );

        Ok(GeoChronReport {
            area,
            label,
            coordinate: resolution.coordinate,
            tier: resolution.tier,
            utc: reading.utc,
            solar_hours: reading.solar_hours,
            solar_time: reading.formatted,
        })
    }
}
