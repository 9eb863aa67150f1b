pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::view::ViewState;
pub use crate::core::{
    engine::{GeoChronEngine, LookupRequest, Target},
    pipeline::{GeoChronPipeline, HttpPipeline},
};
pub use domain::model::{CivilDateTime, Coordinate, GeoChronReport, PostalArea, UtcOffset};
pub use utils::error::{GeoChronError, Result};
