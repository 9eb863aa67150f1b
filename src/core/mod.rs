pub mod civil_time;
pub mod engine;
pub mod geocoding;
pub mod pipeline;
pub mod postal;
pub mod solar_time;

pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
