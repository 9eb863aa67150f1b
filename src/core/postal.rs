use crate::domain::model::PostalArea;
use crate::domain::ports::PostalDirectory;
use crate::utils::error::{GeoChronError, Result};
use crate::utils::validation::validate_pincode;

/// Validates a pincode locally, then asks the postal directory for its areas.
pub struct PostalCodeResolver<D: PostalDirectory> {
    directory: D,
}

impl<D: PostalDirectory> PostalCodeResolver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub async fn resolve(&self, pincode: &str) -> Result<Vec<PostalArea>> {
        // 格式錯誤直接回報，不碰網路
        validate_pincode(pincode)?;

        tracing::debug!("📮 Looking up postal areas for {}", pincode);
        let areas = self.directory.lookup(pincode).await?;

        if areas.is_empty() {
            return Err(GeoChronError::NotFoundError {
                pincode: pincode.to_string(),
            });
        }

        tracing::info!("📮 Found {} postal area(s) for {}", areas.len(), pincode);
        Ok(areas)
    }
}
