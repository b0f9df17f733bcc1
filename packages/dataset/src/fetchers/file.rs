//! Local `GeoJSON` file reader.

use std::path::Path;

use geojson::FeatureCollection;

use crate::DatasetError;

/// Reads the `FeatureCollection` stored at `path`.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or parsed.
pub async fn read(path: &Path) -> Result<FeatureCollection, DatasetError> {
    log::debug!("Reading {}", path.display());

    let body = tokio::fs::read_to_string(path).await?;
    super::parse_feature_collection(&body, &path.display().to_string())
}
