//! Static `GeoJSON` URL fetcher.
//!
//! Fetches a standard `GeoJSON` `FeatureCollection` from any URL that
//! serves it directly.

use geojson::FeatureCollection;

use crate::DatasetError;

/// Fetches the `FeatureCollection` served at `url`.
///
/// # Errors
///
/// Returns [`DatasetError`] if the request fails, the server responds with
/// a non-success status, or the response cannot be parsed.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<FeatureCollection, DatasetError> {
    log::debug!("GET {url}");

    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(DatasetError::Conversion {
            message: format!("GeoJSON request to {url} failed with status {}", resp.status()),
        });
    }
    let body = resp.text().await?;

    super::parse_feature_collection(&body, url)
}
