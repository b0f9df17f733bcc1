//! Fetcher dispatch for dataset locations.
//!
//! A dataset location is either an absolute URL, fetched with HTTP GET,
//! or a file name joined onto the data base location. The base may itself
//! be a URL (static hosting) or a local directory.

pub mod file;
pub mod geojson_url;

use std::path::{Path, PathBuf};

use geojson::{FeatureCollection, GeoJson};

use crate::DatasetError;

/// Where a dataset's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Fetched with HTTP GET.
    Url(String),
    /// Read from the local filesystem.
    File(PathBuf),
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Resolves a dataset `location` against the data `base`.
#[must_use]
pub fn resolve(base: &str, location: &str) -> Location {
    if is_url(location) {
        Location::Url(location.to_string())
    } else if is_url(base) {
        Location::Url(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            location.trim_start_matches('/')
        ))
    } else {
        Location::File(Path::new(base).join(location))
    }
}

/// Fetches and parses the `FeatureCollection` at `location`.
///
/// # Errors
///
/// Returns [`DatasetError`] if the request or read fails, or the body is
/// not a `GeoJSON` `FeatureCollection`.
pub async fn fetch_collection(
    client: &reqwest::Client,
    location: &Location,
) -> Result<FeatureCollection, DatasetError> {
    match location {
        Location::Url(url) => geojson_url::fetch(client, url).await,
        Location::File(path) => file::read(path).await,
    }
}

/// Parses a response body as a `FeatureCollection`.
///
/// # Errors
///
/// Returns [`DatasetError::Conversion`] naming `origin` if the body is not
/// `GeoJSON` or is some other `GeoJSON` object type.
pub fn parse_feature_collection(
    body: &str,
    origin: &str,
) -> Result<FeatureCollection, DatasetError> {
    let geojson: GeoJson = body.parse().map_err(|e| DatasetError::Conversion {
        message: format!("Failed to parse GeoJSON from {origin}: {e}"),
    })?;

    FeatureCollection::try_from(geojson).map_err(|e| DatasetError::Conversion {
        message: format!("{origin} is not a FeatureCollection: {e}"),
    })
}
