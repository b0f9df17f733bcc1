//! Concurrent dataset loading.
//!
//! Every dataset named by the map definition is fetched at once and the
//! caller gets nothing until all of them have arrived: one failed fetch
//! fails the whole load, so a map is never drawn from a partial set.

use std::sync::Arc;

use futures::future::try_join_all;
use route_map_route_models::MapConfig;

use crate::fetchers::{self, fetch_collection};
use crate::progress::ProgressCallback;
use crate::{Dataset, DatasetError};

/// Fetches and parses every dataset in `config`, resolving relative
/// locations against `base` (a directory or URL).
///
/// Datasets are returned in definition order regardless of which fetch
/// finishes first.
///
/// # Errors
///
/// Returns the first [`DatasetError`] encountered; the other in-flight
/// fetches are dropped.
pub async fn load_all(
    config: &MapConfig,
    base: &str,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<Dataset>, DatasetError> {
    let client = reqwest::Client::new();
    let total = config.datasets.len() as u64;

    log::info!("Loading {total} datasets from {base}");
    progress.set_total(total);

    let fetches = config.datasets.iter().map(|definition| {
        let client = &client;
        async move {
            let location = fetchers::resolve(base, &definition.location);
            let collection = fetch_collection(client, &location).await?;
            progress.inc(1);
            progress.set_message(format!("Loaded {}", definition.role.label()));
            Ok::<_, DatasetError>(Dataset::from_collection(definition.clone(), collection))
        }
    });

    let datasets = try_join_all(fetches).await?;

    let features: usize = datasets.iter().map(|d| d.features.len()).sum();
    progress.finish(format!("Loaded {} datasets", datasets.len()));
    log::info!(
        "Loaded {} datasets with {features} features in total",
        datasets.len()
    );

    Ok(datasets)
}
