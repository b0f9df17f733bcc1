#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route map dataset registry, fetching, and shape expansion.
//!
//! Loads the static `GeoJSON` files named by a [`MapConfig`] (one per
//! [`DatasetRole`]), fetching them all concurrently and only returning once
//! every file has arrived. Polygon datasets whose identifier field lists
//! several routes are expanded into one feature per route so each route
//! can be styled and filtered on its own.
//!
//! [`MapConfig`]: route_map_route_models::MapConfig

pub mod expand;
pub mod fetchers;
pub mod loader;
pub mod progress;
pub mod registry;
pub mod routes;

use std::collections::BTreeSet;

use geojson::{Feature, FeatureCollection};
use route_map_route_models::{DatasetDefinition, DatasetRole, RouteId};
use thiserror::Error;

/// Errors that can occur while loading datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Map definition TOML was malformed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// A loaded dataset: its definition plus the parsed features, in file
/// order (after expansion, when the definition asks for it).
#[derive(Debug, Clone)]
pub struct Dataset {
    /// How the dataset was configured.
    pub definition: DatasetDefinition,
    /// Features in source order.
    pub features: Vec<Feature>,
}

impl Dataset {
    /// Builds a dataset from a parsed collection, expanding list-valued
    /// identifiers when the definition sets `expand`.
    #[must_use]
    pub fn from_collection(definition: DatasetDefinition, collection: FeatureCollection) -> Self {
        let raw_count = collection.features.len();
        let features = if definition.expand {
            expand::expand_features(collection.features, &definition.id)
        } else {
            collection.features
        };

        log::info!(
            "{}: {} features loaded ({raw_count} in file)",
            definition.role,
            features.len(),
        );

        Self {
            definition,
            features,
        }
    }

    /// Returns the role of this dataset.
    #[must_use]
    pub const fn role(&self) -> DatasetRole {
        self.definition.role
    }

    /// Returns the route identifiers carried by `feature` according to this
    /// dataset's extractor. Empty if the field is missing or malformed.
    #[must_use]
    pub fn route_ids(&self, feature: &Feature) -> Vec<RouteId> {
        routes::route_ids(feature, &self.definition.id)
    }
}

/// Returns every route identifier observed across `datasets`, sorted and
/// de-duplicated.
#[must_use]
pub fn observed_routes(datasets: &[Dataset]) -> BTreeSet<RouteId> {
    datasets
        .iter()
        .flat_map(|dataset| {
            dataset
                .features
                .iter()
                .flat_map(move |feature| dataset.route_ids(feature))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_map_route_models::{GeometryKind, LayerStyle, RouteIdExtractor};

    fn definition(role: DatasetRole, id: RouteIdExtractor, expand: bool) -> DatasetDefinition {
        DatasetDefinition {
            role,
            location: format!("{role}.geojson"),
            geometry: GeometryKind::Polygon,
            id,
            expand,
            style: LayerStyle::default(),
        }
    }

    fn collection(json: &str) -> FeatureCollection {
        json.parse::<geojson::GeoJson>()
            .unwrap()
            .try_into()
            .unwrap()
    }

    const SHAPES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"IDs": "3,4"},
             "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}},
            {"type": "Feature", "properties": {"IDs": "9"},
             "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}}
        ]
    }"#;

    #[test]
    fn expands_when_definition_asks() {
        let list = RouteIdExtractor::List {
            field: "IDs".to_string(),
            delimiter: ",".to_string(),
        };
        let dataset = Dataset::from_collection(
            definition(DatasetRole::Shapes, list, true),
            collection(SHAPES),
        );
        assert_eq!(dataset.features.len(), 3);
    }

    #[test]
    fn leaves_features_alone_without_expand() {
        let list = RouteIdExtractor::List {
            field: "IDs".to_string(),
            delimiter: ",".to_string(),
        };
        let dataset = Dataset::from_collection(
            definition(DatasetRole::Shapes, list, false),
            collection(SHAPES),
        );
        assert_eq!(dataset.features.len(), 2);
        assert_eq!(
            dataset.route_ids(&dataset.features[0]),
            vec![RouteId(3), RouteId(4)]
        );
    }

    #[test]
    fn observed_routes_are_sorted_and_unique() {
        let list = RouteIdExtractor::List {
            field: "IDs".to_string(),
            delimiter: ",".to_string(),
        };
        let single = RouteIdExtractor::Single {
            field: "ID".to_string(),
        };
        let shapes = Dataset::from_collection(
            definition(DatasetRole::Shapes, list, true),
            collection(SHAPES),
        );
        let lines = Dataset::from_collection(
            definition(DatasetRole::OriginLines, single, false),
            collection(
                r#"{"type": "FeatureCollection", "features": [
                    {"type": "Feature", "properties": {"ID": 4}, "geometry": null},
                    {"type": "Feature", "properties": {"ID": 1}, "geometry": null},
                    {"type": "Feature", "properties": {}, "geometry": null}
                ]}"#,
            ),
        );

        let observed: Vec<RouteId> = observed_routes(&[shapes, lines]).into_iter().collect();
        assert_eq!(
            observed,
            vec![RouteId(1), RouteId(3), RouteId(4), RouteId(9)]
        );
    }
}
