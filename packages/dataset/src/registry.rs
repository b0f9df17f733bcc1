//! Map definition registry.
//!
//! The default map definition lives in `config/map.toml` and is baked into
//! the binary via [`include_str!`]. A user-supplied file with the same
//! schema can replace it at run time.

use std::collections::BTreeSet;
use std::path::Path;

use route_map_route_models::{MapConfig, RouteIdExtractor};

use crate::DatasetError;

/// Default map definition embedded at compile time.
const DEFAULT_MAP_TOML: &str = include_str!("../config/map.toml");

/// Parses and validates a map definition.
///
/// # Errors
///
/// Returns [`DatasetError::Config`] if the TOML is malformed, or
/// [`DatasetError::Conversion`] if the palette is empty, a role is
/// configured twice, or a list identifier has an empty delimiter.
pub fn parse_config(toml_str: &str) -> Result<MapConfig, DatasetError> {
    let config: MapConfig = toml::de::from_str(toml_str)?;

    if config.palette.is_empty() {
        return Err(DatasetError::Conversion {
            message: "Map definition has an empty palette".to_string(),
        });
    }

    let mut seen = BTreeSet::new();
    for dataset in &config.datasets {
        if !seen.insert(dataset.role) {
            return Err(DatasetError::Conversion {
                message: format!("Dataset role `{}` is configured twice", dataset.role),
            });
        }
        if matches!(&dataset.id, RouteIdExtractor::List { delimiter, .. } if delimiter.is_empty()) {
            return Err(DatasetError::Conversion {
                message: format!("Dataset role `{}` has an empty list delimiter", dataset.role),
            });
        }
    }

    Ok(config)
}

/// Returns the embedded default map definition.
///
/// # Errors
///
/// Returns [`DatasetError`] if the embedded TOML fails validation, which
/// indicates a development error caught by the tests below.
pub fn default_config() -> Result<MapConfig, DatasetError> {
    parse_config(DEFAULT_MAP_TOML)
}

/// Loads a map definition from `path`.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or fails
/// validation.
pub fn load_config(path: &Path) -> Result<MapConfig, DatasetError> {
    log::info!("Loading map definition from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}
