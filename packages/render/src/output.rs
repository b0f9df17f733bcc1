//! Writes a rendered map to disk.
//!
//! Each layer becomes `<role>.geojson` in the output directory, and a
//! `manifest.json` ties them together with the tile layer, the legend, and
//! the missing-shape warning so a viewer can redraw the whole map from one
//! file.

use std::path::{Path, PathBuf};

use route_map_route_models::{DatasetRole, GeometryKind, RouteId, TileLayer};
use serde::{Deserialize, Serialize};

use crate::{RenderError, RenderedMap};

/// Name of the manifest file written next to the layers.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Index of one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Background tile layer.
    pub tile_layer: TileLayer,
    /// Vector layers in drawing order.
    pub layers: Vec<ManifestLayer>,
    /// Colors of the routes drawn in this render.
    pub legend: Vec<LegendEntry>,
    /// Missing-shape warning, if any selected route lacks a shape.
    pub warning: Option<String>,
}

/// One vector layer file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestLayer {
    /// Dataset role the layer was rendered from.
    pub role: DatasetRole,
    /// Geometry family.
    pub geometry: GeometryKind,
    /// File name relative to the manifest.
    pub file: String,
    /// Number of features in the file.
    pub features: usize,
}

/// A route and the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Route identifier.
    pub route: RouteId,
    /// CSS color.
    pub color: String,
}

/// Builds the manifest for `map` without touching the filesystem.
#[must_use]
pub fn manifest(map: &RenderedMap, tile_layer: &TileLayer) -> Manifest {
    Manifest {
        tile_layer: tile_layer.clone(),
        layers: map
            .layers
            .iter()
            .map(|layer| ManifestLayer {
                role: layer.role,
                geometry: layer.geometry,
                file: layer_file_name(layer.role),
                features: layer.collection.features.len(),
            })
            .collect(),
        legend: map
            .legend
            .iter()
            .map(|(&route, color)| LegendEntry {
                route,
                color: color.clone(),
            })
            .collect(),
        warning: map.warning(),
    }
}

/// File name a layer of `role` is written to.
#[must_use]
pub fn layer_file_name(role: DatasetRole) -> String {
    format!("{role}.geojson")
}

/// Writes every layer of `map` plus the manifest into `out_dir`, creating
/// it if needed. Files from a previous render are overwritten.
///
/// Returns the path of the manifest.
///
/// # Errors
///
/// Returns [`RenderError`] if the directory or any file cannot be written.
pub fn write_rendered(
    map: &RenderedMap,
    tile_layer: &TileLayer,
    out_dir: &Path,
) -> Result<PathBuf, RenderError> {
    std::fs::create_dir_all(out_dir)?;

    for layer in &map.layers {
        let path = out_dir.join(layer_file_name(layer.role));
        let json = serde_json::to_string(&layer.collection)?;
        std::fs::write(&path, json)?;
        log::debug!(
            "Wrote {} features to {}",
            layer.collection.features.len(),
            path.display()
        );
    }

    let manifest_path = out_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest(map, tile_layer))?;
    std::fs::write(&manifest_path, json)?;

    log::info!("Map written to {}", out_dir.display());
    Ok(manifest_path)
}
