#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection filtering, route coloring, and styled layer output.
//!
//! Given the loaded datasets and a set of selected routes, decides which
//! features to draw and in what color. Colors come from a fixed palette and
//! stick to a route for the whole [`Session`]. Output is one styled
//! `GeoJSON` layer per dataset plus a manifest, written by
//! [`output::write_rendered`].

pub mod color;
pub mod filter;
pub mod output;
pub mod popup;
pub mod session;
pub mod style;

use std::collections::{BTreeMap, BTreeSet};

use geojson::FeatureCollection;
use route_map_route_models::{DatasetRole, GeometryKind, RouteId};
use thiserror::Error;

pub use session::Session;

/// Errors that can occur while writing a rendered map.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a layer or the manifest failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The visible features of one dataset, styled for drawing.
#[derive(Debug, Clone)]
pub struct RenderedLayer {
    /// Dataset the layer came from.
    pub role: DatasetRole,
    /// Geometry family.
    pub geometry: GeometryKind,
    /// Styled features, in dataset order.
    pub collection: FeatureCollection,
}

/// Result of rendering one selection.
#[derive(Debug, Clone)]
pub struct RenderedMap {
    /// One layer per dataset, in drawing order. Layers with no visible
    /// features are kept so a redraw clears them.
    pub layers: Vec<RenderedLayer>,
    /// Routes drawn in this render and their colors.
    pub legend: BTreeMap<RouteId, String>,
    /// Selected routes with no shape feature.
    pub missing_shapes: BTreeSet<RouteId>,
}

impl RenderedMap {
    /// Returns the layer rendered from `role`, if that dataset is loaded.
    #[must_use]
    pub fn layer(&self, role: DatasetRole) -> Option<&RenderedLayer> {
        self.layers.iter().find(|l| l.role == role)
    }

    /// Total number of visible features across all layers.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.layers.iter().map(|l| l.collection.features.len()).sum()
    }

    /// User-facing warning listing selected routes without a shape.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        filter::missing_shapes_warning(&self.missing_shapes)
    }
}
