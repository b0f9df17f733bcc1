#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route identifier, dataset role, and map configuration types.
//!
//! Defines the TOML schema for the map definition (palette, tile layer,
//! and one dataset per [`DatasetRole`]) along with the [`RouteId`] type
//! that every rendered feature is grouped and colored by.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A route/trip number used to group and color related features.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RouteId(pub u32);

impl RouteId {
    /// Returns the numeric value of this identifier.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RouteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for RouteId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The role a dataset file plays on the map.
///
/// Each map definition carries at most one dataset per role. Roles are
/// rendered in declaration order, so shapes sit underneath lines and
/// points.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetRole {
    /// Cut route polygons, possibly shared by several routes.
    Shapes,
    /// Line geometry of each route on the origin side.
    OriginLines,
    /// Line geometry of each route on the destination side.
    DestinationLines,
    /// Origin point locations.
    OriginPoints,
    /// Destination point locations.
    DestinationPoints,
    /// Stops served on the destination side.
    DestinationStops,
}

impl DatasetRole {
    /// Human-readable label for menus and log output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shapes => "Route shapes",
            Self::OriginLines => "Origin lines",
            Self::DestinationLines => "Destination lines",
            Self::OriginPoints => "Origin points",
            Self::DestinationPoints => "Destination points",
            Self::DestinationStops => "Destination stops",
        }
    }
}

/// Geometry family a dataset is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeometryKind {
    /// `LineString` / `MultiLineString`.
    Line,
    /// `Point` / `MultiPoint`.
    Point,
    /// `Polygon` / `MultiPolygon`.
    Polygon,
}

/// How to read route identifiers out of a feature's properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteIdExtractor {
    /// One integer (or numeric string) per feature.
    Single {
        /// Property holding the identifier.
        field: String,
    },
    /// A delimited list of identifiers, e.g. `"3,4,5"`.
    List {
        /// Property holding the list.
        field: String,
        /// Separator between identifiers.
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
}

impl RouteIdExtractor {
    /// Returns the property name the identifiers are read from.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Single { field } | Self::List { field, .. } => field,
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

/// Per-layer drawing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Stroke width in pixels.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Stroke opacity, 0.0 to 1.0.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Fill opacity for polygons, 0.0 to 1.0.
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,
    /// Optional SVG dash pattern (e.g. `"6 4"`).
    #[serde(default)]
    pub dash_array: Option<String>,
    /// Marker radius in pixels for point layers.
    #[serde(default = "default_radius")]
    pub radius: f64,
}

const fn default_weight() -> f64 {
    3.0
}

const fn default_opacity() -> f64 {
    1.0
}

const fn default_fill_opacity() -> f64 {
    0.2
}

const fn default_radius() -> f64 {
    6.0
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            opacity: default_opacity(),
            fill_opacity: default_fill_opacity(),
            dash_array: None,
            radius: default_radius(),
        }
    }
}

/// One static dataset file and how to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    /// What the dataset represents on the map.
    pub role: DatasetRole,
    /// File name relative to the data base location, or an absolute URL.
    pub location: String,
    /// Geometry family.
    pub geometry: GeometryKind,
    /// Where the route identifiers live.
    pub id: RouteIdExtractor,
    /// Duplicate each feature once per listed identifier after loading.
    #[serde(default)]
    pub expand: bool,
    /// Drawing parameters.
    #[serde(default)]
    pub style: LayerStyle,
}

/// Background raster tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    /// URL template with `{z}`, `{x}`, `{y}` placeholders.
    pub url: String,
    /// Attribution HTML shown on the map.
    pub attribution: String,
    /// Maximum zoom level served by the tile provider.
    #[serde(default)]
    pub max_zoom: Option<u8>,
}

/// A complete map definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Colors handed out to routes in order of first appearance.
    pub palette: Vec<String>,
    /// Background tile layer.
    pub tile_layer: TileLayer,
    /// Datasets to load, one per role.
    pub datasets: Vec<DatasetDefinition>,
}

impl MapConfig {
    /// Returns the definition for `role`, if configured.
    #[must_use]
    pub fn dataset(&self, role: DatasetRole) -> Option<&DatasetDefinition> {
        self.datasets.iter().find(|d| d.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_id_with_whitespace() {
        assert_eq!(" 42 ".parse::<RouteId>().unwrap(), RouteId(42));
    }

    #[test]
    fn rejects_non_numeric_route_id() {
        assert!("4a".parse::<RouteId>().is_err());
        assert!("".parse::<RouteId>().is_err());
        assert!("-3".parse::<RouteId>().is_err());
    }

    #[test]
    fn role_round_trips_through_snake_case() {
        assert_eq!(DatasetRole::OriginLines.to_string(), "origin_lines");
        assert_eq!(
            "destination_stops".parse::<DatasetRole>().unwrap(),
            DatasetRole::DestinationStops
        );
    }

    #[test]
    fn dataset_definition_fills_style_defaults() {
        let def: DatasetDefinition = toml::from_str(
            r#"
            role = "shapes"
            location = "shapes.geojson"
            geometry = "polygon"
            expand = true
            id = { type = "list", field = "IDs" }
            "#,
        )
        .unwrap();

        assert_eq!(def.role, DatasetRole::Shapes);
        assert!(def.expand);
        assert_eq!(
            def.id,
            RouteIdExtractor::List {
                field: "IDs".to_string(),
                delimiter: ",".to_string(),
            }
        );
        assert_eq!(def.style, LayerStyle::default());
    }

    #[test]
    fn extractor_reports_field_for_both_variants() {
        let single = RouteIdExtractor::Single {
            field: "ID".to_string(),
        };
        let list = RouteIdExtractor::List {
            field: "IDs".to_string(),
            delimiter: ";".to_string(),
        };
        assert_eq!(single.field(), "ID");
        assert_eq!(list.field(), "IDs");
    }
}
