//! Per-feature style properties.
//!
//! Rendered features carry their style inline as
//! [simplestyle-spec](https://github.com/mapbox/simplestyle-spec)
//! properties, so any `GeoJSON` viewer draws them in their route color.

use geojson::JsonObject;
use route_map_route_models::{GeometryKind, LayerStyle};
use serde_json::Value;

/// Maps a marker radius in pixels onto simplestyle's three marker sizes.
#[must_use]
pub fn marker_size(radius: f64) -> &'static str {
    if radius < 5.0 {
        "small"
    } else if radius < 9.0 {
        "medium"
    } else {
        "large"
    }
}

/// Returns the style properties for a feature of `kind` drawn in `color`.
#[must_use]
pub fn style_properties(kind: GeometryKind, style: &LayerStyle, color: &str) -> JsonObject {
    let mut props = JsonObject::new();

    match kind {
        GeometryKind::Point => {
            props.insert("marker-color".to_string(), Value::from(color));
            props.insert(
                "marker-size".to_string(),
                Value::from(marker_size(style.radius)),
            );
        }
        GeometryKind::Line | GeometryKind::Polygon => {
            props.insert("stroke".to_string(), Value::from(color));
            props.insert("stroke-width".to_string(), Value::from(style.weight));
            props.insert("stroke-opacity".to_string(), Value::from(style.opacity));
            if let Some(dash) = &style.dash_array {
                props.insert("stroke-dasharray".to_string(), Value::from(dash.as_str()));
            }
            if kind == GeometryKind::Polygon {
                props.insert("fill".to_string(), Value::from(color));
                props.insert("fill-opacity".to_string(), Value::from(style.fill_opacity));
            }
        }
    }

    props
}
