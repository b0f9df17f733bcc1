//! Shape expansion.
//!
//! A cut route polygon is often shared by several routes, listed in one
//! delimited field (`"3,4,5"`). Expansion replaces each such feature with
//! one copy per listed route, the list field overwritten by that single
//! identifier. Each copy owns its own geometry so later styling of one
//! copy never touches another.

use geojson::Feature;
use route_map_route_models::RouteIdExtractor;

use crate::routes::route_ids;

/// Expands every feature into one copy per route identifier it lists.
///
/// Features without any parseable identifier are passed through unchanged;
/// they never match a selection.
#[must_use]
pub fn expand_features(features: Vec<Feature>, extractor: &RouteIdExtractor) -> Vec<Feature> {
    let mut expanded = Vec::with_capacity(features.len());

    for feature in features {
        let ids = route_ids(&feature, extractor);
        if ids.is_empty() {
            log::debug!(
                "Feature without `{}` identifiers kept unexpanded",
                extractor.field()
            );
            expanded.push(feature);
            continue;
        }

        for id in ids {
            let mut copy = feature.clone();
            copy.set_property(extractor.field(), id.value());
            expanded.push(copy);
        }
    }

    expanded
}
