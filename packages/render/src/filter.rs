//! Selection filtering.
//!
//! A feature is visible when any route it carries is selected. Expanded
//! shape copies carry exactly one route, so a shared polygon shows up once
//! per selected route that lists it.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use geojson::Feature;
use route_map_dataset::Dataset;
use route_map_route_models::RouteId;

/// A feature that passed the selection filter.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// The selected route the feature is drawn for.
    pub route: RouteId,
    /// The matching feature.
    pub feature: &'a Feature,
}

/// Returns the features of `dataset` carrying a selected route, in
/// dataset order.
///
/// A feature listing several routes is drawn for the first of them that
/// is selected. Features with no parseable route never match.
#[must_use]
pub fn filter_features<'a>(dataset: &'a Dataset, selection: &BTreeSet<RouteId>) -> Vec<Match<'a>> {
    dataset
        .features
        .iter()
        .filter_map(|feature| {
            dataset
                .route_ids(feature)
                .into_iter()
                .find(|id| selection.contains(id))
                .map(|route| Match { route, feature })
        })
        .collect()
}

/// Returns the selected routes that no feature in `shapes` carries.
#[must_use]
pub fn missing_shapes(shapes: &Dataset, selection: &BTreeSet<RouteId>) -> BTreeSet<RouteId> {
    let covered: BTreeSet<RouteId> = shapes
        .features
        .iter()
        .flat_map(|feature| shapes.route_ids(feature))
        .filter(|id| selection.contains(id))
        .collect();

    selection.difference(&covered).copied().collect()
}

/// Formats the user-facing warning for routes without a shape, or `None`
/// when every selected route has one.
#[must_use]
pub fn missing_shapes_warning(missing: &BTreeSet<RouteId>) -> Option<String> {
    if missing.is_empty() {
        return None;
    }

    let mut message = String::from("No shape found for route(s): ");
    for (i, id) in missing.iter().enumerate() {
        if i > 0 {
            message.push_str(", ");
        }
        let _ = write!(message, "{id}");
    }
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::FeatureCollection;
    use route_map_route_models::{
        DatasetDefinition, DatasetRole, GeometryKind, LayerStyle, RouteIdExtractor,
    };

    fn dataset(role: DatasetRole, id: RouteIdExtractor, expand: bool, json: &str) -> Dataset {
        let collection: FeatureCollection = json
            .parse::<geojson::GeoJson>()
            .unwrap()
            .try_into()
            .unwrap();
        Dataset::from_collection(
            DatasetDefinition {
                role,
                location: String::new(),
                geometry: GeometryKind::Line,
                id,
                expand,
                style: LayerStyle::default(),
            },
            collection,
        )
    }

    fn lines() -> Dataset {
        dataset(
            DatasetRole::OriginLines,
            RouteIdExtractor::Single {
                field: "ID".to_string(),
            },
            false,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"ID": 1}, "geometry": null},
                {"type": "Feature", "properties": {"ID": 2}, "geometry": null},
                {"type": "Feature", "properties": {"ID": 3}, "geometry": null},
                {"type": "Feature", "properties": {"ID": 5}, "geometry": null},
                {"type": "Feature", "properties": {"name": "no id"}, "geometry": null}
            ]}"#,
        )
    }

    fn shapes(expand: bool) -> Dataset {
        dataset(
            DatasetRole::Shapes,
            RouteIdExtractor::List {
                field: "IDs".to_string(),
                delimiter: ",".to_string(),
            },
            expand,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"IDs": "3,4,5"}, "geometry": null},
                {"type": "Feature", "properties": {"IDs": "1"}, "geometry": null}
            ]}"#,
        )
    }

    fn selection(ids: &[u32]) -> BTreeSet<RouteId> {
        ids.iter().copied().map(RouteId).collect()
    }

    #[test]
    fn keeps_only_selected_routes() {
        let lines = lines();
        let matched = filter_features(&lines, &selection(&[2, 5]));
        let routes: Vec<RouteId> = matched.iter().map(|m| m.route).collect();
        assert_eq!(routes, vec![RouteId(2), RouteId(5)]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        assert!(filter_features(&lines(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn expanded_shapes_match_per_route() {
        let shapes = shapes(true);
        let matched = filter_features(&shapes, &selection(&[4]));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].route, RouteId(4));

        let matched = filter_features(&shapes, &selection(&[3, 5]));
        let routes: Vec<RouteId> = matched.iter().map(|m| m.route).collect();
        assert_eq!(routes, vec![RouteId(3), RouteId(5)]);
    }

    #[test]
    fn unexpanded_shape_matches_any_listed_route() {
        let shapes = shapes(false);
        let matched = filter_features(&shapes, &selection(&[5]));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].route, RouteId(5));
    }

    #[test]
    fn reports_exactly_the_routes_without_shape() {
        let missing = missing_shapes(&shapes(true), &selection(&[1, 4, 7]));
        assert_eq!(missing, selection(&[7]));
        assert_eq!(
            missing_shapes_warning(&missing).as_deref(),
            Some("No shape found for route(s): 7")
        );
    }

    #[test]
    fn lists_several_missing_routes_in_order() {
        let missing = missing_shapes(&shapes(true), &selection(&[9, 2, 1]));
        assert_eq!(
            missing_shapes_warning(&missing).as_deref(),
            Some("No shape found for route(s): 2, 9")
        );
    }

    #[test]
    fn no_warning_when_every_route_has_a_shape() {
        let missing = missing_shapes(&shapes(true), &selection(&[1, 3]));
        assert!(missing.is_empty());
        assert_eq!(missing_shapes_warning(&missing), None);
    }
}
