//! Interactive map session.
//!
//! A [`Session`] owns the loaded datasets, the route colors handed out so
//! far, and the current selection. Every selection change re-filters all
//! datasets and produces a fresh [`RenderedMap`]; colors persist across
//! renders for as long as the session lives.
//!
//! Rendered features carry the source properties plus a few reserved keys:
//! [`ROUTE_PROPERTY`], [`COLOR_PROPERTY`], [`POPUP_PROPERTY`] and the
//! simplestyle keys from [`style_properties`]. A source property with a
//! reserved name is replaced in the layer file and only survives in the
//! popup.

use std::collections::{BTreeMap, BTreeSet};

use geojson::{Feature, FeatureCollection};
use route_map_dataset::{Dataset, observed_routes};
use route_map_route_models::{DatasetRole, MapConfig, RouteId};
use serde_json::Value;

use crate::color::ColorAssigner;
use crate::filter::{filter_features, missing_shapes, missing_shapes_warning};
use crate::popup::popup_content;
use crate::style::style_properties;
use crate::{RenderedLayer, RenderedMap};

/// Property carrying the route a rendered feature was drawn for.
pub const ROUTE_PROPERTY: &str = "route_id";
/// Property carrying the route color of a rendered feature.
pub const COLOR_PROPERTY: &str = "color";
/// Property carrying the popup HTML of a rendered feature.
pub const POPUP_PROPERTY: &str = "popup";

/// Loaded datasets plus the state that drives rendering.
pub struct Session {
    config: MapConfig,
    datasets: Vec<Dataset>,
    routes: BTreeSet<RouteId>,
    colors: ColorAssigner,
    selection: BTreeSet<RouteId>,
}

impl Session {
    /// Starts a session over already-loaded `datasets` with an empty
    /// selection.
    #[must_use]
    pub fn new(config: MapConfig, datasets: Vec<Dataset>) -> Self {
        let routes = observed_routes(&datasets);
        log::info!("Session started with {} routes", routes.len());

        Self {
            colors: ColorAssigner::new(config.palette.clone()),
            config,
            datasets,
            routes,
            selection: BTreeSet::new(),
        }
    }

    /// Every route observed across the datasets, sorted.
    #[must_use]
    pub const fn routes(&self) -> &BTreeSet<RouteId> {
        &self.routes
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &BTreeSet<RouteId> {
        &self.selection
    }

    /// The map definition this session was started with.
    #[must_use]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The color assigned to `id` so far, if any.
    #[must_use]
    pub fn color(&self, id: RouteId) -> Option<&str> {
        self.colors.get(id)
    }

    /// Replaces the selection and renders the map for it.
    pub fn select(&mut self, ids: impl IntoIterator<Item = RouteId>) -> RenderedMap {
        self.selection = ids.into_iter().collect();
        self.render()
    }

    /// Renders the map for the current selection.
    ///
    /// Routes are assigned colors as their features are first drawn, in
    /// dataset order and then feature order.
    pub fn render(&mut self) -> RenderedMap {
        let mut layers = Vec::with_capacity(self.datasets.len());
        let mut legend = BTreeMap::new();

        for dataset in &self.datasets {
            let matched = filter_features(dataset, &self.selection);
            let mut features = Vec::with_capacity(matched.len());

            for m in matched {
                let color = self.colors.color_for(m.route).to_string();
                features.push(styled_feature(dataset, m.feature, m.route, &color));
                legend.entry(m.route).or_insert(color);
            }

            log::debug!(
                "{}: {} of {} features visible",
                dataset.role(),
                features.len(),
                dataset.features.len()
            );

            layers.push(RenderedLayer {
                role: dataset.role(),
                geometry: dataset.definition.geometry,
                collection: FeatureCollection {
                    bbox: None,
                    features,
                    foreign_members: None,
                },
            });
        }

        let missing_shapes = self
            .datasets
            .iter()
            .find(|d| d.role() == DatasetRole::Shapes)
            .map(|shapes| missing_shapes(shapes, &self.selection))
            .unwrap_or_default();

        if let Some(warning) = missing_shapes_warning(&missing_shapes) {
            log::warn!("{warning}");
        }

        let rendered = RenderedMap {
            layers,
            legend,
            missing_shapes,
        };
        log::info!(
            "Rendered {} features for {} selected routes",
            rendered.feature_count(),
            self.selection.len()
        );
        rendered
    }
}

/// Copies `feature` with its route, color, style, and popup attached.
fn styled_feature(dataset: &Dataset, feature: &Feature, route: RouteId, color: &str) -> Feature {
    let mut properties = feature.properties.clone().unwrap_or_default();
    let popup = popup_content(feature.properties.as_ref());

    let mut reserved = style_properties(
        dataset.definition.geometry,
        &dataset.definition.style,
        color,
    );
    reserved.insert(ROUTE_PROPERTY.to_string(), Value::from(route.value()));
    reserved.insert(COLOR_PROPERTY.to_string(), Value::from(color));
    reserved.insert(POPUP_PROPERTY.to_string(), Value::from(popup));

    for (key, value) in reserved {
        if let Some(original) = properties.insert(key.clone(), value) {
            log::debug!(
                "{}: route {route} property `{key}` ({original}) replaced by rendered value",
                dataset.role()
            );
        }
    }

    Feature {
        bbox: feature.bbox.clone(),
        geometry: feature.geometry.clone(),
        id: feature.id.clone(),
        properties: Some(properties),
        foreign_members: None,
    }
}
