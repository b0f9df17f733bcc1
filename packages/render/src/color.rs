//! Route color assignment.
//!
//! Colors are handed out from a fixed palette in order of first request,
//! wrapping around when the palette runs out. Once a route has a color it
//! keeps it for the lifetime of the assigner.

use std::collections::BTreeMap;

use route_map_route_models::RouteId;

/// Color used when the palette is empty.
pub const FALLBACK_COLOR: &str = "#3388ff";

/// Lazily assigns each route a stable palette color.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<String>,
    assigned: BTreeMap<RouteId, usize>,
    next_slot: usize,
}

impl ColorAssigner {
    /// Creates an assigner over `palette`.
    #[must_use]
    pub const fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            assigned: BTreeMap::new(),
            next_slot: 0,
        }
    }

    /// Returns the color for `id`, assigning the next palette slot on the
    /// first call for that route.
    pub fn color_for(&mut self, id: RouteId) -> &str {
        if self.palette.is_empty() {
            return FALLBACK_COLOR;
        }

        let len = self.palette.len();
        let next_slot = &mut self.next_slot;
        let slot = *self.assigned.entry(id).or_insert_with(|| {
            let slot = *next_slot % len;
            *next_slot += 1;
            slot
        });

        &self.palette[slot]
    }

    /// Returns the color already assigned to `id`, without assigning one.
    #[must_use]
    pub fn get(&self, id: RouteId) -> Option<&str> {
        self.assigned
            .get(&id)
            .and_then(|&slot| self.palette.get(slot))
            .map(String::as_str)
    }

    /// Number of routes that have been assigned a color.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Whether no route has been assigned a color yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        vec!["#aa0000".to_string(), "#00bb00".to_string(), "#0000cc".to_string()]
    }

    #[test]
    fn color_for_is_idempotent() {
        let mut colors = ColorAssigner::new(palette());
        let first = colors.color_for(RouteId(9)).to_string();
        colors.color_for(RouteId(1));
        colors.color_for(RouteId(2));
        assert_eq!(colors.color_for(RouteId(9)), first);
        assert_eq!(colors.color_for(RouteId(9)), first);
    }

    #[test]
    fn assigns_in_order_of_first_request() {
        let mut colors = ColorAssigner::new(palette());
        assert_eq!(colors.color_for(RouteId(5)), "#aa0000");
        assert_eq!(colors.color_for(RouteId(2)), "#00bb00");
        assert_eq!(colors.color_for(RouteId(5)), "#aa0000");
        assert_eq!(colors.color_for(RouteId(7)), "#0000cc");
    }

    #[test]
    fn wraps_around_the_palette() {
        let mut colors = ColorAssigner::new(palette());
        for id in 0..3 {
            colors.color_for(RouteId(id));
        }
        assert_eq!(colors.color_for(RouteId(100)), "#aa0000");
        assert_eq!(colors.color_for(RouteId(101)), "#00bb00");
        assert_eq!(colors.len(), 5);
    }

    #[test]
    fn get_does_not_assign() {
        let mut colors = ColorAssigner::new(palette());
        assert_eq!(colors.get(RouteId(1)), None);
        assert!(colors.is_empty());
        colors.color_for(RouteId(1));
        assert_eq!(colors.get(RouteId(1)), Some("#aa0000"));
    }

    #[test]
    fn empty_palette_falls_back() {
        let mut colors = ColorAssigner::new(Vec::new());
        assert_eq!(colors.color_for(RouteId(1)), FALLBACK_COLOR);
    }
}
