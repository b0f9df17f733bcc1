//! Interactive route selection.
//!
//! Presents every observed route in a `dialoguer` checkbox list. Each
//! confirmed selection re-renders the whole map and rewrites the output
//! directory; confirming an empty selection exits.

use std::path::Path;

use dialoguer::MultiSelect;
use route_map_render::Session;
use route_map_route_models::RouteId;

/// Runs the selection loop until the user confirms an empty selection.
///
/// # Errors
///
/// Returns an error if terminal interaction or writing the output fails.
pub fn run(session: &mut Session, out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let routes: Vec<RouteId> = session.routes().iter().copied().collect();
    if routes.is_empty() {
        println!("No routes found in the datasets.");
        return Ok(());
    }

    loop {
        let labels: Vec<String> = routes
            .iter()
            .map(|&id| match session.color(id) {
                Some(color) => format!("Route {id} ({color})"),
                None => format!("Route {id}"),
            })
            .collect();
        let defaults: Vec<bool> = routes
            .iter()
            .map(|id| session.selection().contains(id))
            .collect();

        let picked = MultiSelect::new()
            .with_prompt("Select routes (space=toggle, a=all, enter=confirm, none=quit)")
            .items(&labels)
            .defaults(&defaults)
            .max_length(20)
            .interact()?;

        if picked.is_empty() {
            println!("No routes selected.");
            return Ok(());
        }

        let map = session.select(picked.iter().map(|&i| routes[i]));
        crate::publish(&map, session.config(), out_dir)?;
    }
}
