#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the route map.
//!
//! Loads every dataset once at start-up, then either renders a single
//! selection (`render --select 2,5`), lists the available routes
//! (`routes`), or, with no subcommand, drops into an interactive loop
//! where each confirmed route selection re-renders the map.
//!
//! Uses `indicatif-log-bridge` (via [`route_map_cli_utils::init_logger`])
//! so log output and the dataset progress bar share the terminal.

mod interactive;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use route_map_cli_utils::{IndicatifProgress, MultiProgress};
use route_map_dataset::{loader, registry};
use route_map_render::{RenderedMap, Session, output};
use route_map_route_models::{MapConfig, RouteId};

/// Data location used when neither `--data` nor `ROUTE_MAP_DATA` is set.
const DEFAULT_DATA: &str = "data";
/// Output directory used when neither `--out` nor `ROUTE_MAP_OUT` is set.
const DEFAULT_OUT: &str = "data/rendered";

#[derive(Parser)]
#[command(name = "route_map", about = "Render route datasets by selected route")]
struct Cli {
    /// Map definition TOML file (defaults to the built-in definition)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory or base URL holding the dataset files (overrides `ROUTE_MAP_DATA`)
    #[arg(long, global = true)]
    data: Option<String>,
    /// Directory the rendered layers are written to (overrides `ROUTE_MAP_OUT`)
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route found across the datasets
    Routes,
    /// Render one selection and write it to the output directory
    Render {
        /// Comma-separated list of route IDs (e.g., "2,5")
        #[arg(long)]
        select: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = route_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => registry::load_config(path)?,
        None => registry::default_config()?,
    };
    let data = resolve_setting(cli.data, "ROUTE_MAP_DATA", DEFAULT_DATA);
    let out_dir = PathBuf::from(resolve_setting(
        cli.out.map(|p| p.display().to_string()),
        "ROUTE_MAP_OUT",
        DEFAULT_OUT,
    ));
    log::debug!("Data from {data}, output to {}", out_dir.display());

    let mut session = load_session(config, &data, &multi).await?;

    match cli.command {
        Some(Commands::Routes) => {
            for id in session.routes() {
                println!("{id}");
            }
        }
        Some(Commands::Render { select }) => {
            let selection = parse_selection(&select)?;
            let map = session.select(selection);
            publish(&map, session.config(), &out_dir)?;
        }
        None => interactive::run(&mut session, &out_dir)?,
    }

    Ok(())
}

/// Fetches every dataset concurrently and starts a session over them.
async fn load_session(
    config: MapConfig,
    data: &str,
    multi: &MultiProgress,
) -> Result<Session, Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::steps_bar(multi, "Loading datasets");
    let datasets = loader::load_all(&config, data, &progress).await?;
    Ok(Session::new(config, datasets))
}

/// Writes `map` to `out_dir` and prints a summary and any warning.
fn publish(
    map: &RenderedMap,
    config: &MapConfig,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = output::write_rendered(map, &config.tile_layer, out_dir)?;

    println!(
        "Rendered {} features for {} routes -> {}",
        map.feature_count(),
        map.legend.len(),
        manifest.display()
    );
    for (route, color) in &map.legend {
        println!("  route {route}: {color}");
    }
    if let Some(warning) = map.warning() {
        println!("Warning: {warning}");
    }

    Ok(())
}

/// Picks the command-line value, then the environment variable, then the
/// default.
fn resolve_setting(arg: Option<String>, env_var: &str, default: &str) -> String {
    arg.or_else(|| std::env::var(env_var).ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a comma-separated list of route IDs.
fn parse_selection(s: &str) -> Result<BTreeSet<RouteId>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<RouteId>()
                .map_err(|e| format!("Invalid route ID '{token}': {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_selection() {
        let selection = parse_selection("5, 2,,5").unwrap();
        assert_eq!(selection, BTreeSet::from([RouteId(2), RouteId(5)]));
    }

    #[test]
    fn rejects_bad_route_id() {
        let err = parse_selection("2,x").unwrap_err();
        assert!(err.contains("'x'"));
    }

    #[test]
    fn empty_selection_is_allowed() {
        assert!(parse_selection("").unwrap().is_empty());
    }

    #[test]
    fn argument_beats_default() {
        assert_eq!(
            resolve_setting(Some("remote".to_string()), "ROUTE_MAP_TEST_UNSET", "data"),
            "remote"
        );
        assert_eq!(resolve_setting(None, "ROUTE_MAP_TEST_UNSET", "data"), "data");
    }
}
