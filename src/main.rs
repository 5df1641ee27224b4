//! PRO Terrain
//!
//! Loads each map named on the command line and prints its summary as JSON.
//! Configuration comes from `TERRAIN_*` environment variables, log levels
//! from `RUST_LOG`.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pro_terrain::map::resource::{load_map, ResourceProvider};
use pro_terrain::{EngineConfig, VERSION};

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        bail!("usage: pro-terrain <map name>...");
    }

    let config = EngineConfig::from_env();
    let resources = config.resources();
    let options = config.loader_options();
    info!("PRO Terrain v{}", VERSION);
    info!("Resources: {}", resources.root().display());

    let mut failed = 0;
    for name in &names {
        if !resources.exists(name) {
            warn!("Map {} not found", name);
            failed += 1;
            continue;
        }
        let map = load_map(&resources, name, &options).with_context(|| format!("loading map {name}"))?;
        let summary = serde_json::to_string_pretty(&map.summary(name))?;
        println!("{summary}");
    }

    if failed > 0 {
        bail!("{} of {} maps not found", failed, names.len());
    }
    Ok(())
}
