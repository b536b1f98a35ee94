//! `fast-travel` client binary.
//!
//! Composition root: loads content, assembles the runtime, prints the travel
//! menu, and fast-travels to each location id given on the command line.
//!
//! ```bash
//! fast-travel [DATA_DIR] [LOCATION_ID...]
//! ENABLE_PERSISTENCE=1 fast-travel crates/game/content/data oakvale brindle
//! ```
mod config;
mod logging;
mod world;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use travel_content::ContentFactory;
use travel_core::GameError;
use travel_runtime::{
    CatalogRepository, FileCatalogRepository, Runtime, RuntimeConfig, RuntimeHandle,
};

use crate::config::ClientConfig;
use crate::world::World;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut config = ClientConfig::from_env();
    let mut args = std::env::args().skip(1).peekable();
    if let Some(first) = args.peek()
        && Path::new(first).is_dir()
    {
        config.data_dir = first.into();
        args.next();
    }
    let destinations: Vec<String> = args.collect();

    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    info!("Starting fast-travel client");
    info!("Content: {}", config.data_dir.display());
    info!("Persistence: {}", config.enable_persistence);

    // Overrides must land before the terrain is built from them.
    let factory = ContentFactory::new(&config.data_dir);
    let runtime_config = RuntimeConfig {
        travel: factory.load_config_or_default()?,
        ..RuntimeConfig::default()
    }
    .with_env_overrides();
    let world = World::load(&factory, runtime_config.travel.clone())?;

    let mut builder = Runtime::builder()
        .config(runtime_config)
        .catalog(world.catalog)
        .maps(world.maps);

    if config.enable_persistence {
        let save_dir = config.resolved_save_dir();
        info!("Catalog saves: {}", save_dir.display());
        let repository: Arc<dyn CatalogRepository> =
            Arc::new(FileCatalogRepository::new(save_dir)?);
        builder = builder.repository(repository);
    }

    let runtime = builder.build().await?;
    let handle = runtime.handle();

    print_menu(&handle).await?;
    for destination in &destinations {
        travel(&handle, destination, &config).await?;
    }

    drop(handle);
    runtime.shutdown().await?;
    info!("Client shutdown complete");
    Ok(())
}

async fn print_menu(handle: &RuntimeHandle) -> Result<()> {
    let catalog = handle.catalog_snapshot().await?;
    if catalog.is_empty() {
        println!("No locations visited yet.");
        return Ok(());
    }

    for (kind, locations) in catalog.grouped() {
        if locations.is_empty() {
            continue;
        }
        println!("{}:", kind);
        for location in locations {
            println!(
                "  {:<16} {:<20} {}",
                location.id().as_str(),
                location.display_name(),
                location.position()
            );
        }
    }
    Ok(())
}

/// Unknown ids are reported and skipped; every other failure ends the session.
async fn travel(handle: &RuntimeHandle, destination: &str, config: &ClientConfig) -> Result<()> {
    match handle
        .travel_to_within(destination, config.travel_timeout)
        .await
    {
        Ok(result) => {
            let note = if result.degraded {
                " (no open ground nearby)"
            } else {
                ""
            };
            println!(
                "Traveled to {} at {}{}.",
                result.display_name, result.final_position, note
            );
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            warn!(code = err.error_code(), "{}", err);
            println!("You have not visited '{}'.", destination);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
