//! homegrid console entry point.
//!
//! Loads a launcher config and an app catalog manifest, restores the saved
//! layout, then reads commands from stdin. Type `help` for the command list.

mod commands;
mod process;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use commands::CommandOutput;
use homegrid_core::config::LauncherConfig;
use homegrid_core::launcher::Launcher;
use homegrid_core::persistence::{LayoutPersistence, MemoryLayoutStore, TomlLayoutStore};
use process::ProcessCatalog;

const BUNDLED_CATALOG: &str = include_str!("../catalog.toml");

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg, HOMEGRID_CONFIG env var, or defaults.
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("HOMEGRID_CONFIG").ok())
        .map(PathBuf::from);
    let config = match &config_path {
        Some(path) => LauncherConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LauncherConfig::default(),
    };

    let catalog = match std::env::args()
        .nth(2)
        .or_else(|| std::env::var("HOMEGRID_CATALOG").ok())
    {
        Some(path) => ProcessCatalog::load(Path::new(&path), &config.self_package)?,
        None => ProcessCatalog::from_toml_str(BUNDLED_CATALOG, &config.self_package)?,
    };

    let persistence: Box<dyn LayoutPersistence> = match &config.layout_path {
        Some(path) => Box::new(TomlLayoutStore::open(path)?),
        None => {
            log::info!("No layout_path configured; layout changes are not persisted");
            Box::new(MemoryLayoutStore::new())
        },
    };

    let mut launcher = Launcher::new(config, Arc::new(catalog), persistence);
    launcher.load();
    if let Some(err) = launcher.catalog_error() {
        log::warn!("Starting with an empty catalog: {err}");
    }
    log::info!(
        "Starting homegrid ({} apps, {} docked, {} home page(s))",
        launcher.store().catalog().len(),
        launcher.store().dock().len(),
        launcher.page_count(),
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();
    loop {
        if let Some(result) = launcher.poll_refresh() {
            match result {
                Ok(()) => println!("catalog refreshed"),
                Err(e) => println!("refresh failed: {e}"),
            }
        }
        print!("homegrid> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match commands::execute(&line, &mut launcher) {
            Ok(CommandOutput::Text(lines)) => {
                for l in lines {
                    println!("{l}");
                }
            },
            Ok(CommandOutput::None) => {},
            Ok(CommandOutput::Quit) => break,
            Err(e) => println!("error: {e:#}"),
        }
    }

    log::info!("homegrid exiting");
    Ok(())
}
