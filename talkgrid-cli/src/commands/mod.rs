pub mod calendar;
pub mod clear;
pub mod config;
pub mod image;
pub mod list;
pub mod open;
pub mod remove;
pub mod select;
pub mod share;
pub mod show;
pub mod theme;

use anyhow::{Context, Result};
use talkgrid_core::Catalog;
use talkgrid_core::config::GridConfig;
use talkgrid_core::planner::Planner;
use talkgrid_core::store::Store;

use crate::render::Render;
use crate::utils::tui;

/// Load the catalog and put the saved schedule back on the grid.
pub async fn open_planner(config: &GridConfig) -> Result<Planner> {
    let source = config.catalog_source();

    let spinner = tui::create_spinner(format!("Loading talks from {source}"));
    let catalog = Catalog::load(&source).await;
    spinner.finish_and_clear();

    let catalog = catalog.context("Could not load the talk catalog. Check `catalog` in your config")?;
    let store = Store::new(config.data_path()?);

    let (planner, dropped) = Planner::open(catalog, store);
    for entry in &dropped {
        println!("{}", entry.render());
    }

    Ok(planner)
}
