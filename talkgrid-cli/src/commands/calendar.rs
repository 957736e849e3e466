use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use talkgrid_core::GridError;
use talkgrid_core::config::GridConfig;
use talkgrid_core::constants::CALENDAR_FILENAME;
use talkgrid_core::ics::{IcsOptions, generate_ics};
use talkgrid_core::planner::Planner;

use crate::render::warning;

pub async fn run(planner: &Planner, config: &GridConfig, output: Option<PathBuf>) -> Result<()> {
    let options = IcsOptions::from_config(config)?;

    let ics = match generate_ics(planner.catalog(), &planner.selection(), &options) {
        Ok(ics) => ics,
        Err(GridError::EmptySelection) => {
            println!("{}", warning(GridError::EmptySelection));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let path = output.unwrap_or_else(|| PathBuf::from(CALENDAR_FILENAME));
    tokio::fs::write(&path, ics)
        .await
        .with_context(|| format!("Could not write {}", path.display()))?;

    println!(
        "{} {}",
        "Calendar saved to".green(),
        path.display()
    );
    println!("{}", "Import it into Google Calendar, Outlook or Apple Calendar".dimmed());

    Ok(())
}
