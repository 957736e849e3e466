use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::constants::CAPTURE_FILENAME;
use talkgrid_core::image_export::export_png;
use talkgrid_core::planner::Planner;

use crate::render::warning;
use crate::utils::tui;

pub async fn run(planner: &Planner, output: Option<PathBuf>) -> Result<()> {
    let theme = planner.store().load_preferences().theme;
    let path = output.unwrap_or_else(|| PathBuf::from(CAPTURE_FILENAME));

    let spinner = tui::create_spinner("Rendering your schedule".to_string());
    let result = export_png(planner.catalog(), planner.grid(), theme, &path).await;
    spinner.finish_and_clear();

    let export = result?;
    if export.fell_back {
        println!(
            "{}",
            warning(format!("Could not write {}, saved to the default location", path.display()))
        );
    }
    println!("{} {}", "Image saved to".green(), export.path.display());

    Ok(())
}
