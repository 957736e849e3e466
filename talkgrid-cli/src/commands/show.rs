use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::planner::Planner;

use crate::render::{GridView, Render};

pub fn run(planner: &Planner) -> Result<()> {
    let view = GridView {
        catalog: planner.catalog(),
        grid: planner.grid(),
    };
    println!("{}", view.render());

    if planner.grid().is_empty() {
        println!();
        println!("{}", "No talks picked yet. Try `talkgrid list`".dimmed());
    }

    Ok(())
}
