use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::planner::{Outcome, Planner};
use talkgrid_core::share;

use crate::render::{GridView, Render, print_save_error};

pub fn run(planner: &mut Planner, link: &str) -> Result<()> {
    let Some(selection) = share::decode_link(link) else {
        anyhow::bail!("This link does not contain a valid schedule");
    };

    let Outcome::Applied { change: dropped, save_error } = planner.import(&selection) else {
        return Ok(());
    };

    for entry in &dropped {
        println!("{}", entry.render());
    }

    println!(
        "{}",
        format!("Schedule loaded from shared link ({} talks)", planner.selection().len()).green()
    );
    println!();
    println!(
        "{}",
        GridView {
            catalog: planner.catalog(),
            grid: planner.grid(),
        }
        .render()
    );

    print_save_error(save_error.as_ref());
    Ok(())
}
