use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::planner::{Confirm, Outcome, Planner};

use crate::render::print_save_error;

pub fn run(planner: &mut Planner, confirm: &mut dyn Confirm) -> Result<()> {
    if planner.selection().is_empty() {
        println!("{}", "Your schedule is already empty".dimmed());
        return Ok(());
    }

    match planner.clear_all(confirm) {
        Outcome::Cancelled => println!("{}", "Nothing changed".dimmed()),
        Outcome::Applied { save_error, .. } => {
            println!("{}", "Schedule cleared".green());
            print_save_error(save_error.as_ref());
        }
    }

    Ok(())
}
