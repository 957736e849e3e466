use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::planner::{Confirm, Outcome, Planner};

use crate::render::{print_save_error, title_of};

pub fn run(planner: &mut Planner, slot: &str, confirm: &mut dyn Confirm) -> Result<()> {
    match planner.remove(slot, confirm)? {
        Outcome::Cancelled => println!("{}", "Nothing changed".dimmed()),
        Outcome::Applied { change: None, .. } => {
            println!("{}", format!("Nothing selected at {slot}").dimmed());
        }
        Outcome::Applied {
            change: Some(talk_id),
            save_error,
        } => {
            println!(
                "{} {} from {}",
                "Removed".red(),
                title_of(planner.catalog(), slot, &talk_id),
                slot
            );
            print_save_error(save_error.as_ref());
        }
    }

    Ok(())
}
