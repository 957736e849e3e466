use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::catalog::PaletteFilter;
use talkgrid_core::planner::Planner;

use crate::render::Render;

pub fn run(planner: &Planner, filter: &PaletteFilter) -> Result<()> {
    let catalog = planner.catalog();

    if let Some(track) = &filter.track {
        let tracks = catalog.tracks();
        if !track.eq_ignore_ascii_case("all") && !tracks.contains(&track.as_str()) {
            anyhow::bail!("Track '{}' not found. Available: {}", track, tracks.join(", "));
        }
    }

    let shown = catalog.filter(filter);
    if shown.is_empty() {
        println!("{}", "No talks match".dimmed());
        return Ok(());
    }

    for (i, (slot, talks)) in shown.iter().enumerate() {
        let selected = planner.grid().occupant(slot);
        let blocked = !planner.grid().is_selectable(slot);

        let header = if blocked {
            format!("{} {}", slot.bold(), "(taken by a workshop)".dimmed())
        } else {
            slot.bold().to_string()
        };
        println!("{header}");

        let all = catalog.talks(slot).unwrap_or_default();
        for talk in talks {
            // Positions refer to the unfiltered slot so `select` accepts them
            let position = all.iter().position(|t| t == *talk).map_or(0, |p| p + 1);
            let marker = if selected == Some(talk.id(slot).as_str()) {
                "✓".green().to_string()
            } else {
                " ".to_string()
            };
            let line = format!("{:>3}. {}", position, talk.render());
            if blocked {
                println!(" {marker} {}", line.dimmed());
            } else {
                println!(" {marker} {line}");
            }
        }

        if i < shown.len() - 1 {
            println!();
        }
    }

    Ok(())
}
