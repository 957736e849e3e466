//! TUI rendering traits for talkgrid types.
//!
//! Extension traits that add colored terminal output to talkgrid-core types
//! using owo_colors.

use owo_colors::OwoColorize;
use talkgrid_core::grid::{Dropped, Grid, SlotState};
use talkgrid_core::{Catalog, GridError, Talk};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Talk {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.title, format!("· {}", self.track).dimmed());
        if self.is_workshop {
            line.push_str(&format!(" {}", "[workshop]".magenta()));
        }
        line
    }
}

impl Render for Dropped {
    fn render(&self) -> String {
        format!("⚠ {} dropped {} ({})", self.slot, self.talk_id, self.reason)
            .yellow()
            .to_string()
    }
}

/// The schedule as one line per slot.
pub struct GridView<'a> {
    pub catalog: &'a Catalog,
    pub grid: &'a Grid,
}

impl Render for GridView<'_> {
    fn render(&self) -> String {
        let lines: Vec<String> = self
            .grid
            .iter()
            .map(|(slot, state)| {
                let body = match state {
                    SlotState::Empty => "· empty".dimmed().to_string(),
                    SlotState::Hidden => "│ workshop continues".dimmed().to_string(),
                    SlotState::Normal(id) | SlotState::Workshop(id) => {
                        match self.catalog.find_talk(slot, id) {
                            Some(talk) => format!("{} {}", "✓".green(), talk.render()),
                            None => format!("{} {}", "?".yellow(), id),
                        }
                    }
                };
                format!("{}  {}", slot.bold(), body)
            })
            .collect();

        lines.join("\n")
    }
}

/// Title of a selected talk, or its id when the catalog no longer has it.
pub fn title_of(catalog: &Catalog, slot: &str, talk_id: &str) -> String {
    catalog
        .find_talk(slot, talk_id)
        .map(|talk| talk.title.clone())
        .unwrap_or_else(|| talk_id.to_string())
}

/// Non-fatal warning line.
pub fn warning(message: impl std::fmt::Display) -> String {
    format!("⚠ {message}").yellow().to_string()
}

/// Report a failed save without aborting the command.
pub fn print_save_error(save_error: Option<&GridError>) {
    if let Some(e) = save_error {
        println!("{}", warning(format!("{e}. Your changes are kept for this session only")));
    }
}
