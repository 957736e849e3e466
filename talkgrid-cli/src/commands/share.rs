use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::planner::Planner;
use talkgrid_core::share;

use crate::render::warning;

pub fn run(planner: &Planner, base_url: &str) -> Result<()> {
    let selection = planner.selection();
    if selection.is_empty() {
        println!("{}", warning("Your schedule is empty. Add some talks first"));
        return Ok(());
    }

    let link = share::share_url(base_url, &selection)?;

    match copy_to_clipboard(&link) {
        Ok(()) => println!("{} {}", "Link copied to the clipboard:".green(), link),
        Err(e) => {
            tracing::debug!(error = %e, "clipboard unavailable");
            println!("{}", "Share this link:".bold());
            println!("{link}");
        }
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())
}
