use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::config::GridConfig;
use talkgrid_core::store::{Store, Theme};

pub fn run(config: &GridConfig, mode: Option<&str>) -> Result<()> {
    let store = Store::new(config.data_path()?);
    let mut preferences = store.load_preferences();

    let theme = match mode {
        None => {
            println!("Theme: {}", preferences.theme.bold());
            return Ok(());
        }
        Some("toggle") => preferences.theme.toggled(),
        Some(name) => name.parse::<Theme>()?,
    };

    preferences.theme = theme;
    store.save_preferences(&preferences)?;
    println!("{} {}", "Theme set to".green(), theme);

    Ok(())
}
