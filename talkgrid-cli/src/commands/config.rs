use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::config::GridConfig;

pub fn run(config: &GridConfig) -> Result<()> {
    let config_path = GridConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Data:     {}", config.data_path()?.display());
    println!("  Catalog:  {}", config.catalog_source());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {line}");
    }

    Ok(())
}
