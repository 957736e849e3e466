mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use talkgrid_core::catalog::PaletteFilter;
use talkgrid_core::config::GridConfig;
use tracing_subscriber::EnvFilter;

use crate::utils::tui::Ask;

#[derive(Parser)]
#[command(name = "talkgrid")]
#[command(about = "Pick your DevFest talks, share the schedule and export it to your calendar")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the talks you can pick, slot by slot
    List {
        /// Only show this track ("all" for every track)
        #[arg(short, long)]
        track: Option<String>,

        /// Only show talks whose title or track contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show your schedule
    Show,
    /// Put a talk in a slot
    Select {
        /// Slot start time, e.g. "10:00"
        slot: String,

        /// Position in `talkgrid list`, talk id, or part of the title
        talk: String,
    },
    /// Empty a slot
    Remove { slot: String },
    /// Remove every talk from your schedule
    Clear,
    /// Create a link to your schedule and copy it to the clipboard
    Share {
        /// Page the link points at
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Load a schedule from a shared link (or its raw payload)
    Open { link: String },
    /// Export your schedule as an .ics file
    Calendar {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export your schedule as a PNG image
    Image {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change the color theme: light, dark or toggle
    Theme { mode: Option<String> },
    /// Show config paths and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GridConfig::load()?;
    let mut ask = Ask::new(cli.yes);

    match cli.command {
        Commands::Config => commands::config::run(&config),
        Commands::Theme { mode } => commands::theme::run(&config, mode.as_deref()),
        Commands::List { track, search } => {
            let planner = commands::open_planner(&config).await?;
            commands::list::run(&planner, &PaletteFilter { track, search })
        }
        Commands::Show => {
            let planner = commands::open_planner(&config).await?;
            commands::show::run(&planner)
        }
        Commands::Select { slot, talk } => {
            let mut planner = commands::open_planner(&config).await?;
            commands::select::run(&mut planner, &slot, &talk, &mut ask)
        }
        Commands::Remove { slot } => {
            let mut planner = commands::open_planner(&config).await?;
            commands::remove::run(&mut planner, &slot, &mut ask)
        }
        Commands::Clear => {
            let mut planner = commands::open_planner(&config).await?;
            commands::clear::run(&mut planner, &mut ask)
        }
        Commands::Share { base_url } => {
            let planner = commands::open_planner(&config).await?;
            let base = base_url.unwrap_or_else(|| config.share_base_url.clone());
            commands::share::run(&planner, &base)
        }
        Commands::Open { link } => {
            let mut planner = commands::open_planner(&config).await?;
            commands::open::run(&mut planner, &link)
        }
        Commands::Calendar { output } => {
            let planner = commands::open_planner(&config).await?;
            commands::calendar::run(&planner, &config, output).await
        }
        Commands::Image { output } => {
            let planner = commands::open_planner(&config).await?;
            commands::image::run(&planner, output).await
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
