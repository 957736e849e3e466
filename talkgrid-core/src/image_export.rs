//! PNG snapshot of the schedule grid.
//!
//! Each visible slot is drawn at its row with the talk's card image, or a
//! block in the track's color when the card cannot be read. Slots hidden
//! by a workshop are skipped and the workshop card covers both rows.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::catalog::Catalog;
use crate::constants::layout::{
    BOTTOM_MARGIN, CANVAS_WIDTH, FIRST_SLOT_TOP, SLOT_HEIGHT, SLOT_LEFT, SLOT_PITCH, SLOT_WIDTH,
    WORKSHOP_HEIGHT,
};
use crate::constants::{CAPTURE_FILENAME, CAPTURE_SCALE};
use crate::error::{GridError, GridResult};
use crate::grid::{Grid, SlotState};
use crate::store::Theme;
use crate::talk_id::normalize;

const HEADER: Rgba<u8> = Rgba([66, 133, 244, 255]);

struct Palette {
    background: Rgba<u8>,
    placeholder: Rgba<u8>,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: Rgba([255, 255, 255, 255]),
                placeholder: Rgba([232, 234, 237, 255]),
            },
            Theme::Dark => Palette {
                background: Rgba([32, 33, 36, 255]),
                placeholder: Rgba([60, 64, 67, 255]),
            },
        }
    }
}

fn track_color(track: &str) -> Rgba<u8> {
    match normalize(track).as_str() {
        "iniciante" => Rgba([52, 168, 83, 255]),
        "avancado" => Rgba([66, 133, 244, 255]),
        "carreiras" => Rgba([251, 188, 4, 255]),
        "workshop" => Rgba([234, 67, 53, 255]),
        "wtm" => Rgba([161, 66, 244, 255]),
        "onfly" => Rgba([0, 150, 136, 255]),
        _ => Rgba([128, 134, 139, 255]),
    }
}

/// Unscaled (top, height) of the slot at `index`.
fn slot_rect(index: usize, state: &SlotState) -> (u32, u32) {
    let top = FIRST_SLOT_TOP + SLOT_PITCH * index as u32;
    let height = if state.is_workshop() { WORKSHOP_HEIGHT } else { SLOT_HEIGHT };
    (top, height)
}

fn fill(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let block = RgbaImage::from_pixel(w, h, color);
    imageops::overlay(canvas, &block, i64::from(x), i64::from(y));
}

/// Draw the grid at `scale` times the layout size.
pub fn render_grid(catalog: &Catalog, grid: &Grid, theme: Theme, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let palette = Palette::for_theme(theme);

    let bottom = grid
        .iter()
        .enumerate()
        .map(|(i, (_, state))| {
            let (top, height) = slot_rect(i, state);
            top + height
        })
        .max()
        .unwrap_or(FIRST_SLOT_TOP);

    let mut canvas = RgbaImage::from_pixel(
        CANVAS_WIDTH * scale,
        (bottom + BOTTOM_MARGIN) * scale,
        palette.background,
    );
    fill(&mut canvas, 0, 0, CANVAS_WIDTH * scale, (FIRST_SLOT_TOP / 2) * scale, HEADER);

    for (i, (slot, state)) in grid.iter().enumerate() {
        let (top, height) = slot_rect(i, state);
        let (x, y, w, h) = (SLOT_LEFT * scale, top * scale, SLOT_WIDTH * scale, height * scale);

        let talk = match state {
            SlotState::Hidden => continue,
            SlotState::Empty => {
                fill(&mut canvas, x, y, w, h, palette.placeholder);
                continue;
            }
            SlotState::Normal(id) | SlotState::Workshop(id) => catalog.find_talk(slot, id),
        };

        let Some(talk) = talk else {
            fill(&mut canvas, x, y, w, h, palette.placeholder);
            continue;
        };

        let card_path = catalog.card_path(talk);
        match image::open(&card_path) {
            Ok(card) => {
                let card = card.resize_exact(w, h, FilterType::Triangle).to_rgba8();
                imageops::overlay(&mut canvas, &card, i64::from(x), i64::from(y));
            }
            Err(e) => {
                tracing::debug!(path = %card_path.display(), error = %e, "card image unavailable");
                fill(&mut canvas, x, y, w, h, track_color(&talk.track));
            }
        }
    }

    canvas
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageExport {
    pub path: PathBuf,
    /// The requested path could not be written and the default name was used.
    pub fell_back: bool,
}

/// Default file in `cwd`, or `None` when `path` already points there.
fn fallback_path(path: &Path, cwd: &Path) -> Option<PathBuf> {
    let fallback = cwd.join(CAPTURE_FILENAME);
    (cwd.join(path) != fallback).then_some(fallback)
}

/// Render and write the grid as PNG at the capture scale.
///
/// If `path` cannot be written the image goes to the default file name in
/// the current directory instead.
pub async fn export_png(
    catalog: &Catalog,
    grid: &Grid,
    theme: Theme,
    path: &Path,
) -> GridResult<ImageExport> {
    let catalog = catalog.clone();
    let grid = grid.clone();

    let canvas = tokio::task::spawn_blocking(move || render_grid(&catalog, &grid, theme, CAPTURE_SCALE))
        .await
        .map_err(|e| GridError::Export(e.to_string()))?;

    match canvas.save(path) {
        Ok(()) => Ok(ImageExport {
            path: path.to_path_buf(),
            fell_back: false,
        }),
        Err(first) => {
            let Some(fallback) = fallback_path(path, &std::env::current_dir()?) else {
                return Err(GridError::Export(first.to_string()));
            };
            tracing::warn!(path = %path.display(), error = %first, "falling back to default image path");
            canvas
                .save(&fallback)
                .map_err(|e| GridError::Export(format!("{first}; fallback failed: {e}")))?;
            Ok(ImageExport {
                path: fallback,
                fell_back: true,
            })
        }
    }
}
