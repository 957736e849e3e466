//! Core types for talkgrid.
//!
//! This crate holds everything the CLI drives:
//! - `catalog` and `slots` for the talk catalog and the slot path graph
//! - `grid` for the per-slot workshop rules
//! - `planner` for applying user actions and persisting them
//! - `store`, `share`, `ics` and `image_export` for the outer surfaces

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod ics;
pub mod image_export;
pub mod planner;
pub mod selection;
pub mod share;
pub mod slots;
pub mod store;
pub mod talk_id;

pub use catalog::{Catalog, Talk};
pub use error::{GridError, GridResult};
pub use selection::Selection;
