//! Applies user actions to the grid and saves the result.
//!
//! The planner owns the catalog, the grid and the store. Every successful
//! mutation is written to the store straight away. A failed write is logged
//! and handed back with the outcome, but the in-memory grid stays as it is.

use std::fmt;

use crate::catalog::{Catalog, Talk};
use crate::error::{GridError, GridResult};
use crate::grid::{Dropped, Grid, Placement};
use crate::selection::Selection;
use crate::store::{ScheduleRecord, Store};

/// A question the user has to answer before a destructive action.
#[derive(Debug, Clone, Copy)]
pub enum Prompt<'a> {
    Replace {
        slot: &'a str,
        current: Option<&'a Talk>,
        incoming: &'a Talk,
    },
    Remove {
        slot: &'a str,
        talk: Option<&'a Talk>,
    },
    ClearAll,
}

impl fmt::Display for Prompt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Prompt::Replace {
                slot,
                current,
                incoming,
            } => match current {
                Some(current) => write!(f, "Replace \"{current}\" at {slot} with \"{incoming}\"?"),
                None => write!(f, "There is already a talk at {slot}. Replace it with \"{incoming}\"?"),
            },
            Prompt::Remove { slot, talk } => match talk {
                Some(talk) => write!(f, "Remove \"{talk}\" from {slot}?"),
                None => write!(f, "Remove the talk at {slot}?"),
            },
            Prompt::ClearAll => write!(f, "Clear your whole schedule?"),
        }
    }
}

/// Yes/no confirmation supplied by the user interface.
pub trait Confirm {
    fn confirm(&mut self, prompt: &Prompt<'_>) -> bool;
}

/// Answers yes to everything (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &Prompt<'_>) -> bool {
        true
    }
}

#[derive(Debug)]
pub enum Outcome<T> {
    Applied {
        change: T,
        /// Set when the change could not be saved.
        save_error: Option<GridError>,
    },
    /// The user declined the confirmation; nothing changed.
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    pub fn change(&self) -> Option<&T> {
        match self {
            Outcome::Applied { change, .. } => Some(change),
            Outcome::Cancelled => None,
        }
    }
}

pub struct Planner {
    catalog: Catalog,
    grid: Grid,
    store: Store,
}

impl Planner {
    /// Start from the saved schedule, if any.
    ///
    /// Returns the stored entries that no longer fit the catalog.
    pub fn open(catalog: Catalog, store: Store) -> (Self, Vec<Dropped>) {
        let mut grid = Grid::for_catalog(&catalog);
        let dropped = match store.load_schedule() {
            Some(record) => grid.restore(&catalog, &record.selection),
            None => Vec::new(),
        };

        (
            Planner {
                catalog,
                grid,
                store,
            },
            dropped,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn selection(&self) -> Selection {
        self.grid.selection()
    }

    /// Talk occupying `slot`, looked up in the catalog.
    pub fn talk_at(&self, slot: &str) -> Option<&Talk> {
        let id = self.grid.occupant(slot)?;
        self.catalog.find_talk(slot, id)
    }

    /// Replace the current schedule with one received through a share link.
    pub fn import(&mut self, selection: &Selection) -> Outcome<Vec<Dropped>> {
        let dropped = self.grid.restore(&self.catalog, selection);
        Outcome::Applied {
            change: dropped,
            save_error: self.save(),
        }
    }

    /// Put a talk in `slot`. `reference` is a position, talk id or title fragment.
    ///
    /// Conflicts are reported before the user is asked anything. Replacing
    /// an occupied slot needs confirmation.
    pub fn select(
        &mut self,
        slot: &str,
        reference: &str,
        confirm: &mut dyn Confirm,
    ) -> GridResult<Outcome<Placement>> {
        let talk = self.catalog.resolve_talk(slot, reference)?.clone();
        self.grid.check_placement(slot)?;

        if self.grid.occupant(slot).is_some() {
            let prompt = Prompt::Replace {
                slot,
                current: self.talk_at(slot),
                incoming: &talk,
            };
            if !confirm.confirm(&prompt) {
                return Ok(Outcome::Cancelled);
            }
        }

        let placement = self.grid.select(slot, &talk)?;
        tracing::info!(slot, talk = %placement.talk_id, "talk selected");

        Ok(Outcome::Applied {
            change: placement,
            save_error: self.save(),
        })
    }

    /// Empty `slot`. Returns the removed talk id, or `None` if there was nothing there.
    pub fn remove(
        &mut self,
        slot: &str,
        confirm: &mut dyn Confirm,
    ) -> GridResult<Outcome<Option<String>>> {
        if self.grid.state(slot).is_none() {
            return Err(GridError::UnknownSlot(slot.to_string()));
        }

        if self.grid.occupant(slot).is_none() {
            return Ok(Outcome::Applied {
                change: None,
                save_error: None,
            });
        }

        let prompt = Prompt::Remove {
            slot,
            talk: self.talk_at(slot),
        };
        if !confirm.confirm(&prompt) {
            return Ok(Outcome::Cancelled);
        }

        let removed = self.grid.remove(slot)?;
        tracing::info!(slot, "talk removed");

        Ok(Outcome::Applied {
            change: removed,
            save_error: self.save(),
        })
    }

    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> Outcome<()> {
        if !confirm.confirm(&Prompt::ClearAll) {
            return Outcome::Cancelled;
        }

        self.grid.clear();
        tracing::info!("schedule cleared");

        Outcome::Applied {
            change: (),
            save_error: self.save(),
        }
    }

    fn save(&self) -> Option<GridError> {
        let record = ScheduleRecord::now(self.grid.selection());
        match self.store.save_schedule(&record) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "could not save schedule; keeping it in memory");
                Some(e)
            }
        }
    }
}
