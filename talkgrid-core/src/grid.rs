//! Per-slot state and the workshop occupation rules.
//!
//! A workshop runs for two consecutive slots. The slot it starts in holds
//! the selection; the following slot is `Hidden` for as long as the
//! workshop stays there. Nothing may be placed in a hidden slot, and
//! replacing or removing the workshop gives the hidden slot back as `Empty`.

use std::fmt;

use crate::catalog::{Catalog, Talk};
use crate::error::{GridError, GridResult};
use crate::selection::Selection;
use crate::slots::SlotAdjacency;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Normal(String),
    Workshop(String),
    /// Consumed by the workshop in the previous slot.
    Hidden,
}

impl SlotState {
    pub fn talk_id(&self) -> Option<&str> {
        match self {
            SlotState::Normal(id) | SlotState::Workshop(id) => Some(id),
            SlotState::Empty | SlotState::Hidden => None,
        }
    }

    pub fn is_workshop(&self) -> bool {
        matches!(self, SlotState::Workshop(_))
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlotState::Empty => write!(f, "empty"),
            SlotState::Normal(id) => write!(f, "{id}"),
            SlotState::Workshop(id) => write!(f, "{id} (workshop)"),
            SlotState::Hidden => write!(f, "hidden"),
        }
    }
}

/// What a successful selection changed, for reporting back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    pub slot: String,
    pub talk_id: String,
    /// Talk previously in `slot`.
    pub replaced: Option<String>,
    /// Slot now hidden by the new workshop.
    pub hidden: Option<String>,
    /// Talks dropped because their slot was consumed by the new workshop.
    pub discarded: Vec<String>,
    /// Slots given back because a workshop stopped covering them.
    pub released: Vec<String>,
}

/// A stored entry that could not be put back on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropped {
    pub slot: String,
    pub talk_id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Grid {
    adjacency: SlotAdjacency,
    states: Vec<SlotState>,
}

impl Grid {
    pub fn new(adjacency: SlotAdjacency) -> Self {
        let states = vec![SlotState::Empty; adjacency.len()];
        Grid { adjacency, states }
    }

    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.adjacency().clone())
    }

    pub fn adjacency(&self) -> &SlotAdjacency {
        &self.adjacency
    }

    pub fn state(&self, slot: &str) -> Option<&SlotState> {
        self.adjacency.index_of(slot).map(|i| &self.states[i])
    }

    /// Talk currently occupying `slot`, if any.
    pub fn occupant(&self, slot: &str) -> Option<&str> {
        self.state(slot).and_then(SlotState::talk_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotState)> {
        self.adjacency.slots().iter().map(String::as_str).zip(self.states.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.states.iter().all(|s| *s == SlotState::Empty)
    }

    /// Whether a talk may be placed in `slot` right now.
    pub fn is_selectable(&self, slot: &str) -> bool {
        self.adjacency
            .index_of(slot)
            .is_some_and(|i| self.conflict_at(i).is_none())
    }

    /// Workshop slot blocking placement at `index`.
    fn conflict_at(&self, index: usize) -> Option<usize> {
        self.adjacency
            .prev_index(index)
            .filter(|p| self.states[*p].is_workshop())
    }

    /// Check that a talk could be placed in `slot` without changing anything.
    pub fn check_placement(&self, slot: &str) -> GridResult<()> {
        self.index_for_placement(slot).map(|_| ())
    }

    fn index_for_placement(&self, slot: &str) -> GridResult<usize> {
        let index = self
            .adjacency
            .index_of(slot)
            .ok_or_else(|| GridError::UnknownSlot(slot.to_string()))?;

        if let Some(workshop) = self.conflict_at(index) {
            return Err(GridError::WorkshopConflict {
                slot: slot.to_string(),
                workshop_slot: self.adjacency.slots()[workshop].clone(),
            });
        }

        Ok(index)
    }

    /// Put `talk` in `slot`. The grid is untouched when this returns an error.
    pub fn select(&mut self, slot: &str, talk: &Talk) -> GridResult<Placement> {
        let index = self.index_for_placement(slot)?;
        let talk_id = talk.id(slot);

        let mut placement = Placement {
            slot: slot.to_string(),
            talk_id: talk_id.clone(),
            ..Placement::default()
        };

        let previous = std::mem::take(&mut self.states[index]);
        placement.replaced = previous.talk_id().map(String::from);
        if previous.is_workshop() {
            self.release_successor(index, &mut placement.released);
        }

        if talk.is_workshop {
            self.states[index] = SlotState::Workshop(talk_id);
            if let Some(next) = self.adjacency.next_index(index) {
                self.hide(next, &mut placement);
            }
            // workshop replaced by workshop: the same slot stays covered
            let hidden = placement.hidden.clone();
            placement.released.retain(|s| Some(s) != hidden.as_ref());
        } else {
            self.states[index] = SlotState::Normal(talk_id);
        }

        Ok(placement)
    }

    /// Empty `slot`, returning the talk that was there.
    ///
    /// Hidden and empty slots have nothing to remove.
    pub fn remove(&mut self, slot: &str) -> GridResult<Option<String>> {
        let index = self
            .adjacency
            .index_of(slot)
            .ok_or_else(|| GridError::UnknownSlot(slot.to_string()))?;

        if self.states[index].talk_id().is_none() {
            return Ok(None);
        }

        let previous = std::mem::take(&mut self.states[index]);
        if previous.is_workshop() {
            self.release_successor(index, &mut Vec::new());
        }

        Ok(previous.talk_id().map(String::from))
    }

    pub fn clear(&mut self) {
        self.states.fill(SlotState::Empty);
    }

    /// Rebuild the grid from a stored selection.
    ///
    /// Entries are applied in slot order without confirmation. Entries for
    /// unknown slots or talks, and entries landing on a slot an earlier
    /// workshop covers, are dropped.
    pub fn restore(&mut self, catalog: &Catalog, selection: &Selection) -> Vec<Dropped> {
        self.clear();
        let mut dropped = Vec::new();

        let mut drop_entry = |slot: &str, talk_id: &str, reason: String| {
            tracing::warn!(slot, talk_id, %reason, "dropping stored selection entry");
            dropped.push(Dropped {
                slot: slot.to_string(),
                talk_id: talk_id.to_string(),
                reason,
            });
        };

        for (slot, talk_id) in selection.iter() {
            if self.adjacency.index_of(slot).is_none() {
                drop_entry(slot, talk_id, "unknown time slot".into());
            }
        }

        let slots: Vec<String> = self.adjacency.slots().to_vec();
        for slot in &slots {
            let Some(talk_id) = selection.get(slot) else {
                continue;
            };

            let Some(talk) = catalog.find_talk(slot, talk_id) else {
                drop_entry(slot, talk_id, "talk no longer in the catalog".into());
                continue;
            };

            if let Err(e) = self.select(slot, talk) {
                drop_entry(slot, talk_id, e.to_string());
            }
        }

        dropped
    }

    /// The selection this grid represents.
    pub fn selection(&self) -> Selection {
        self.iter()
            .filter_map(|(slot, state)| state.talk_id().map(|id| (slot, id)))
            .collect()
    }

    fn hide(&mut self, index: usize, placement: &mut Placement) {
        let previous = std::mem::replace(&mut self.states[index], SlotState::Hidden);
        if let Some(id) = previous.talk_id() {
            placement.discarded.push(id.to_string());
        }
        if previous.is_workshop() {
            self.release_successor(index, &mut placement.released);
        }
        placement.hidden = Some(self.adjacency.slots()[index].clone());
    }

    fn release_successor(&mut self, index: usize, released: &mut Vec<String>) {
        if let Some(next) = self.adjacency.next_index(index) {
            if self.states[next] == SlotState::Hidden {
                self.states[next] = SlotState::Empty;
                released.push(self.adjacency.slots()[next].clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample;

    fn talk<'a>(catalog: &'a Catalog, slot: &str, title: &str) -> &'a Talk {
        catalog
            .talks(slot)
            .unwrap()
            .iter()
            .find(|t| t.title == title)
            .unwrap()
    }

    /// Every hidden slot sits right after a workshop, and vice versa.
    fn assert_invariants(grid: &Grid) {
        let states: Vec<&SlotState> = grid.iter().map(|(_, s)| s).collect();
        for (i, state) in states.iter().enumerate() {
            let prev_is_workshop = i > 0 && states[i - 1].is_workshop();
            assert_eq!(
                **state == SlotState::Hidden,
                prev_is_workshop,
                "slot {i} state {state:?} disagrees with predecessor"
            );
        }
        assert_eq!(grid.selection().len(), states.iter().filter(|s| s.talk_id().is_some()).count());
    }

    #[test]
    fn workshop_hides_the_next_slot() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);

        let placement = grid
            .select("10:00", talk(&catalog, "10:00", "Docker para Iniciantes"))
            .unwrap();

        assert_eq!(placement.hidden.as_deref(), Some("10:50"));
        assert_eq!(grid.state("10:50"), Some(&SlotState::Hidden));
        assert!(!grid.is_selectable("10:50"));
        assert!(grid.is_selectable("11:40"));
        assert_invariants(&grid);
    }

    #[test]
    fn workshop_discards_the_consumed_selection() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);

        grid.select("10:50", talk(&catalog, "10:50", "Generative UI")).unwrap();
        let placement = grid
            .select("10:00", talk(&catalog, "10:00", "Docker para Iniciantes"))
            .unwrap();

        assert_eq!(placement.discarded, vec!["10:50-generative-ui".to_string()]);
        assert_eq!(grid.occupant("10:50"), None);
        assert_eq!(grid.selection().get("10:50"), None);

        // Replacing the workshop does not bring the discarded talk back
        grid.select("10:00", talk(&catalog, "10:00", "BigQuery Advanced")).unwrap();
        assert_eq!(grid.state("10:50"), Some(&SlotState::Empty));
        assert_invariants(&grid);
    }

    #[test]
    fn slot_after_workshop_rejects_selection_and_nothing_changes() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);
        grid.select("10:00", talk(&catalog, "10:00", "Docker para Iniciantes")).unwrap();
        let before = grid.selection();

        let err = grid
            .select("10:50", talk(&catalog, "10:50", "LinkedIn como Aliado"))
            .unwrap_err();

        assert!(err.is_conflict());
        assert!(matches!(
            err,
            GridError::WorkshopConflict { ref slot, ref workshop_slot }
                if slot == "10:50" && workshop_slot == "10:00"
        ));
        assert_eq!(grid.selection(), before);
        assert_eq!(grid.state("10:50"), Some(&SlotState::Hidden));
        assert!(grid.state("10:00").unwrap().is_workshop());
    }

    #[test]
    fn replacing_a_workshop_with_a_talk_releases_the_next_slot() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);
        grid.select("10:00", talk(&catalog, "10:00", "Docker para Iniciantes")).unwrap();

        let placement = grid
            .select("10:00", talk(&catalog, "10:00", "BigQuery Advanced"))
            .unwrap();

        assert_eq!(placement.replaced.as_deref(), Some("10:00-docker-para-iniciantes"));
        assert_eq!(placement.released, vec!["10:50".to_string()]);
        assert_eq!(grid.state("10:50"), Some(&SlotState::Empty));
        assert!(grid.is_selectable("10:50"));
        assert_invariants(&grid);
    }

    #[test]
    fn removing_a_workshop_releases_the_next_slot() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);
        grid.select("10:00", talk(&catalog, "10:00", "Docker para Iniciantes")).unwrap();

        let removed = grid.remove("10:00").unwrap();

        assert_eq!(removed.as_deref(), Some("10:00-docker-para-iniciantes"));
        assert_eq!(grid.state("10:00"), Some(&SlotState::Empty));
        assert_eq!(grid.state("10:50"), Some(&SlotState::Empty));
        assert!(grid.is_empty());
    }

    #[test]
    fn removing_from_empty_or_hidden_slot_is_a_no_op() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);
        assert_eq!(grid.remove("11:40").unwrap(), None);

        grid.select("10:00", talk(&catalog, "10:00", "Docker para Iniciantes")).unwrap();
        assert_eq!(grid.remove("10:50").unwrap(), None);
        assert_eq!(grid.state("10:50"), Some(&SlotState::Hidden));
        assert!(matches!(grid.remove("09:00"), Err(GridError::UnknownSlot(_))));
    }

    #[test]
    fn workshop_in_last_slot_hides_nothing() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);

        let placement = grid
            .select("13:40", talk(&catalog, "13:40", "Arquitetura Frontend"))
            .unwrap();

        assert_eq!(placement.hidden, None);
        assert!(grid.state("13:40").unwrap().is_workshop());
        assert_invariants(&grid);
    }

    #[test]
    fn hiding_a_workshop_releases_what_it_covered() {
        let ws = Talk {
            title: "W".into(),
            track: "Workshop".into(),
            card_image: "w.png".into(),
            is_workshop: true,
        };
        let mut grid = Grid::new(SlotAdjacency::new(["a", "b", "c"]));
        grid.select("b", &ws).unwrap();
        assert_eq!(grid.state("c"), Some(&SlotState::Hidden));

        let placement = grid.select("a", &ws).unwrap();

        assert_eq!(placement.discarded, vec!["b-w".to_string()]);
        assert_eq!(placement.released, vec!["c".to_string()]);
        assert_eq!(grid.state("b"), Some(&SlotState::Hidden));
        assert_eq!(grid.state("c"), Some(&SlotState::Empty));
        assert_invariants(&grid);
    }

    #[test]
    fn workshop_swap_keeps_the_next_slot_hidden() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);
        let ws = talk(&catalog, "10:00", "Docker para Iniciantes").clone();
        grid.select("10:00", &ws).unwrap();

        let placement = grid.select("10:00", &ws).unwrap();

        assert_eq!(placement.hidden.as_deref(), Some("10:50"));
        assert!(placement.released.is_empty());
        assert_eq!(grid.state("10:50"), Some(&SlotState::Hidden));
    }

    #[test]
    fn clear_empties_everything() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);
        grid.select("10:00", talk(&catalog, "10:00", "Docker para Iniciantes")).unwrap();
        grid.select("11:40", talk(&catalog, "11:40", "Bulletproof AgentOps")).unwrap();

        grid.clear();

        assert!(grid.is_empty());
        assert!(grid.selection().is_empty());
        assert!(grid.iter().all(|(slot, _)| grid.is_selectable(slot)));
    }

    #[test]
    fn restore_drops_stale_and_conflicting_entries() {
        let catalog = sample();
        let mut grid = Grid::for_catalog(&catalog);

        let stored: Selection = [
            ("10:00", "10:00-docker-para-iniciantes"),
            ("10:50", "10:50-generative-ui"),
            ("11:40", "11:40-removed-talk"),
            ("13:40", "13:40-a-era-gemma"),
            ("18:00", "18:00-after-hours"),
        ]
        .into_iter()
        .collect();

        let dropped = grid.restore(&catalog, &stored);

        let dropped_slots: Vec<&str> = dropped.iter().map(|d| d.slot.as_str()).collect();
        assert_eq!(dropped_slots, ["18:00", "10:50", "11:40"]);
        assert!(grid.state("10:00").unwrap().is_workshop());
        assert_eq!(grid.state("10:50"), Some(&SlotState::Hidden));
        assert_eq!(grid.occupant("13:40"), Some("13:40-a-era-gemma"));
        assert_invariants(&grid);
    }

    #[test]
    fn restore_keeps_the_workshop_among_similar_titles() {
        let catalog = Catalog::from_json(
            r#"{
                "10:00": [
                    { "title": "C++", "track": "Avançado", "cardImage": "cpp.png" },
                    { "title": "C#", "track": "Workshop", "cardImage": "cs.png", "isWorkshop": true }
                ],
                "10:50": [ { "title": "Go", "track": "Iniciante", "cardImage": "go.png" } ]
            }"#,
        )
        .unwrap();
        let mut grid = Grid::for_catalog(&catalog);
        grid.select("10:00", talk(&catalog, "10:00", "C#")).unwrap();

        let mut restored = Grid::for_catalog(&catalog);
        let dropped = restored.restore(&catalog, &grid.selection());

        assert!(dropped.is_empty());
        assert_eq!(restored.occupant("10:00"), Some("10:00-c#"));
        assert_eq!(restored.state("10:50"), Some(&SlotState::Hidden));
    }

    #[test]
    fn every_sequence_of_actions_keeps_one_talk_per_slot() {
        let catalog = sample();
        let mut actions: Vec<(&str, Option<&Talk>)> = Vec::new();
        for (slot, talks) in catalog.iter() {
            actions.push((slot, None));
            for t in talks {
                actions.push((slot, Some(t)));
            }
        }

        // All sequences of three actions over the sample day
        for a in &actions {
            for b in &actions {
                for c in &actions {
                    let mut grid = Grid::for_catalog(&catalog);
                    for (slot, talk) in [a, b, c] {
                        let before = grid.selection();
                        let result = match talk {
                            Some(t) => grid.select(slot, t).map(|_| ()),
                            None => grid.remove(slot).map(|_| ()),
                        };
                        if result.is_err() {
                            assert_eq!(grid.selection(), before);
                        }
                        assert_invariants(&grid);
                    }
                }
            }
        }
    }
}
