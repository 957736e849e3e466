//! Ordered time slots and their previous/next adjacency.

use std::collections::HashMap;

/// The day's time slots as a path graph.
///
/// Adjacency is index arithmetic over the ordered slot list, so `next` and
/// `prev` can never disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAdjacency {
    slots: Vec<String>,
}

impl SlotAdjacency {
    pub fn new<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SlotAdjacency {
            slots: slots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn index_of(&self, slot: &str) -> Option<usize> {
        self.slots.iter().position(|s| s == slot)
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    pub fn next_index(&self, index: usize) -> Option<usize> {
        (index + 1 < self.slots.len()).then_some(index + 1)
    }

    pub fn prev_index(&self, index: usize) -> Option<usize> {
        index.checked_sub(1).filter(|i| *i < self.slots.len())
    }

    pub fn next(&self, slot: &str) -> Option<&str> {
        let i = self.index_of(slot)?;
        self.next_index(i).and_then(|n| self.slot(n))
    }

    pub fn prev(&self, slot: &str) -> Option<&str> {
        let i = self.index_of(slot)?;
        self.prev_index(i).and_then(|p| self.slot(p))
    }

    /// The slot `steps` positions after `slot`, if the day is long enough.
    pub fn nth_after(&self, slot: &str, steps: usize) -> Option<&str> {
        let i = self.index_of(slot)?;
        self.slot(i + steps)
    }

    /// Explicit `(next, prev)` maps keyed by slot.
    pub fn maps(&self) -> (HashMap<String, String>, HashMap<String, String>) {
        let mut next = HashMap::with_capacity(self.slots.len());
        let mut prev = HashMap::with_capacity(self.slots.len());

        for pair in self.slots.windows(2) {
            next.insert(pair[0].clone(), pair[1].clone());
            prev.insert(pair[1].clone(), pair[0].clone());
        }

        (next, prev)
    }
}

/// Build the next/prev maps for an ordered slot list.
pub fn adjacency<S: AsRef<str>>(slots: &[S]) -> (HashMap<String, String>, HashMap<String, String>) {
    SlotAdjacency::new(slots.iter().map(|s| s.as_ref().to_string())).maps()
}
