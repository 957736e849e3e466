//! The attendee's chosen talk per slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Slot → talk id. At most one talk per slot by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.0.get(slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in slot-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for Selection {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Selection(iter.into_iter().map(|(s, t)| (s.into(), t.into())).collect())
    }
}
