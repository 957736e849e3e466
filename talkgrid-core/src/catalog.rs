//! Talk catalog: the ordered list of time slots and the talks in each.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::config::is_remote;
use crate::error::{GridError, GridResult};
use crate::slots::SlotAdjacency;
use crate::talk_id::{matches_search, talk_id};

/// A single talk as published in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    pub title: String,
    pub track: String,
    pub card_image: String,
    #[serde(default)]
    pub is_workshop: bool,
}

impl Talk {
    pub fn id(&self, slot: &str) -> String {
        talk_id(slot, &self.title)
    }
}

impl fmt::Display for Talk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Structural check on a raw catalog record.
///
/// `title`, `track` and `cardImage` must all be present and strings.
pub fn is_valid_talk(record: &serde_json::Value) -> bool {
    ["title", "track", "cardImage"]
        .iter()
        .all(|field| record.get(field).is_some_and(serde_json::Value::is_string))
}

/// The day's talks, keyed by slot in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    slots: Vec<(String, Vec<Talk>)>,
    adjacency: SlotAdjacency,
    /// Directory card image paths are resolved against.
    base_dir: Option<PathBuf>,
}

impl Catalog {
    fn new(slots: Vec<(String, Vec<Talk>)>) -> Self {
        let adjacency = SlotAdjacency::new(slots.iter().map(|(slot, _)| slot.clone()));
        Catalog {
            slots,
            adjacency,
            base_dir: None,
        }
    }

    /// Parse and validate catalog JSON. Any invalid talk rejects the whole catalog.
    pub fn from_json(content: &str) -> GridResult<Self> {
        let raw: OrderedSlots = serde_json::from_str(content)
            .map_err(|e| GridError::CatalogParse(e.to_string()))?;

        let invalid: Vec<String> = raw
            .0
            .iter()
            .flat_map(|(slot, records)| {
                records
                    .iter()
                    .enumerate()
                    .filter(|(_, record)| !is_valid_talk(record))
                    .map(move |(i, record)| format!("{slot} #{}: {record}", i + 1))
            })
            .collect();

        if !invalid.is_empty() {
            for entry in &invalid {
                tracing::error!(talk = %entry, "invalid talk in catalog");
            }
            return Err(GridError::InvalidCatalog(invalid));
        }

        let mut slots = Vec::with_capacity(raw.0.len());
        for (slot, records) in raw.0 {
            let talks = records
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<Talk>, _>>()
                .map_err(|e| GridError::CatalogParse(format!("{slot}: {e}")))?;
            slots.push((slot, talks));
        }

        Ok(Catalog::new(slots))
    }

    /// Load the catalog from a file path or an http(s) URL.
    pub async fn load(source: &str) -> GridResult<Self> {
        if is_remote(source) {
            let content = fetch_remote(source).await?;
            return Self::from_json(&content);
        }

        let path = Path::new(source);
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GridError::CatalogUnavailable(format!("{}: {e}", path.display())))?;

        let mut catalog = Self::from_json(&content)?;
        catalog.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(slots = catalog.slots.len(), source, "catalog loaded");
        Ok(catalog)
    }

    pub fn adjacency(&self) -> &SlotAdjacency {
        &self.adjacency
    }

    /// Slot keys in catalog order.
    pub fn slots(&self) -> &[String] {
        self.adjacency.slots()
    }

    pub fn talks(&self, slot: &str) -> Option<&[Talk]> {
        self.slots
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, talks)| talks.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Talk])> {
        self.slots.iter().map(|(s, t)| (s.as_str(), t.as_slice()))
    }

    /// Reverse lookup of a talk id within its slot.
    pub fn find_talk(&self, slot: &str, id: &str) -> Option<&Talk> {
        self.talks(slot)?.iter().find(|t| t.id(slot) == id)
    }

    /// Resolve a user-supplied reference: 1-based position, talk id or title fragment.
    pub fn resolve_talk(&self, slot: &str, reference: &str) -> GridResult<&Talk> {
        let talks = self
            .talks(slot)
            .ok_or_else(|| GridError::UnknownSlot(slot.to_string()))?;

        let unknown = || GridError::UnknownTalk {
            slot: slot.to_string(),
            talk: reference.to_string(),
        };

        if let Ok(n) = reference.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| talks.get(i)).ok_or_else(unknown);
        }

        if let Some(talk) = talks.iter().find(|t| t.id(slot) == reference) {
            return Ok(talk);
        }

        let mut matches = talks.iter().filter(|t| matches_search(&t.title, reference));
        match (matches.next(), matches.next()) {
            (Some(talk), None) => Ok(talk),
            _ => Err(unknown()),
        }
    }

    /// Distinct tracks in first-seen order.
    pub fn tracks(&self) -> Vec<&str> {
        let mut tracks: Vec<&str> = Vec::new();
        for talk in self.slots.iter().flat_map(|(_, talks)| talks) {
            if !tracks.contains(&talk.track.as_str()) {
                tracks.push(&talk.track);
            }
        }
        tracks
    }

    /// Talks passing the palette filters, grouped by slot. Slots with no
    /// remaining talks are omitted.
    pub fn filter(&self, filter: &PaletteFilter) -> Vec<(&str, Vec<&Talk>)> {
        self.iter()
            .map(|(slot, talks)| {
                let shown: Vec<&Talk> = talks.iter().filter(|t| filter.shows(t)).collect();
                (slot, shown)
            })
            .filter(|(_, shown)| !shown.is_empty())
            .collect()
    }

    /// Path of a talk's card image, resolved against the catalog's directory.
    pub fn card_path(&self, talk: &Talk) -> PathBuf {
        let card = Path::new(&talk.card_image);
        match &self.base_dir {
            Some(base) if card.is_relative() => base.join(card),
            _ => card.to_path_buf(),
        }
    }
}

/// Track and search filters for the talk palette.
#[derive(Debug, Clone, Default)]
pub struct PaletteFilter {
    pub track: Option<String>,
    pub search: Option<String>,
}

impl PaletteFilter {
    pub fn shows(&self, talk: &Talk) -> bool {
        if let Some(track) = &self.track {
            if !track.eq_ignore_ascii_case("all") && talk.track != *track {
                return false;
            }
        }

        match self.search.as_deref() {
            Some(term) => matches_search(&talk.title, term) || matches_search(&talk.track, term),
            None => true,
        }
    }
}

async fn fetch_remote(url: &str) -> GridResult<String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| GridError::CatalogUnavailable(format!("{url}: {e}")))?;

    if !response.status().is_success() {
        return Err(GridError::CatalogUnavailable(format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| GridError::CatalogUnavailable(format!("{url}: {e}")))
}

/// Slot → raw records, keeping the order keys appear in the document.
struct OrderedSlots(Vec<(String, Vec<serde_json::Value>)>);

impl<'de> Deserialize<'de> for OrderedSlots {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotsVisitor;

        impl<'de> Visitor<'de> for SlotsVisitor {
            type Value = OrderedSlots;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping time slots to lists of talks")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut slots = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((slot, talks)) = map.next_entry::<String, Vec<serde_json::Value>>()? {
                    if slots.iter().any(|(seen, _)| *seen == slot) {
                        return Err(de::Error::custom(format!("duplicate time slot '{slot}'")));
                    }
                    slots.push((slot, talks));
                }
                Ok(OrderedSlots(slots))
            }
        }

        deserializer.deserialize_map(SlotsVisitor)
    }
}
