//! ICS file generation.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::catalog::{Catalog, Talk};
use crate::config::{GridConfig, parse_clock};
use crate::error::{GridError, GridResult};
use crate::ics::timing::end_time;
use crate::selection::Selection;

/// Fixed event details stamped onto every exported talk.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    pub event_date: NaiveDate,
    pub location: String,
    pub uid_domain: String,
    pub prodid: String,
    pub slot_end_times: BTreeMap<String, String>,
    pub fallback_end: NaiveTime,
    /// DTSTAMP for every VEVENT.
    pub stamp: DateTime<Utc>,
}

impl IcsOptions {
    pub fn from_config(config: &GridConfig) -> GridResult<Self> {
        Ok(IcsOptions {
            event_date: config.event_date()?,
            location: config.location.clone(),
            uid_domain: config.uid_domain.clone(),
            prodid: config.prodid.clone(),
            slot_end_times: config.slot_end_times.clone(),
            fallback_end: config.fallback_end()?,
            stamp: Utc::now(),
        })
    }
}

/// `{slot}-{title without whitespace}@{domain}`
pub fn event_uid(slot: &str, title: &str, domain: &str) -> String {
    let compact: String = title.split_whitespace().collect();
    format!("{slot}-{compact}@{domain}")
}

/// Generate a VCALENDAR with one VEVENT per selected talk, earliest first.
pub fn generate_ics(
    catalog: &Catalog,
    selection: &Selection,
    options: &IcsOptions,
) -> GridResult<String> {
    if selection.is_empty() {
        return Err(GridError::EmptySelection);
    }

    let mut entries: Vec<(NaiveTime, &str, &Talk)> = Vec::with_capacity(selection.len());
    for (slot, talk_id) in selection.iter() {
        let Some(talk) = catalog.find_talk(slot, talk_id) else {
            tracing::warn!(slot, talk_id, "selected talk not in catalog, skipping");
            continue;
        };
        let start = parse_clock(slot).map_err(|e| GridError::IcsGenerate(e.to_string()))?;
        entries.push((start, slot, talk));
    }
    entries.sort_by_key(|(start, _, _)| *start);

    let mut cal = Calendar::new();

    for (start, slot, talk) in entries {
        let end = end_time(
            slot,
            talk,
            catalog.adjacency(),
            &options.slot_end_times,
            options.fallback_end,
        )
        .map_err(|e| GridError::IcsGenerate(e.to_string()))?;

        let mut event = icalendar::Event::new();
        event.uid(&event_uid(slot, &talk.title, &options.uid_domain));
        event.add_property("DTSTAMP", options.stamp.format("%Y%m%dT%H%M%SZ").to_string());
        event.add_property("DTSTART", floating(options.event_date, start));
        event.add_property("DTEND", floating(options.event_date, end));
        event.summary(&talk.title);
        event.location(&options.location);
        event.description(&format!("Palestra na Trilha {}", talk.track));

        cal.push(event.done());
    }

    let cal = cal.done();
    Ok(normalize_output(&cal.to_string(), &options.prodid))
}

/// Local wall-clock time without a zone, e.g. `20251108T100000`.
fn floating(date: NaiveDate, time: NaiveTime) -> String {
    NaiveDateTime::new(date, time)
        .format("%Y%m%dT%H%M%S")
        .to_string()
}

/// Post-process the icalendar crate's output
/// - Replace PRODID with ours
/// - Force CRLF line endings
fn normalize_output(ics: &str, prodid: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prodid);
            result.push_str("\r\n");
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
