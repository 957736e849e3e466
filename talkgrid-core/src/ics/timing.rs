//! Start and end times of selected talks.

use std::collections::BTreeMap;

use chrono::NaiveTime;

use crate::catalog::Talk;
use crate::config::parse_clock;
use crate::error::GridResult;
use crate::slots::SlotAdjacency;

/// When a talk starting at `slot` ends.
///
/// Workshops end where the slot two positions later begins. Other talks use
/// the end-time table, then the start of the next slot, then `fallback`.
/// A workshop in one of the last two slots falls through to the same rules.
pub fn end_time(
    slot: &str,
    talk: &Talk,
    slots: &SlotAdjacency,
    table: &BTreeMap<String, String>,
    fallback: NaiveTime,
) -> GridResult<NaiveTime> {
    if talk.is_workshop {
        if let Some(end) = slots.nth_after(slot, 2) {
            return parse_clock(end);
        }
    }

    if let Some(end) = table.get(slot) {
        return parse_clock(end);
    }

    if let Some(next) = slots.next(slot) {
        return parse_clock(next);
    }

    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SLOT_END_TIMES;

    fn talk(is_workshop: bool) -> Talk {
        Talk {
            title: "T".into(),
            track: "Iniciante".into(),
            card_image: "t.png".into(),
            is_workshop,
        }
    }

    fn table() -> BTreeMap<String, String> {
        DEFAULT_SLOT_END_TIMES
            .iter()
            .map(|(s, e)| (s.to_string(), e.to_string()))
            .collect()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn workshop_spans_two_slots() {
        let slots = SlotAdjacency::new(["10:00", "10:50", "11:40", "13:40"]);
        let end = end_time("10:00", &talk(true), &slots, &table(), at(17, 0)).unwrap();
        assert_eq!(end, at(11, 40));
    }

    #[test]
    fn regular_talk_uses_the_table() {
        let slots = SlotAdjacency::new(["10:00", "10:50", "11:40", "13:40"]);
        let end = end_time("11:40", &talk(false), &slots, &table(), at(17, 0)).unwrap();
        assert_eq!(end, at(12, 30));
    }

    #[test]
    fn unmapped_slot_uses_next_slot_start() {
        let slots = SlotAdjacency::new(["09:00", "09:30"]);
        let end = end_time("09:00", &talk(false), &slots, &table(), at(17, 0)).unwrap();
        assert_eq!(end, at(9, 30));
    }

    #[test]
    fn unmapped_last_slot_falls_back() {
        let slots = SlotAdjacency::new(["10:00", "10:50", "11:40", "13:40", "14:30", "15:20"]);
        let mut table = table();
        table.remove("15:20");
        let end = end_time("15:20", &talk(false), &slots, &table, at(17, 0)).unwrap();
        assert_eq!(end, at(17, 0));
    }

    #[test]
    fn late_workshop_falls_through_to_table() {
        let slots = SlotAdjacency::new(["10:00", "10:50", "11:40", "13:40", "14:30", "15:20"]);
        let end = end_time("14:30", &talk(true), &slots, &table(), at(17, 0)).unwrap();
        assert_eq!(end, at(15, 20));
    }
}
