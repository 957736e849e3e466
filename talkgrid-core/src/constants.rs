//! Fixed values shared across talkgrid.

/// Record names in the local store.
pub const SCHEDULE_KEY: &str = "devfest_schedule";
pub const PREFERENCES_KEY: &str = "devfest_preferences";

/// Query parameter carrying an encoded selection in share links.
pub const SHARE_QUERY_PARAM: &str = "schedule";

pub const DEFAULT_SHARE_BASE_URL: &str = "https://devfestbh.github.io/grade/";
pub const DEFAULT_EVENT_DATE: &str = "2025-11-08";
pub const DEFAULT_LOCATION: &str = "Puc Minas - Lourdes - Av. Brasil, 2023";
pub const DEFAULT_UID_DOMAIN: &str = "devfest.bh";
pub const DEFAULT_PRODID: &str = "-//DevFestBH//Organizador de Grade v1.0//PT";
pub const DEFAULT_FALLBACK_END: &str = "17:00";
pub const CALENDAR_FILENAME: &str = "minha-grade-devfest-bh.ics";

/// End of each slot when it holds a regular talk.
pub const DEFAULT_SLOT_END_TIMES: &[(&str, &str)] = &[
    ("10:00", "10:50"),
    ("10:50", "11:40"),
    ("11:40", "12:30"),
    ("13:40", "14:30"),
    ("14:30", "15:20"),
    ("15:20", "16:10"),
];

/// Grid geometry in unscaled pixels.
pub mod layout {
    pub const SLOT_WIDTH: u32 = 317;
    pub const SLOT_HEIGHT: u32 = 64;
    pub const WORKSHOP_HEIGHT: u32 = 130;
    pub const SLOT_LEFT: u32 = 24;
    pub const FIRST_SLOT_TOP: u32 = 120;
    pub const SLOT_PITCH: u32 = 70;
    pub const CANVAS_WIDTH: u32 = SLOT_LEFT * 2 + SLOT_WIDTH;
    pub const BOTTOM_MARGIN: u32 = 24;
}

pub const CAPTURE_SCALE: u32 = 3;
pub const CAPTURE_FILENAME: &str = "minha-grade-devfest-bh.png";
