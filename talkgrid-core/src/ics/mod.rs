//! iCalendar export of the selected talks.
//!
//! Output follows RFC 5545 and always uses CRLF line endings.

mod generate;
mod timing;

pub use generate::{IcsOptions, event_uid, generate_ics};
pub use timing::end_time;
