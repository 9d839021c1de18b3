mod entry;
pub mod ics;
pub mod sanitize;

pub use entry::{CalendarEntry, CalendarProjection, EntryClass};
pub use ics::write_calendar;
