//! Core types for hallcal, the village hall calendar.
//!
//! - `schedule` expands free-text recurrence descriptions into dates
//! - `day_index` aggregates events and activities into a per-day view
//! - `records` and `store` hold the persisted events and regular activities
//! - `config` and `ics` cover configuration and calendar export

pub mod config;
pub mod day_index;
pub mod error;
pub mod ics;
pub mod item;
pub mod month;
pub mod records;
pub mod schedule;
pub mod store;

pub use day_index::{DayIndex, Occurrence, build_day_index};
pub use error::{HallError, HallResult};
pub use item::{ColorTheme, Icon, ItemKind, ScheduledItem, Timing};
pub use month::CalendarMonth;
pub use schedule::{Recurrence, expand_schedule, parse_time_of_day};
