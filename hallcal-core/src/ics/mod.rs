//! ICS export.
//!
//! Writes a day index out as an RFC 5545 calendar so the hall's schedule can
//! be subscribed to from other calendar apps.

mod generate;

pub use generate::generate_month_ics;
