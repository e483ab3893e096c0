use anyhow::Result;
use chrono::{Local, NaiveDate};
use hallcal_core::CalendarMonth;

/// Parse a `YYYY-MM` argument, or fall back to the current month.
pub fn resolve_month(arg: Option<&str>) -> Result<CalendarMonth> {
    match arg {
        Some(s) => CalendarMonth::parse(s).map_err(|e| anyhow::anyhow!(e)),
        None => Ok(CalendarMonth::from_date(Local::now().date_naive())),
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse an optional date flag.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
    s.map(parse_date).transpose()
}
