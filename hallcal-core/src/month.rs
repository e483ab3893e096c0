//! The displayed calendar month.

use std::fmt;

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};

/// A (year, month) pair with a zero-based month, 0 = January.
///
/// This is the unit the calendar is rendered and expanded in. Internally it
/// is held as the first day of the month, so every value is a real month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// Returns `None` when `month0` is not in 0..=11 or the year is outside
    /// chrono's supported range.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)?;
        Some(CalendarMonth { first })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        CalendarMonth {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    /// Parse `YYYY-MM` (one-based month, as written by people).
    pub fn parse(s: &str) -> Result<Self, String> {
        let invalid = || format!("Invalid month '{}'. Expected YYYY-MM", s);

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if month == 0 {
            return Err(invalid());
        }

        CalendarMonth::new(year, month - 1).ok_or_else(invalid)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month.
    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days().last().unwrap_or(self.first)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month0() == self.month0()
    }

    /// Every day of the month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take_while(move |d| self.contains(*d))
    }

    /// The following month. Saturates at the end of chrono's date range.
    pub fn next(&self) -> Self {
        self.last_day()
            .succ_opt()
            .map_or(*self, CalendarMonth::from_date)
    }

    /// The preceding month. Saturates at the start of chrono's date range.
    pub fn prev(&self) -> Self {
        self.first
            .pred_opt()
            .map_or(*self, CalendarMonth::from_date)
    }

    /// All dates in this month falling on `weekday`, ascending.
    pub fn weekday_occurrences(&self, weekday: Weekday) -> Vec<NaiveDate> {
        let first = self.first_day();
        let offset = (7 + weekday.num_days_from_sunday() - first.weekday().num_days_from_sunday()) % 7;

        let mut dates = Vec::with_capacity(5);
        let mut next = first.checked_add_days(Days::new(u64::from(offset)));
        while let Some(date) = next.filter(|d| self.contains(*d)) {
            dates.push(date);
            next = date.checked_add_days(Days::new(7));
        }
        dates
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_range_month() {
        assert!(CalendarMonth::new(2026, 11).is_some());
        assert!(CalendarMonth::new(2026, 12).is_none());
    }

    #[test]
    fn test_parse_is_one_based() {
        let month = CalendarMonth::parse("2026-03").unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month0(), 2);
        assert_eq!(month.to_string(), "2026-03");

        assert!(CalendarMonth::parse("2026-00").is_err());
        assert!(CalendarMonth::parse("2026-13").is_err());
        assert!(CalendarMonth::parse("march").is_err());
    }

    #[test]
    fn test_last_day_handles_february_and_december() {
        assert_eq!(CalendarMonth::new(2026, 1).unwrap().last_day(), date(2026, 2, 28));
        assert_eq!(CalendarMonth::new(2028, 1).unwrap().last_day(), date(2028, 2, 29));
        assert_eq!(CalendarMonth::new(2026, 11).unwrap().last_day(), date(2026, 12, 31));
    }

    #[test]
    fn test_next_and_prev_wrap_years() {
        let dec = CalendarMonth::new(2025, 11).unwrap();
        assert_eq!(dec.next(), CalendarMonth::new(2026, 0).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_days_covers_whole_month() {
        let days: Vec<_> = CalendarMonth::new(2026, 3).unwrap().days().collect();
        assert_eq!(days.len(), 30);
        assert_eq!(days[0], date(2026, 4, 1));
        assert_eq!(days[29], date(2026, 4, 30));
    }

    #[test]
    fn test_weekday_occurrences_march_2026_thursdays() {
        let thursdays = CalendarMonth::new(2026, 2)
            .unwrap()
            .weekday_occurrences(Weekday::Thu);
        assert_eq!(
            thursdays,
            vec![date(2026, 3, 5), date(2026, 3, 12), date(2026, 3, 19), date(2026, 3, 26)]
        );
    }

    #[test]
    fn test_weekday_occurrences_when_month_starts_on_that_day() {
        // 1 January 2026 is a Thursday
        let thursdays = CalendarMonth::new(2026, 0)
            .unwrap()
            .weekday_occurrences(Weekday::Thu);
        assert_eq!(thursdays.len(), 5);
        assert_eq!(thursdays[0], date(2026, 1, 1));
        assert_eq!(thursdays[4], date(2026, 1, 29));
    }
}
