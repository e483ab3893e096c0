//! Free-text schedule expansion.
//!
//! Regular activities carry an admin-written schedule such as "Thursdays 10am"
//! or "First Saturday of every month". This module turns that text into the
//! concrete dates it denotes within one calendar month, and pulls a default
//! start time out of it.
//!
//! Parsing is permissive: text that matches nothing ("Various times",
//! "Monthly") simply expands to no dates.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, Weekday};
use regex::Regex;

use crate::month::CalendarMonth;

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinal {
    /// Pick this occurrence out of a month's ascending weekday dates.
    fn select(self, dates: &[NaiveDate]) -> Option<NaiveDate> {
        let index = match self {
            Ordinal::First => 0,
            Ordinal::Second => 1,
            Ordinal::Third => 2,
            Ordinal::Fourth => 3,
            Ordinal::Last => return dates.last().copied(),
        };
        dates.get(index).copied()
    }
}

/// Weekday vocabulary, scanned in this order.
const WEEKDAY_WORDS: [(&str, Weekday); 14] = [
    ("sunday", Weekday::Sun),
    ("sundays", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("mondays", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tuesdays", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wednesdays", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thursdays", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fridays", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("saturdays", Weekday::Sat),
];

/// Ordinal vocabulary, scanned in this order.
const ORDINAL_WORDS: [(&str, Ordinal); 9] = [
    ("first", Ordinal::First),
    ("1st", Ordinal::First),
    ("second", Ordinal::Second),
    ("2nd", Ordinal::Second),
    ("third", Ordinal::Third),
    ("3rd", Ordinal::Third),
    ("fourth", Ordinal::Fourth),
    ("4th", Ordinal::Fourth),
    ("last", Ordinal::Last),
];

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?\s*(am|pm)").expect("Invalid regex")
});

/// A recognised recurrence pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    /// "First Saturday", "Last Wednesday of the month"
    Nth { ordinal: Ordinal, weekday: Weekday },
    /// "Thursdays", "Every Tuesday"
    Weekly(Weekday),
}

impl Recurrence {
    /// Recognise a schedule description.
    ///
    /// Ordinal patterns are tried before bare weekdays. When the text holds
    /// several candidates, the first entry of each vocabulary table that
    /// appears in the text wins, regardless of where it sits in the text.
    pub fn parse(text: &str) -> Option<Recurrence> {
        let lowered = text.to_lowercase();
        let words: HashSet<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let weekday = WEEKDAY_WORDS
            .iter()
            .find(|(word, _)| words.contains(word))
            .map(|(_, day)| *day)?;

        let ordinal = ORDINAL_WORDS
            .iter()
            .find(|(word, _)| words.contains(word))
            .map(|(_, ordinal)| *ordinal);

        Some(match ordinal {
            Some(ordinal) => Recurrence::Nth { ordinal, weekday },
            None => Recurrence::Weekly(weekday),
        })
    }

    /// The dates this pattern denotes within `month`, ascending.
    pub fn dates_in(&self, month: CalendarMonth) -> Vec<NaiveDate> {
        match *self {
            Recurrence::Weekly(weekday) => month.weekday_occurrences(weekday),
            Recurrence::Nth { ordinal, weekday } => ordinal
                .select(&month.weekday_occurrences(weekday))
                .into_iter()
                .collect(),
        }
    }
}

/// Expand a schedule description into its dates for one month.
///
/// `month0` is zero-based (0 = January). An invalid month, or text that
/// matches no pattern, yields an empty list. An ordinal the month cannot
/// satisfy also yields an empty list rather than falling back to every
/// occurrence of the weekday.
pub fn expand_schedule(text: &str, year: i32, month0: u32) -> Vec<NaiveDate> {
    let Some(month) = CalendarMonth::new(year, month0) else {
        return Vec::new();
    };
    expand_in_month(text, month)
}

/// [`expand_schedule`] for an already validated month.
pub fn expand_in_month(text: &str, month: CalendarMonth) -> Vec<NaiveDate> {
    let dates = Recurrence::parse(text)
        .map(|recurrence| recurrence.dates_in(month))
        .unwrap_or_default();

    log::debug!("schedule '{}' in {}: {} date(s)", text, month, dates.len());
    dates
}

/// Pull a clock time such as "10am", "2:30pm" or "7 pm" out of free text.
///
/// The first well-formed time wins; hours must be 1 to 12 and minutes 0 to 59.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    TIME_PATTERN.captures_iter(text).find_map(|caps| {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if !(1..=12).contains(&hour) {
            return None;
        }

        let hour = match (hour, caps[3].eq_ignore_ascii_case("pm")) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        NaiveTime::from_hms_opt(hour, minute, 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hhmm(text: &str) -> Option<String> {
        parse_time_of_day(text).map(|t| t.format("%H:%M").to_string())
    }

    #[test]
    fn test_first_saturday_january_2026() {
        assert_eq!(
            expand_schedule("First Saturday of every month", 2026, 0),
            vec![date(2026, 1, 3)]
        );
    }

    #[test]
    fn test_last_wednesday_february_2026() {
        assert_eq!(
            expand_schedule("Last Wednesday of the month", 2026, 1),
            vec![date(2026, 2, 25)]
        );
    }

    #[test]
    fn test_abbreviated_ordinals() {
        assert_eq!(expand_schedule("2nd Tuesday", 2026, 2), vec![date(2026, 3, 10)]);
        assert_eq!(expand_schedule("3rd friday", 2026, 2), vec![date(2026, 3, 20)]);
        assert_eq!(expand_schedule("4th Monday", 2026, 2), vec![date(2026, 3, 23)]);
    }

    #[test]
    fn test_last_is_final_occurrence_not_fifth() {
        // March 2026 has five Sundays; "last" is the 29th.
        assert_eq!(expand_schedule("Last Sunday", 2026, 2), vec![date(2026, 3, 29)]);
        // April 2026 has four Sundays; "last" is the 26th.
        assert_eq!(expand_schedule("Last Sunday", 2026, 3), vec![date(2026, 4, 26)]);
    }

    #[test]
    fn test_weekly_plural_and_phrases() {
        let expected = vec![date(2026, 3, 5), date(2026, 3, 12), date(2026, 3, 19), date(2026, 3, 26)];
        assert_eq!(expand_schedule("Thursdays", 2026, 2), expected);
        assert_eq!(expand_schedule("Every Thursday", 2026, 2), expected);
        assert_eq!(expand_schedule("THURSDAYS 10am", 2026, 2), expected);
    }

    #[test]
    fn test_unrecognised_text_is_empty() {
        assert!(expand_schedule("Various times", 2026, 2).is_empty());
        assert!(expand_schedule("Monthly", 2026, 2).is_empty());
        assert!(expand_schedule("Weekly sessions", 2026, 2).is_empty());
        assert!(expand_schedule("", 2026, 2).is_empty());
    }

    #[test]
    fn test_ordinal_without_weekday_is_empty() {
        assert!(expand_schedule("First of the month", 2026, 2).is_empty());
    }

    #[test]
    fn test_invalid_month_is_empty() {
        assert!(expand_schedule("Thursdays", 2026, 12).is_empty());
    }

    #[test]
    fn test_matches_whole_words_only() {
        // "lasting" is not "last" and "mondayish" is not "monday"
        assert!(expand_schedule("Mondayish, lasting an hour", 2026, 2).is_empty());
        assert_eq!(
            expand_schedule("Monday, lasting an hour", 2026, 2).len(),
            5
        );
    }

    #[test]
    fn test_compound_schedule_uses_table_order() {
        // "first" precedes "third" and "monday" precedes "friday" in the
        // vocabulary tables, so only the first Monday is produced.
        assert_eq!(
            Recurrence::parse("Third Friday and First Monday"),
            Some(Recurrence::Nth {
                ordinal: Ordinal::First,
                weekday: Weekday::Mon,
            })
        );
        assert_eq!(
            expand_schedule("Third Friday and First Monday", 2026, 2),
            vec![date(2026, 3, 2)]
        );
    }

    #[test]
    fn test_unsatisfiable_ordinal_selects_nothing() {
        let tuesdays = CalendarMonth::new(2026, 1).unwrap().weekday_occurrences(Weekday::Tue);
        assert_eq!(tuesdays.len(), 4);

        assert_eq!(Ordinal::Fourth.select(&tuesdays[..3]), None);
        assert_eq!(Ordinal::Second.select(&tuesdays[..1]), None);
        assert_eq!(Ordinal::Last.select(&[]), None);
        assert_eq!(Ordinal::Last.select(&tuesdays), Some(date(2026, 2, 24)));
    }

    #[test]
    fn test_fifth_is_not_an_ordinal() {
        // "fifth" is not in the vocabulary, so this reads as every Tuesday
        assert_eq!(
            expand_schedule("Fifth Tuesday", 2026, 2),
            vec![
                date(2026, 3, 3),
                date(2026, 3, 10),
                date(2026, 3, 17),
                date(2026, 3, 24),
                date(2026, 3, 31),
            ]
        );
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(hhmm("Thursdays 10am"), Some("10:00".to_string()));
        assert_eq!(hhmm("2:30pm"), Some("14:30".to_string()));
        assert_eq!(hhmm("12am"), Some("00:00".to_string()));
        assert_eq!(hhmm("12:15pm"), Some("12:15".to_string()));
        assert_eq!(hhmm("Choir 7 PM"), Some("19:00".to_string()));
        assert_eq!(hhmm("no time here"), None);
    }

    #[test]
    fn test_parse_time_of_day_skips_non_clock_times() {
        assert_eq!(hhmm("13pm"), None);
        assert_eq!(hhmm("13pm or 9am"), Some("09:00".to_string()));
    }

    proptest! {
        #[test]
        fn prop_weekly_expansion_is_every_matching_day(year in 1970i32..2200, month0 in 0u32..12) {
            let month = CalendarMonth::new(year, month0).unwrap();
            let expected: Vec<NaiveDate> = month
                .days()
                .filter(|d| d.weekday() == Weekday::Thu)
                .collect();

            prop_assert_eq!(expand_schedule("Thursdays", year, month0), expected);
        }

        #[test]
        fn prop_ordinal_expansion_yields_at_most_one_date(
            year in 1970i32..2200,
            month0 in 0u32..12,
            ordinal in prop::sample::select(vec!["first", "second", "third", "fourth", "last"]),
            day in prop::sample::select(vec!["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"]),
        ) {
            let dates = expand_schedule(&format!("{ordinal} {day}"), year, month0);
            prop_assert_eq!(dates.len(), 1);
            prop_assert_eq!(dates[0].month0(), month0);
        }
    }
}
