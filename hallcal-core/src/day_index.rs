//! Day-indexed view of one calendar month.
//!
//! The index is a pure function of the item list and the displayed month. It
//! is rebuilt whenever either changes and is never stored.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::item::{ColorTheme, EVENT_COLORS, Icon, ItemKind, ScheduledItem, ThemeColors, Timing};
use crate::month::CalendarMonth;
use crate::schedule::{expand_in_month, parse_time_of_day};

/// Format of date keys in the index.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// One concrete dated instance of a scheduled item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    /// The item id, or `{item_id}-{n}` for dates expanded from a schedule.
    pub id: String,
    pub item_id: String,
    pub kind: ItemKind,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,
    pub schedule_text: Option<String>,
    pub icon: Option<Icon>,
    pub color_theme: ColorTheme,
}

impl Occurrence {
    fn from_item(item: &ScheduledItem, id: String, date: NaiveDate) -> Self {
        Occurrence {
            id,
            item_id: item.id.clone(),
            kind: item.kind(),
            title: item.title.clone(),
            date,
            start_time: item.start_time,
            end_time: item.end_time,
            description: item.description.clone(),
            schedule_text: item.schedule_text().map(str::to_string),
            icon: item.icon,
            color_theme: item.color_theme,
        }
    }

    /// "10:00", "10:00 - 11:30", "- 11:30" or "" when untimed.
    pub fn time_label(&self) -> String {
        let fmt = |t: NaiveTime| t.format("%H:%M").to_string();
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => format!("{} - {}", fmt(start), fmt(end)),
            (Some(start), None) => fmt(start),
            (None, Some(end)) => format!("- {}", fmt(end)),
            (None, None) => String::new(),
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self.kind {
            ItemKind::OneTime => EVENT_COLORS,
            ItemKind::Recurring => self.color_theme.palette(),
        }
    }
}

/// Occurrences grouped by day. Days without occurrences are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayIndex {
    days: BTreeMap<NaiveDate, Vec<Occurrence>>,
}

static NO_OCCURRENCES: [Occurrence; 0] = [];

impl DayIndex {
    /// Aggregate `items` for the displayed `month`.
    ///
    /// One-time items and recurring items with an explicit date contribute
    /// one occurrence at that date whatever the month. Recurring items with
    /// only a schedule contribute every date it expands to in `month`; those
    /// take the time in the schedule text when the item has no start time.
    pub fn build(items: &[ScheduledItem], month: CalendarMonth) -> Self {
        DayIndex::aggregate(items, Some(month))
    }

    /// With no month, schedule-only items are skipped.
    fn aggregate(items: &[ScheduledItem], month: Option<CalendarMonth>) -> Self {
        let mut index = DayIndex::default();

        let (one_time, recurring): (Vec<_>, Vec<_>) = items
            .iter()
            .partition(|item| item.kind() == ItemKind::OneTime);

        for item in one_time.into_iter().chain(recurring) {
            match &item.timing {
                Timing::OneTime { date } | Timing::Recurring { date: Some(date), .. } => {
                    index.push(Occurrence::from_item(item, item.id.clone(), *date));
                }
                Timing::Recurring {
                    date: None,
                    schedule_text: Some(text),
                } => {
                    let Some(month) = month else { continue };
                    let default_start = item.start_time.or_else(|| parse_time_of_day(text));
                    for (n, date) in expand_in_month(text, month).into_iter().enumerate() {
                        let mut occurrence =
                            Occurrence::from_item(item, format!("{}-{}", item.id, n), date);
                        occurrence.start_time = default_start;
                        index.push(occurrence);
                    }
                }
                Timing::Recurring {
                    date: None,
                    schedule_text: None,
                } => {}
            }
        }

        log::debug!(
            "day index for {:?}: {} occurrence(s) over {} day(s) from {} item(s)",
            month.map(|m| m.to_string()),
            index.total_occurrences(),
            index.len(),
            items.len()
        );
        index
    }

    fn push(&mut self, occurrence: Occurrence) {
        self.days.entry(occurrence.date).or_default().push(occurrence);
    }

    /// Occurrences on `date`, in insertion order. Empty when none.
    pub fn occurrences_on(&self, date: NaiveDate) -> &[Occurrence] {
        self.days.get(&date).map_or(&NO_OCCURRENCES[..], Vec::as_slice)
    }

    /// Lookup by `YYYY-MM-DD` key. Unparseable keys behave like empty days.
    pub fn lookup(&self, key: &str) -> &[Occurrence] {
        match NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT) {
            Ok(date) => self.occurrences_on(date),
            Err(_) => &NO_OCCURRENCES[..],
        }
    }

    /// Days that have at least one occurrence, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Date keys (`YYYY-MM-DD`), ascending.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.days.keys().map(|d| d.format(DATE_KEY_FORMAT).to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Occurrence])> + '_ {
        self.days.iter().map(|(date, occ)| (*date, occ.as_slice()))
    }

    /// Number of days with occurrences.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_occurrences(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// Build the day index for a zero-based `month0` of `year`.
///
/// An invalid month still indexes dated items; only schedule expansion
/// is skipped.
pub fn build_day_index(items: &[ScheduledItem], year: i32, month0: u32) -> DayIndex {
    DayIndex::aggregate(items, CalendarMonth::new(year, month0))
}
