//! ICS generation for a day index.

use chrono::{Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Property, ValueType};

use crate::day_index::{DayIndex, Occurrence};
use crate::error::{HallError, HallResult};
use crate::item::ItemKind;

/// Timed occurrences without an end time are exported as this long.
const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Generate a VCALENDAR with one VEVENT per occurrence in `index`.
///
/// Timed occurrences are written as local times in `tz`; untimed ones
/// become all-day events.
pub fn generate_month_ics(index: &DayIndex, calendar_name: &str, tz: Tz) -> HallResult<String> {
    let mut cal = Calendar::new();
    cal.name(calendar_name);
    cal.timezone(tz.name());

    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for (_, occurrences) in index.iter() {
        for occurrence in occurrences {
            cal.push(occurrence_to_vevent(occurrence, tz, &dtstamp)?);
        }
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

fn occurrence_to_vevent(
    occurrence: &Occurrence,
    tz: Tz,
    dtstamp: &str,
) -> HallResult<icalendar::Event> {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&occurrence_uid(occurrence));
    ics_event.summary(&occurrence.title);
    ics_event.add_property("DTSTAMP", dtstamp);

    match occurrence.start_time {
        Some(start_time) => {
            let start = occurrence.date.and_time(start_time);
            let end = match occurrence.end_time {
                Some(end_time) if end_time > start_time => occurrence.date.and_time(end_time),
                _ => start
                    .checked_add_signed(Duration::minutes(DEFAULT_DURATION_MINUTES))
                    .ok_or_else(|| {
                        HallError::IcsGenerate(format!("end time out of range for {}", occurrence.id))
                    })?,
            };
            add_zoned_property(&mut ics_event, "DTSTART", start, tz);
            add_zoned_property(&mut ics_event, "DTEND", end, tz);
        }
        None => {
            let next_day = occurrence.date.succ_opt().ok_or_else(|| {
                HallError::IcsGenerate(format!("date out of range for {}", occurrence.id))
            })?;
            add_date_property(&mut ics_event, "DTSTART", occurrence.date);
            add_date_property(&mut ics_event, "DTEND", next_day);
        }
    }

    let description = [occurrence.description.as_deref(), occurrence.schedule_text.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n\n");
    if !description.is_empty() {
        ics_event.description(&description);
    }

    let category = match occurrence.kind {
        ItemKind::OneTime => "EVENT",
        ItemKind::Recurring => "ACTIVITY",
    };
    ics_event.add_property("CATEGORIES", category);

    Ok(ics_event.done())
}

/// Occurrence ids restart every month, so the UID is keyed on the item and
/// the date instead.
fn occurrence_uid(occurrence: &Occurrence) -> String {
    format!("{}-{}@hallcal", occurrence.item_id, occurrence.date.format("%Y%m%d"))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with HALLCAL
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:HALLCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_zoned_property(ics_event: &mut icalendar::Event, name: &str, datetime: NaiveDateTime, tz: Tz) {
    let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", tz.name());
    ics_event.append_property(prop);
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: chrono::NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
