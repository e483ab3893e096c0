use anyhow::Result;
use chrono::NaiveDate;
use hallcal_core::store::LocalStore;
use hallcal_core::{CalendarMonth, DayIndex};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &LocalStore, date: NaiveDate) -> Result<()> {
    let items = store.scheduled_items()?;
    let index = DayIndex::build(&items, CalendarMonth::from_date(date));

    println!("{}", date.format("%A %-d %B %Y").bold());

    let occurrences = index.occurrences_on(date);
    if occurrences.is_empty() {
        println!("  {}", "No activities scheduled for this day.".dimmed());
        return Ok(());
    }

    for occurrence in occurrences {
        println!("  {}", occurrence.render());
        if let Some(description) = &occurrence.description {
            println!("  {:>15}  {}", "", description.dimmed());
        }
    }

    Ok(())
}
