use anyhow::Result;
use hallcal_core::store::LocalStore;
use hallcal_core::{CalendarMonth, DayIndex};
use owo_colors::OwoColorize;

use crate::render::{Render, day_dots, render_month_grid};

pub fn run(store: &LocalStore, month: CalendarMonth, json: bool) -> Result<()> {
    let items = store.scheduled_items()?;
    let index = DayIndex::build(&items, month);

    if json {
        println!("{}", serde_json::to_string_pretty(&index)?);
        return Ok(());
    }

    println!("{}", render_month_grid(month, &index));
    println!();

    if index.is_empty() {
        println!("{}", format!("Nothing on in {}", month.render()).dimmed());
        return Ok(());
    }

    for (date, occurrences) in index.iter() {
        let titles: Vec<&str> = occurrences.iter().map(|o| o.title.as_str()).collect();
        let label = date.format("%a %b %-d").to_string();
        let label = if month.contains(date) { label.bold().to_string() } else { label.dimmed().to_string() };
        println!("  {}  {} {}", label, day_dots(occurrences), titles.join(", "));
    }

    Ok(())
}
