use anyhow::Result;
use hallcal_core::schedule::expand_in_month;
use hallcal_core::{CalendarMonth, Recurrence, parse_time_of_day};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(schedule: &str, month: CalendarMonth) -> Result<()> {
    let Some(recurrence) = Recurrence::parse(schedule) else {
        println!("{}", "No recognised schedule pattern".dimmed());
        return Ok(());
    };

    println!("{} {}", "Pattern:".bold(), describe(recurrence));
    if let Some(time) = parse_time_of_day(schedule) {
        println!("{} {}", "Time:   ".bold(), time.format("%H:%M"));
    }
    println!();

    let dates = expand_in_month(schedule, month);
    if dates.is_empty() {
        println!("{}", format!("No dates in {}", month.render()).dimmed());
        return Ok(());
    }

    for date in dates {
        println!("  {}", date.format("%a %-d %b %Y"));
    }

    Ok(())
}

fn describe(recurrence: Recurrence) -> String {
    match recurrence {
        Recurrence::Nth { ordinal, weekday } => format!("{:?} {:?} of the month", ordinal, weekday),
        Recurrence::Weekly(weekday) => format!("every {:?}", weekday),
    }
}
