use std::path::Path;

use anyhow::{Context, Result};
use hallcal_core::config::HallConfig;
use hallcal_core::ics::generate_month_ics;
use hallcal_core::store::LocalStore;
use hallcal_core::{CalendarMonth, DayIndex};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(
    config: &HallConfig,
    store: &LocalStore,
    month: CalendarMonth,
    output: Option<&Path>,
) -> Result<()> {
    let items = store.scheduled_items()?;
    let index = DayIndex::build(&items, month);
    let ics = generate_month_ics(&index, &config.calendar_name, config.tz()?)?;

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!(
                "{}",
                format!(
                    "  Exported {} occurrences in {} to {}",
                    index.total_occurrences(),
                    month.render(),
                    path.display()
                )
                .green()
            );
        }
        None => print!("{}", ics),
    }

    Ok(())
}
