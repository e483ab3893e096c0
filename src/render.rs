//! TUI rendering for hallcal types.
//!
//! Theme colours are stored as hex strings so the same palette drives the
//! terminal output; they are painted with owo_colors truecolor.

use chrono::{Datelike, NaiveDate};
use hallcal_core::day_index::{DayIndex, Occurrence};
use hallcal_core::CalendarMonth;
use owo_colors::OwoColorize;

/// Dots shown for a day before the rest collapse into "+N".
pub const MAX_DAY_DOTS: usize = 3;

/// Width of the month grid: seven cells of two digits plus separators.
const GRID_WIDTH: usize = 20;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Occurrence {
    fn render(&self) -> String {
        let colors = self.colors();
        let icon = self.icon.map_or(" ", |icon| icon.glyph());
        let time = self.time_label();
        let time = if time.is_empty() { "all-day".to_string() } else { time };

        let mut line = format!(
            "{} {:>13}  {} {}",
            paint("●", colors.dot),
            time,
            icon,
            paint(&self.title, colors.text).bold()
        );
        if let Some(schedule) = &self.schedule_text {
            line.push_str(&format!("  {}", schedule.dimmed()));
        }
        line
    }
}

impl Render for CalendarMonth {
    fn render(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// Up to [`MAX_DAY_DOTS`] coloured dots, then "+N" for the rest.
pub fn day_dots(occurrences: &[Occurrence]) -> String {
    let mut dots: String = occurrences
        .iter()
        .take(MAX_DAY_DOTS)
        .map(|o| paint("●", o.colors().dot))
        .collect();

    let hidden = occurrences.len().saturating_sub(MAX_DAY_DOTS);
    if hidden > 0 {
        dots.push_str(&format!("+{}", hidden).dimmed().to_string());
    }
    dots
}

/// A Sunday-first month grid. Days with something on are painted in the
/// colour of their first occurrence.
pub fn render_month_grid(month: CalendarMonth, index: &DayIndex) -> String {
    let mut lines = vec![
        format!("{:^width$}", month.render(), width = GRID_WIDTH).bold().to_string(),
        "Su Mo Tu We Th Fr Sa".dimmed().to_string(),
    ];

    let lead = month.first_day().weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<String> = vec!["  ".to_string(); lead];

    for date in month.days() {
        cells.push(render_day_cell(date, index.occurrences_on(date)));
        if cells.len() == 7 {
            lines.push(cells.join(" "));
            cells.clear();
        }
    }
    if !cells.is_empty() {
        lines.push(cells.join(" "));
    }

    lines.join("\n")
}

fn render_day_cell(date: NaiveDate, occurrences: &[Occurrence]) -> String {
    let day = format!("{:>2}", date.day());
    match occurrences.first() {
        Some(first) => paint(&day, first.colors().dot).bold().to_string(),
        None => day,
    }
}

/// Paint `text` with a "#rrggbb" colour. Malformed colours leave it plain.
fn paint(text: &str, hex: &str) -> String {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
