use anyhow::Result;
use clap::{Args, Subcommand};
use hallcal_core::records::{Event, EventDraft};
use hallcal_core::store::LocalStore;
use owo_colors::OwoColorize;

use crate::utils::parse_date;

#[derive(Subcommand)]
pub enum EventCommands {
    /// List all events, earliest first
    List,
    /// Add a one-off event
    Add(EventFields),
    /// Replace the details of an event
    Update {
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete { id: String },
}

#[derive(Args)]
pub struct EventFields {
    title: String,

    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    date: String,

    /// Start time (HH:MM)
    #[arg(long)]
    start: Option<String>,

    /// End time (HH:MM)
    #[arg(long)]
    end: Option<String>,

    #[arg(short, long)]
    location: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Free-form event type, e.g. "community"
    #[arg(long = "type")]
    event_type: Option<String>,
}

impl EventFields {
    fn into_draft(self) -> Result<EventDraft> {
        Ok(EventDraft {
            title: self.title,
            description: self.description,
            date: Some(parse_date(&self.date)?),
            start_time: self.start,
            end_time: self.end,
            location: self.location,
            event_type: self.event_type,
        })
    }
}

pub fn run(store: &LocalStore, command: EventCommands) -> Result<()> {
    match command {
        EventCommands::List => list(store),
        EventCommands::Add(fields) => {
            let event = store.add_event(fields.into_draft()?)?;
            println!("{}", format!("  Created: {}", event.title).green());
            println!("  {}", event.id.dimmed());
            Ok(())
        }
        EventCommands::Update { id, fields } => {
            let event = store.update_event(&id, fields.into_draft()?)?;
            println!("{}", format!("  Updated: {}", event.title).yellow());
            Ok(())
        }
        EventCommands::Delete { id } => {
            store.delete_event(&id)?;
            println!("{}", format!("  Deleted: {}", id).red());
            Ok(())
        }
    }
}

fn list(store: &LocalStore) -> Result<()> {
    let events = store.events()?;

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date = None;

    for event in &events {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", event.date.format("%a %b %-d %Y").bold());
            current_date = Some(event.date);
        }
        println!("  {}", format_event_line(event));
    }

    Ok(())
}

/// "19:30 Quiz Night @ Main hall [community] (id)"
fn format_event_line(event: &Event) -> String {
    let time = event.start_time.as_deref().unwrap_or("all-day");
    let mut line = format!("{:>7} {}", time, event.title);

    if let Some(location) = &event.location {
        line.push_str(&format!(" @ {}", location));
    }
    if let Some(event_type) = &event.event_type {
        line.push_str(&format!(" [{}]", event_type));
    }
    line.push_str(&format!(" {}", format!("({})", event.id).dimmed()));
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, date: &str) -> EventFields {
        EventFields {
            title: title.into(),
            date: date.into(),
            start: Some("19:30".into()),
            end: None,
            location: Some("Main hall".into()),
            description: None,
            event_type: Some("community".into()),
        }
    }

    #[test]
    fn add_update_delete_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        run(&store, EventCommands::Add(fields("Quiz Night", "2026-03-07"))).unwrap();
        let events = store.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_time.as_deref(), Some("19:30"));

        let id = events[0].id.clone();
        run(
            &store,
            EventCommands::Update {
                id: id.clone(),
                fields: fields("Big Quiz Night", "2026-03-14"),
            },
        )
        .unwrap();
        let events = store.events().unwrap();
        assert_eq!(events[0].title, "Big Quiz Night");
        assert_eq!(events[0].id, id);

        run(&store, EventCommands::Delete { id }).unwrap();
        assert!(store.events().unwrap().is_empty());
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(fields("Quiz Night", "7th March").into_draft().is_err());
    }

    #[test]
    fn delete_unknown_event_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(run(&store, EventCommands::Delete { id: "nope".into() }).is_err());
    }

    #[test]
    fn event_line_includes_location_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let event = store
            .add_event(fields("Quiz Night", "2026-03-07").into_draft().unwrap())
            .unwrap();

        let line = format_event_line(&event);
        assert!(line.contains("19:30 Quiz Night @ Main hall [community]"));
    }
}
