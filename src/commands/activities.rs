use anyhow::Result;
use clap::{Args, Subcommand};
use hallcal_core::records::{ActionType, RegularActivity, RegularActivityDraft};
use hallcal_core::store::LocalStore;
use hallcal_core::{ColorTheme, Icon};
use owo_colors::OwoColorize;

use crate::utils::parse_optional_date;

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// List all regular activities
    List,
    /// Add a regular activity
    Add(ActivityFields),
    /// Replace the details of a regular activity
    Update {
        id: String,

        #[command(flatten)]
        fields: ActivityFields,
    },
    /// Delete a regular activity
    Delete { id: String },
    /// Add the stock set of village hall activities
    Seed,
}

#[derive(Args)]
pub struct ActivityFields {
    title: String,

    /// Free-text schedule, e.g. "Thursdays 10am" or "First Saturday"
    #[arg(short, long)]
    schedule: Option<String>,

    /// A single date (YYYY-MM-DD) that overrides the schedule
    #[arg(short, long)]
    date: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    start: Option<String>,

    /// End time (HH:MM)
    #[arg(long)]
    end: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Coffee, Palette, Music, Users, Star, BookOpen, Heart or Smile
    #[arg(long, default_value = "Coffee")]
    icon: String,

    /// forest, sage, olive, moss, stone, slate, charcoal or warm
    #[arg(long, default_value = "sage")]
    color: String,

    /// none, button or link
    #[arg(long, default_value = "none")]
    action: String,

    /// Label for the action button or link
    #[arg(long)]
    action_text: Option<String>,

    /// Where the action button or link points
    #[arg(long)]
    action_link: Option<String>,
}

impl ActivityFields {
    fn into_draft(self) -> Result<RegularActivityDraft> {
        let icon = Icon::from_name(&self.icon).ok_or_else(|| {
            let available: Vec<_> = Icon::ALL.iter().map(|i| i.name()).collect();
            anyhow::anyhow!("Unknown icon '{}'. Available: {}", self.icon, available.join(", "))
        })?;
        let action_type = ActionType::from_name(&self.action).ok_or_else(|| {
            anyhow::anyhow!("Unknown action '{}'. Expected none, button or link", self.action)
        })?;

        Ok(RegularActivityDraft {
            title: self.title,
            description: self.description,
            icon,
            schedule: self.schedule,
            schedule_date: parse_optional_date(self.date.as_deref())?,
            start_time: self.start,
            end_time: self.end,
            color_theme: ColorTheme::from_name(&self.color),
            action_type,
            action_text: self.action_text,
            action_link: self.action_link,
        })
    }
}

pub fn run(store: &LocalStore, command: ActivityCommands) -> Result<()> {
    match command {
        ActivityCommands::List => list(store),
        ActivityCommands::Add(fields) => {
            let activity = store.add_regular_activity(fields.into_draft()?)?;
            println!("{}", format!("  Created: {}", activity.title).green());
            println!("  {}", activity.id.dimmed());
            Ok(())
        }
        ActivityCommands::Update { id, fields } => {
            let activity = store.update_regular_activity(&id, fields.into_draft()?)?;
            println!("{}", format!("  Updated: {}", activity.title).yellow());
            Ok(())
        }
        ActivityCommands::Delete { id } => {
            store.delete_regular_activity(&id)?;
            println!("{}", format!("  Deleted: {}", id).red());
            Ok(())
        }
        ActivityCommands::Seed => {
            let added = store.seed_default_activities()?;
            for activity in &added {
                println!("{}", format!("  Created: {}", activity.title).green());
            }
            Ok(())
        }
    }
}

fn list(store: &LocalStore) -> Result<()> {
    let activities = store.regular_activities()?;

    if activities.is_empty() {
        println!("{}", "No regular activities found".dimmed());
        println!("{}", "  Add the stock set with: hallcal activities seed".dimmed());
        return Ok(());
    }

    for activity in &activities {
        println!("{} {}", activity.icon.glyph(), activity.title.bold());
        println!("    {}", describe_when(activity));
        println!("    {}", format!("{} · {}", activity.color_theme.name(), activity.id).dimmed());
    }

    Ok(())
}

/// "First Saturday · 10:00 - 12:00", or "Not scheduled" when there is
/// neither a date nor a schedule.
fn describe_when(activity: &RegularActivity) -> String {
    let when = match (activity.schedule_date, activity.schedule.as_deref()) {
        (Some(date), _) => date.format("%a %-d %b %Y").to_string(),
        (None, Some(schedule)) => schedule.to_string(),
        (None, None) => "Not scheduled".to_string(),
    };

    match (activity.start_time.as_deref(), activity.end_time.as_deref()) {
        (Some(start), Some(end)) => format!("{} · {} - {}", when, start, end),
        (Some(start), None) => format!("{} · {}", when, start),
        _ => when,
    }
}
