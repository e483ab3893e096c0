//! Persisted record types for events and regular activities.
//!
//! These mirror the rows the site stores. Times are kept as the strings the
//! admin entered ("19:30" or "19:30:00"); they are only parsed when a record
//! is turned into a [`ScheduledItem`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HallError, HallResult};
use crate::item::{ColorTheme, Icon, ScheduledItem, Timing};

/// A one-off dated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

/// A regular activity with a free-text schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularActivity {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    pub icon: Icon,
    pub schedule: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub color_theme: ColorTheme,
    #[serde(default)]
    pub action_type: ActionType,
    pub action_text: Option<String>,
    pub action_link: Option<String>,
}

/// Call to action shown on an activity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    None,
    Button,
    Link,
}

impl ActionType {
    pub fn from_name(name: &str) -> Option<ActionType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(ActionType::None),
            "button" => Some(ActionType::Button),
            "link" => Some(ActionType::Link),
            _ => None,
        }
    }
}

/// Parse a stored time of day. Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_stored_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

fn stored_time(record_id: &str, field: &str, value: Option<&str>) -> Option<NaiveTime> {
    let value = value?;
    let parsed = parse_stored_time(value);
    if parsed.is_none() {
        log::warn!("{record_id}: ignoring unparseable {field} '{value}'");
    }
    parsed
}

impl From<&Event> for ScheduledItem {
    fn from(event: &Event) -> Self {
        ScheduledItem {
            id: event.id.clone(),
            title: event.title.clone(),
            timing: Timing::OneTime { date: event.date },
            start_time: stored_time(&event.id, "start_time", event.start_time.as_deref()),
            end_time: stored_time(&event.id, "end_time", event.end_time.as_deref()),
            description: event.description.clone(),
            icon: None,
            color_theme: ColorTheme::default(),
        }
    }
}

impl From<&RegularActivity> for ScheduledItem {
    fn from(activity: &RegularActivity) -> Self {
        ScheduledItem {
            id: activity.id.clone(),
            title: activity.title.clone(),
            timing: Timing::Recurring {
                date: activity.schedule_date,
                schedule_text: activity.schedule.clone(),
            },
            start_time: stored_time(&activity.id, "start_time", activity.start_time.as_deref()),
            end_time: stored_time(&activity.id, "end_time", activity.end_time.as_deref()),
            description: activity.description.clone(),
            icon: Some(activity.icon),
            color_theme: activity.color_theme,
        }
    }
}

/// Trim a form value, treating blank as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_time(field: &str, value: &Option<String>) -> HallResult<()> {
    match value {
        Some(v) if parse_stored_time(v).is_none() => Err(HallError::InvalidRecord(format!(
            "{field} '{v}' is not a time (expected HH:MM)"
        ))),
        _ => Ok(()),
    }
}

/// Editable fields of an [`Event`], as submitted by the admin form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<String>,
}

impl EventDraft {
    /// Trim fields, turn blanks into `None` and check required ones.
    pub fn normalize(self) -> HallResult<EventDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(HallError::InvalidRecord("event title is required".into()));
        }
        if self.date.is_none() {
            return Err(HallError::InvalidRecord("event date is required".into()));
        }

        let draft = EventDraft {
            title,
            description: non_blank(self.description),
            date: self.date,
            start_time: non_blank(self.start_time),
            end_time: non_blank(self.end_time),
            location: non_blank(self.location),
            event_type: non_blank(self.event_type),
        };
        check_time("start_time", &draft.start_time)?;
        check_time("end_time", &draft.end_time)?;
        Ok(draft)
    }
}

/// Editable fields of a [`RegularActivity`], as submitted by the admin form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularActivityDraft {
    pub title: String,
    pub description: Option<String>,
    pub icon: Icon,
    pub schedule: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub color_theme: ColorTheme,
    pub action_type: ActionType,
    pub action_text: Option<String>,
    pub action_link: Option<String>,
}

impl Default for RegularActivityDraft {
    fn default() -> Self {
        RegularActivityDraft {
            title: String::new(),
            description: None,
            icon: Icon::Coffee,
            schedule: None,
            schedule_date: None,
            start_time: None,
            end_time: None,
            color_theme: ColorTheme::Sage,
            action_type: ActionType::None,
            action_text: None,
            action_link: None,
        }
    }
}

impl RegularActivityDraft {
    /// Trim fields, turn blanks into `None` and drop action fields the
    /// action type does not use.
    pub fn normalize(self) -> HallResult<RegularActivityDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(HallError::InvalidRecord("activity title is required".into()));
        }

        let action_text = match self.action_type {
            ActionType::None => None,
            ActionType::Button | ActionType::Link => non_blank(self.action_text),
        };
        let action_link = match self.action_type {
            ActionType::None => None,
            ActionType::Button | ActionType::Link => non_blank(self.action_link),
        };

        let draft = RegularActivityDraft {
            title,
            description: non_blank(self.description),
            icon: self.icon,
            schedule: non_blank(self.schedule),
            schedule_date: self.schedule_date,
            start_time: non_blank(self.start_time),
            end_time: non_blank(self.end_time),
            color_theme: self.color_theme,
            action_type: self.action_type,
            action_text,
            action_link,
        };
        check_time("start_time", &draft.start_time)?;
        check_time("end_time", &draft.end_time)?;
        Ok(draft)
    }
}

/// The stock activities a new site starts with.
pub fn default_activities() -> Vec<RegularActivityDraft> {
    let contact = || Some("/contact".to_string());
    vec![
        RegularActivityDraft {
            title: "Art Classes".into(),
            description: Some("Creative art sessions for all skill levels in a welcoming environment.".into()),
            icon: Icon::Palette,
            schedule: Some("Weekly sessions".into()),
            color_theme: ColorTheme::Sage,
            action_type: ActionType::Button,
            action_text: Some("Check schedule".into()),
            action_link: contact(),
            ..Default::default()
        },
        RegularActivityDraft {
            title: "Gower Harmony Choir".into(),
            description: Some("Beautiful harmonies and community singing led by Kate Davies.".into()),
            icon: Icon::Music,
            schedule: Some("Weekly rehearsals".into()),
            color_theme: ColorTheme::Forest,
            action_type: ActionType::Link,
            action_text: Some("Learn more".into()),
            action_link: contact(),
            ..Default::default()
        },
        RegularActivityDraft {
            title: "Village Coffee Mornings".into(),
            description: Some("Join us for coffee, cake, and friendly conversation. All welcome!".into()),
            icon: Icon::Coffee,
            schedule: Some("First Saturday of every month".into()),
            color_theme: ColorTheme::Warm,
            action_type: ActionType::Button,
            action_text: Some("See dates".into()),
            action_link: contact(),
            ..Default::default()
        },
        RegularActivityDraft {
            title: "Community Yoga".into(),
            description: Some("Relaxing yoga sessions suitable for all abilities and experience levels.".into()),
            icon: Icon::Heart,
            schedule: Some("Thursdays 10am".into()),
            color_theme: ColorTheme::Moss,
            action_type: ActionType::Link,
            action_text: Some("Book a session".into()),
            action_link: contact(),
            ..Default::default()
        },
        RegularActivityDraft {
            title: "Book Club".into(),
            description: Some("Monthly book discussions in a friendly, welcoming atmosphere.".into()),
            icon: Icon::BookOpen,
            schedule: Some("Last Wednesday of the month".into()),
            color_theme: ColorTheme::Olive,
            ..Default::default()
        },
        RegularActivityDraft {
            title: "Community Group Meetings".into(),
            description: Some("Regular meetings for local community groups and organisations.".into()),
            icon: Icon::Users,
            schedule: Some("Various times".into()),
            color_theme: ColorTheme::Slate,
            action_type: ActionType::Button,
            action_text: Some("Check schedule".into()),
            action_link: contact(),
            ..Default::default()
        },
    ]
}
