//! File-backed record store.
//!
//! Events and regular activities live as two pretty-printed JSON arrays in
//! the data directory. Every write rewrites the whole file; the data set is
//! a village hall's worth of rows.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{HallError, HallResult};
use crate::item::ScheduledItem;
use crate::records::{Event, EventDraft, RegularActivity, RegularActivityDraft, default_activities};

const EVENTS_JSON: &str = "events.json";
const ACTIVITIES_JSON: &str = "regular_activities.json";

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open the store at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> HallResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(LocalStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // Events

    /// All events, earliest date first.
    pub fn events(&self) -> HallResult<Vec<Event>> {
        let mut events: Vec<Event> = self.read(EVENTS_JSON)?;
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    pub fn add_event(&self, draft: EventDraft) -> HallResult<Event> {
        let draft = draft.normalize()?;
        let mut events: Vec<Event> = self.read(EVENTS_JSON)?;

        let event = event_from_draft(Uuid::new_v4().to_string(), Utc::now(), draft)?;

        events.push(event.clone());
        self.write(EVENTS_JSON, &events)?;
        log::debug!("added event {} ({})", event.id, event.title);
        Ok(event)
    }

    /// Replace the editable fields of event `id`.
    pub fn update_event(&self, id: &str, draft: EventDraft) -> HallResult<Event> {
        let draft = draft.normalize()?;
        let mut events: Vec<Event> = self.read(EVENTS_JSON)?;

        let slot = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("Event", id))?;
        *slot = event_from_draft(slot.id.clone(), slot.created_at, draft)?;
        let updated = slot.clone();

        self.write(EVENTS_JSON, &events)?;
        Ok(updated)
    }

    pub fn delete_event(&self, id: &str) -> HallResult<()> {
        let mut events: Vec<Event> = self.read(EVENTS_JSON)?;
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(not_found("Event", id));
        }
        self.write(EVENTS_JSON, &events)
    }

    // Regular activities

    /// All regular activities, oldest first.
    pub fn regular_activities(&self) -> HallResult<Vec<RegularActivity>> {
        let mut activities: Vec<RegularActivity> = self.read(ACTIVITIES_JSON)?;
        activities.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(activities)
    }

    pub fn add_regular_activity(&self, draft: RegularActivityDraft) -> HallResult<RegularActivity> {
        let draft = draft.normalize()?;
        let mut activities: Vec<RegularActivity> = self.read(ACTIVITIES_JSON)?;

        let activity = new_activity(draft);
        activities.push(activity.clone());
        self.write(ACTIVITIES_JSON, &activities)?;
        log::debug!("added regular activity {} ({})", activity.id, activity.title);
        Ok(activity)
    }

    /// Replace the editable fields of activity `id`.
    pub fn update_regular_activity(
        &self,
        id: &str,
        draft: RegularActivityDraft,
    ) -> HallResult<RegularActivity> {
        let draft = draft.normalize()?;
        let mut activities: Vec<RegularActivity> = self.read(ACTIVITIES_JSON)?;

        let slot = activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("Regular activity", id))?;
        let mut updated = new_activity(draft);
        updated.id = slot.id.clone();
        updated.created_at = slot.created_at;
        *slot = updated.clone();

        self.write(ACTIVITIES_JSON, &activities)?;
        Ok(updated)
    }

    pub fn delete_regular_activity(&self, id: &str) -> HallResult<()> {
        let mut activities: Vec<RegularActivity> = self.read(ACTIVITIES_JSON)?;
        let before = activities.len();
        activities.retain(|a| a.id != id);
        if activities.len() == before {
            return Err(not_found("Regular activity", id));
        }
        self.write(ACTIVITIES_JSON, &activities)
    }

    /// Insert the stock activities. Returns what was added.
    pub fn seed_default_activities(&self) -> HallResult<Vec<RegularActivity>> {
        default_activities()
            .into_iter()
            .map(|draft| self.add_regular_activity(draft))
            .collect()
    }

    /// Everything the calendar shows: events first, then activities.
    pub fn scheduled_items(&self) -> HallResult<Vec<ScheduledItem>> {
        let events = self.events()?;
        let activities = self.regular_activities()?;

        Ok(events
            .iter()
            .map(ScheduledItem::from)
            .chain(activities.iter().map(ScheduledItem::from))
            .collect())
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> HallResult<Vec<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            HallError::InvalidRecord(format!("could not parse {}: {e}", path.display()))
        })
    }

    fn write<T: Serialize>(&self, name: &str, rows: &[T]) -> HallResult<()> {
        let formatted = serde_json::to_string_pretty(rows)?;
        fs::write(self.dir.join(name), format!("{formatted}\n"))?;
        Ok(())
    }
}

fn not_found(kind: &'static str, id: &str) -> HallError {
    HallError::RecordNotFound {
        kind,
        id: id.to_string(),
    }
}

fn event_from_draft(id: String, created_at: DateTime<Utc>, draft: EventDraft) -> HallResult<Event> {
    let date = draft
        .date
        .ok_or_else(|| HallError::InvalidRecord("event date is required".into()))?;
    Ok(Event {
        id,
        created_at,
        title: draft.title,
        description: draft.description,
        date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        location: draft.location,
        event_type: draft.event_type,
    })
}

fn new_activity(draft: RegularActivityDraft) -> RegularActivity {
    RegularActivity {
        id: Uuid::new_v4().to_string(),
        created_at: Utc::now(),
        title: draft.title,
        description: draft.description,
        icon: draft.icon,
        schedule: draft.schedule,
        schedule_date: draft.schedule_date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        color_theme: draft.color_theme,
        action_type: draft.action_type,
        action_text: draft.action_text,
        action_link: draft.action_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_index::DayIndex;
    use crate::item::{ColorTheme, Icon, ItemKind};
    use crate::month::CalendarMonth;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn quiz_on(on: NaiveDate) -> EventDraft {
        EventDraft {
            title: "Quiz Night".into(),
            date: Some(on),
            start_time: Some("19:30".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_store_has_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("data")).unwrap();

        assert!(store.events().unwrap().is_empty());
        assert!(store.regular_activities().unwrap().is_empty());
        assert!(store.scheduled_items().unwrap().is_empty());
    }

    #[test]
    fn test_events_are_sorted_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store.add_event(quiz_on(date(2026, 5, 1))).unwrap();
        store.add_event(quiz_on(date(2026, 3, 7))).unwrap();

        let dates: Vec<NaiveDate> = store.events().unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2026, 3, 7), date(2026, 5, 1)]);
    }

    #[test]
    fn test_update_and_delete_event() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let added = store.add_event(quiz_on(date(2026, 3, 7))).unwrap();
        let mut draft = quiz_on(date(2026, 3, 14));
        draft.title = "Spring Quiz".into();
        let updated = store.update_event(&added.id, draft).unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(updated.title, "Spring Quiz");
        assert_eq!(updated.date, date(2026, 3, 14));

        store.delete_event(&added.id).unwrap();
        assert!(store.events().unwrap().is_empty());

        let err = store.delete_event(&added.id).unwrap_err();
        assert!(matches!(err, HallError::RecordNotFound { .. }));
    }

    #[test]
    fn test_update_unknown_activity_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let err = store
            .update_regular_activity(
                "missing",
                RegularActivityDraft {
                    title: "Yoga".into(),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, HallError::RecordNotFound { .. }));
    }

    #[test]
    fn test_invalid_draft_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        assert!(store.add_event(EventDraft::default()).is_err());
        assert!(!dir.path().join(EVENTS_JSON).exists());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EVENTS_JSON), "{not json").unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let err = store.events().unwrap_err();
        assert!(err.to_string().contains(EVENTS_JSON), "{err}");
    }

    #[test]
    fn test_seeded_store_feeds_the_day_index() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let seeded = store.seed_default_activities().unwrap();
        assert_eq!(seeded.len(), 6);
        store.add_event(quiz_on(date(2026, 3, 7))).unwrap();

        let items = store.scheduled_items().unwrap();
        assert_eq!(items[0].kind(), ItemKind::OneTime);
        assert_eq!(items.len(), 7);

        let index = DayIndex::build(&items, CalendarMonth::new(2026, 2).unwrap());

        // Saturday 7 March: the quiz, then the first-Saturday coffee morning
        let titles: Vec<&str> = index
            .occurrences_on(date(2026, 3, 7))
            .iter()
            .map(|o| o.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Quiz Night", "Village Coffee Mornings"]);

        let yoga = &index.occurrences_on(date(2026, 3, 5))[0];
        assert_eq!(yoga.title, "Community Yoga");
        assert_eq!(yoga.time_label(), "10:00");
        assert_eq!(yoga.icon, Some(Icon::Heart));
        assert_eq!(yoga.color_theme, ColorTheme::Moss);

        let book_club = index.occurrences_on(date(2026, 3, 25));
        assert_eq!(book_club.len(), 1);
        assert_eq!(book_club[0].title, "Book Club");
    }
}
