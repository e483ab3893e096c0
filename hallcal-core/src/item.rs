//! Calendar-neutral scheduled items.
//!
//! Both one-off events and regular activities are converted into
//! `ScheduledItem`s before they reach the day index, so aggregation works
//! on a single type regardless of where a record came from.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Something that can appear on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    pub title: String,
    pub timing: Timing,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,

    // Presentation
    pub icon: Option<Icon>,
    pub color_theme: ColorTheme,
}

/// When an item happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Timing {
    /// A dated, one-off event.
    OneTime { date: NaiveDate },
    /// A regular activity. An explicit `date` overrides `schedule_text`.
    Recurring {
        date: Option<NaiveDate>,
        schedule_text: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    OneTime,
    Recurring,
}

impl ScheduledItem {
    pub fn kind(&self) -> ItemKind {
        match self.timing {
            Timing::OneTime { .. } => ItemKind::OneTime,
            Timing::Recurring { .. } => ItemKind::Recurring,
        }
    }

    /// The free-text schedule, if this is a recurring item that has one.
    pub fn schedule_text(&self) -> Option<&str> {
        match &self.timing {
            Timing::Recurring { schedule_text, .. } => schedule_text.as_deref(),
            Timing::OneTime { .. } => None,
        }
    }
}

/// Activity icons offered by the admin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Coffee,
    Palette,
    Music,
    Users,
    Star,
    BookOpen,
    Heart,
    Smile,
}

impl Icon {
    pub const ALL: [Icon; 8] = [
        Icon::Coffee,
        Icon::Palette,
        Icon::Music,
        Icon::Users,
        Icon::Star,
        Icon::BookOpen,
        Icon::Heart,
        Icon::Smile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Icon::Coffee => "Coffee",
            Icon::Palette => "Palette",
            Icon::Music => "Music",
            Icon::Users => "Users",
            Icon::Star => "Star",
            Icon::BookOpen => "BookOpen",
            Icon::Heart => "Heart",
            Icon::Smile => "Smile",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Icon> {
        Icon::ALL
            .into_iter()
            .find(|icon| icon.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Single-glyph stand-in for terminals.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Coffee => "☕",
            Icon::Palette => "🎨",
            Icon::Music => "🎵",
            Icon::Users => "👥",
            Icon::Star => "⭐",
            Icon::BookOpen => "📖",
            Icon::Heart => "❤",
            Icon::Smile => "🙂",
        }
    }
}

/// Colour themes for regular activities. Unknown names read as `Sage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Forest,
    Olive,
    Moss,
    Stone,
    Slate,
    Charcoal,
    Warm,
    // `#[serde(other)]` must sit on the last variant.
    #[default]
    #[serde(other)]
    Sage,
}

/// Hex colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub dot: &'static str,
}

/// Colours used for one-off events, which carry no theme of their own.
pub const EVENT_COLORS: ThemeColors = ThemeColors {
    bg: "#eff6ff",
    text: "#1e40af",
    border: "#3b82f6",
    dot: "#3b82f6",
};

impl ColorTheme {
    pub const ALL: [ColorTheme; 8] = [
        ColorTheme::Forest,
        ColorTheme::Sage,
        ColorTheme::Olive,
        ColorTheme::Moss,
        ColorTheme::Stone,
        ColorTheme::Slate,
        ColorTheme::Charcoal,
        ColorTheme::Warm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Forest => "forest",
            ColorTheme::Sage => "sage",
            ColorTheme::Olive => "olive",
            ColorTheme::Moss => "moss",
            ColorTheme::Stone => "stone",
            ColorTheme::Slate => "slate",
            ColorTheme::Charcoal => "charcoal",
            ColorTheme::Warm => "warm",
        }
    }

    /// Case-insensitive lookup; anything unrecognised is `Sage`.
    pub fn from_name(name: &str) -> ColorTheme {
        ColorTheme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn palette(self) -> ThemeColors {
        let (bg, text, border, dot) = match self {
            ColorTheme::Forest => ("#dcfce7", "#14532d", "#166534", "#16a34a"),
            ColorTheme::Sage => ("#f0fdf4", "#166534", "#22c55e", "#22c55e"),
            ColorTheme::Olive => ("#ecfccb", "#365314", "#65a30d", "#84cc16"),
            ColorTheme::Moss => ("#ccfbf1", "#134e4a", "#0d9488", "#14b8a6"),
            ColorTheme::Stone => ("#f5f5f4", "#292524", "#78716c", "#78716c"),
            ColorTheme::Slate => ("#f1f5f9", "#1e293b", "#475569", "#64748b"),
            ColorTheme::Charcoal => ("#fafafa", "#18181b", "#3f3f46", "#52525b"),
            ColorTheme::Warm => ("#fef3c7", "#78350f", "#b45309", "#f59e0b"),
        };
        ThemeColors { bg, text, border, dot }
    }
}
