use serde::Deserialize;
use url::Url;

use crate::color::Color;

/// Highlight configuration snapshot, owned by the host's settings store.
///
/// Patterns stay as raw strings here; they are compiled when the rule
/// list is rebuilt, so one bad pattern never invalidates the rest.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Highlights {
    pub subscription: Category,
    pub whisper: Category,
    pub self_highlight: SelfHighlight,
    pub users: Vec<User>,
    pub phrases: Vec<Phrase>,
    pub badges: Vec<Badge>,
}

/// Flag-driven highlight category (subscriptions, whispers). Colors for
/// these come from the host theme, not the configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Category {
    pub enabled: bool,
    pub alert: bool,
    pub sound: bool,
    pub sound_url: Option<Url>,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            enabled: false,
            alert: true,
            sound: false,
            sound_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelfHighlight {
    pub enabled: bool,
    pub alert: bool,
    pub sound: bool,
    pub sound_url: Option<Url>,
    pub show_in_mentions: bool,
}

impl Default for SelfHighlight {
    fn default() -> Self {
        Self {
            enabled: false,
            alert: true,
            sound: false,
            sound_url: None,
            show_in_mentions: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Phrase {
    pub pattern: String,
    pub is_regex: bool,
    pub case_sensitive: bool,
    pub alert: bool,
    pub sound: bool,
    pub sound_url: Option<Url>,
    pub color: Option<Color>,
    pub show_in_mentions: bool,
}

impl Default for Phrase {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            is_regex: false,
            case_sensitive: false,
            alert: true,
            sound: false,
            sound_url: None,
            color: None,
            show_in_mentions: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct User {
    pub pattern: String,
    pub is_regex: bool,
    pub case_sensitive: bool,
    pub alert: bool,
    pub sound: bool,
    pub sound_url: Option<Url>,
    pub color: Option<Color>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            is_regex: false,
            case_sensitive: false,
            alert: true,
            sound: false,
            sound_url: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Badge {
    pub name: String,
    pub alert: bool,
    pub sound: bool,
    pub sound_url: Option<Url>,
    pub color: Option<Color>,
}

impl Default for Badge {
    fn default() -> Self {
        Self {
            name: String::new(),
            alert: true,
            sound: false,
            sound_url: None,
            color: None,
        }
    }
}
