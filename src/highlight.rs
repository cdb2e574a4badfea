use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use url::Url;

pub use self::rule::{Pattern, Rule, rebuild};
use crate::color::{Color, Provider};
use crate::config::Highlights;
use crate::message::Message;

pub mod rule;

/// Merged highlight decision for one message.
///
/// Fields follow first-match-wins: once a rule has set a field, later
/// matching rules cannot overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub alert: bool,
    pub play_sound: bool,
    pub sound_url: Option<Url>,
    pub color: Option<Color>,
    pub show_in_mentions: bool,
}

impl Outcome {
    fn merge(&mut self, template: &Outcome) {
        self.alert |= template.alert;
        self.play_sound |= template.play_sound;
        self.show_in_mentions |= template.show_in_mentions;

        if self.sound_url.is_none() {
            self.sound_url.clone_from(&template.sound_url);
        }

        if self.color.is_none() {
            self.color = template.color;
        }
    }

    /// No mergeable field is still undecided, so evaluation can stop.
    fn is_full(&self) -> bool {
        self.alert
            && self.play_sound
            && self.sound_url.is_some()
            && self.color.is_some()
    }
}

/// Holds the active rule list and evaluates messages against it.
///
/// Publishing installs a whole new list; readers work on cheap
/// snapshots that later publishes never disturb.
#[derive(Debug, Default)]
pub struct Engine {
    rules: RwLock<Arc<Vec<Rule>>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, rules: Vec<Rule>) {
        *self.rules.write().expect("rules lock poisoned") = Arc::new(rules);
    }

    pub fn snapshot(&self) -> Arc<Vec<Rule>> {
        self.rules.read().expect("rules lock poisoned").clone()
    }

    /// Rebuilds from `config` and publishes the result.
    pub fn update(
        &self,
        config: &Highlights,
        nickname: &str,
        provider: &impl Provider,
    ) {
        self.publish(rule::rebuild(config, nickname, provider));
    }

    /// Runs every rule against `message`, merging the outcomes of all
    /// matches. Returns whether any rule matched, alongside the merged
    /// outcome. Stops early once the outcome is full.
    pub fn evaluate(&self, message: &Message) -> (bool, Outcome) {
        let rules = self.snapshot();

        let mut matched = false;
        let mut outcome = Outcome::default();

        for rule in rules.iter() {
            let Some(template) = rule.test(message) else {
                continue;
            };

            matched = true;
            outcome.merge(template);

            if outcome.is_full() {
                break;
            }
        }

        (matched, outcome)
    }
}

/// Configuration + identity snapshot the glue rebuilds from.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub highlights: Highlights,
    pub nickname: String,
}

/// Rebuilds and publishes on every settings change until the sender
/// side is dropped. The current value is applied immediately.
pub async fn listen(
    engine: Arc<Engine>,
    provider: impl Provider,
    mut settings: watch::Receiver<Settings>,
) {
    loop {
        {
            let settings = settings.borrow_and_update();
            engine.update(&settings.highlights, &settings.nickname, &provider);
        }

        if settings.changed().await.is_err() {
            break;
        }
    }
}
