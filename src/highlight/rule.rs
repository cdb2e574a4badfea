use fancy_regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::Outcome;
use crate::color::{Kind, Provider};
use crate::config::Highlights;
use crate::message::Message;

/// A single highlight rule: a predicate over one message plus the
/// outcome it contributes when it matches.
#[derive(Debug, Clone)]
pub enum Rule {
    Subscription(Outcome),
    Whisper(Outcome),
    Sender { pattern: Pattern, outcome: Outcome },
    Text { pattern: Pattern, outcome: Outcome },
    Badge { badge: String, outcome: Outcome },
}

impl Rule {
    pub fn test(&self, message: &Message) -> Option<&Outcome> {
        match self {
            Rule::Subscription(outcome) => {
                message.is_subscription.then_some(outcome)
            }
            Rule::Whisper(outcome) => message.is_whisper.then_some(outcome),
            Rule::Sender { pattern, outcome } => {
                pattern.is_match(&message.sender).then_some(outcome)
            }
            Rule::Text { pattern, outcome } => {
                pattern.is_match(&message.text).then_some(outcome)
            }
            Rule::Badge { badge, outcome } => message
                .badges
                .iter()
                .any(|b| b.name().eq_ignore_ascii_case(badge))
                .then_some(outcome),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Matches `text` as whole words, anywhere in the haystack.
    pub fn plain(text: &str, case_sensitive: bool) -> Result<Self, Error> {
        let flags = if case_sensitive { "" } else { "(?i)" };
        let escaped = fancy_regex::escape(text);

        Self::build(&format!(r"{flags}(?<!\w)({escaped})(?!\w)"))
    }

    pub fn regex(pattern: &str, case_sensitive: bool) -> Result<Self, Error> {
        let flags = if case_sensitive { "" } else { "(?i)" };

        Self::build(&format!("{flags}{pattern}"))
    }

    fn compile(
        pattern: &str,
        is_regex: bool,
        case_sensitive: bool,
    ) -> Result<Self, Error> {
        if is_regex {
            Self::regex(pattern, case_sensitive)
        } else {
            Self::plain(pattern, case_sensitive)
        }
    }

    fn build(pattern: &str) -> Result<Self, Error> {
        Ok(Self(RegexBuilder::new(pattern).build()?))
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pattern: {0}")]
    Regex(#[from] fancy_regex::Error),
}

/// Compiles the configured highlights into a fresh rule list.
///
/// Rules are appended in evaluation priority order: subscription,
/// whisper, sender, text (the local nickname ahead of configured
/// phrases), badge. A pattern that fails to compile is logged and
/// skipped; the remaining rules still build.
pub fn rebuild(
    config: &Highlights,
    nickname: &str,
    provider: &impl Provider,
) -> Vec<Rule> {
    let mut rules = Vec::new();

    if config.subscription.enabled {
        rules.push(Rule::Subscription(Outcome {
            alert: config.subscription.alert,
            play_sound: config.subscription.sound,
            sound_url: config.subscription.sound_url.clone(),
            color: Some(provider.color(Kind::Subscription)),
            show_in_mentions: false,
        }));
    }

    if config.whisper.enabled {
        rules.push(Rule::Whisper(Outcome {
            alert: config.whisper.alert,
            play_sound: config.whisper.sound,
            sound_url: config.whisper.sound_url.clone(),
            color: Some(provider.color(Kind::Whisper)),
            show_in_mentions: false,
        }));
    }

    for user in &config.users {
        match Pattern::compile(
            &user.pattern,
            user.is_regex,
            user.case_sensitive,
        ) {
            Ok(pattern) => rules.push(Rule::Sender {
                pattern,
                outcome: Outcome {
                    alert: user.alert,
                    play_sound: user.sound,
                    sound_url: user.sound_url.clone(),
                    color: user.color,
                    show_in_mentions: false,
                },
            }),
            Err(error) => {
                log::warn!(
                    "skipping user highlight '{}': {error}",
                    user.pattern
                );
            }
        }
    }

    if config.self_highlight.enabled && !nickname.is_empty() {
        match Pattern::plain(nickname, false) {
            Ok(pattern) => rules.push(Rule::Text {
                pattern,
                outcome: Outcome {
                    alert: config.self_highlight.alert,
                    play_sound: config.self_highlight.sound,
                    sound_url: config.self_highlight.sound_url.clone(),
                    color: Some(provider.color(Kind::SelfHighlight)),
                    show_in_mentions: config.self_highlight.show_in_mentions,
                },
            }),
            Err(error) => {
                log::warn!("skipping self highlight '{nickname}': {error}");
            }
        }
    }

    for phrase in &config.phrases {
        match Pattern::compile(
            &phrase.pattern,
            phrase.is_regex,
            phrase.case_sensitive,
        ) {
            Ok(pattern) => rules.push(Rule::Text {
                pattern,
                outcome: Outcome {
                    alert: phrase.alert,
                    play_sound: phrase.sound,
                    sound_url: phrase.sound_url.clone(),
                    color: phrase.color,
                    show_in_mentions: phrase.show_in_mentions,
                },
            }),
            Err(error) => {
                log::warn!(
                    "skipping phrase highlight '{}': {error}",
                    phrase.pattern
                );
            }
        }
    }

    for badge in &config.badges {
        rules.push(Rule::Badge {
            badge: badge.name.clone(),
            outcome: Outcome {
                alert: badge.alert,
                play_sound: badge.sound,
                sound_url: badge.sound_url.clone(),
                color: badge.color,
                show_in_mentions: false,
            },
        });
    }

    log::debug!("rebuilt {} highlight rules", rules.len());

    rules
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::Color;
    use crate::config::{self, Category, Highlights, Phrase, SelfHighlight};

    struct Theme;

    impl Provider for Theme {
        fn color(&self, kind: Kind) -> Color {
            match kind {
                Kind::Subscription => Color::rgb(255, 0, 0),
                Kind::Whisper => Color::rgb(0, 255, 0),
                Kind::SelfHighlight => Color::rgb(0, 0, 255),
            }
        }
    }

    #[test]
    fn plain_pattern_matches_whole_words() {
        let pattern = Pattern::plain("gg", false).unwrap();

        assert!(pattern.is_match("well played gg"));
        assert!(pattern.is_match("GG"));
        assert!(pattern.is_match("gg, close one"));
        assert!(!pattern.is_match("eggs"));
        assert!(!pattern.is_match("digging"));
    }

    #[test]
    fn plain_pattern_case_sensitivity() {
        let pattern = Pattern::plain("Kappa", true).unwrap();

        assert!(pattern.is_match("Kappa"));
        assert!(!pattern.is_match("kappa"));
    }

    #[test]
    fn plain_pattern_escapes_metacharacters() {
        let pattern = Pattern::plain("o7 (salute)", false).unwrap();

        assert!(pattern.is_match("o7 (salute)"));
        assert!(!pattern.is_match("o7 salute"));
    }

    #[test]
    fn regex_pattern() {
        let pattern = Pattern::regex(r"gg\s+wp", false).unwrap();

        assert!(pattern.is_match("GG WP"));
        assert!(!pattern.is_match("ggwp"));

        assert!(Pattern::regex("(unclosed", false).is_err());
    }

    #[test]
    fn rebuild_orders_categories() {
        let config = Highlights {
            subscription: Category {
                enabled: true,
                ..Category::default()
            },
            whisper: Category {
                enabled: true,
                ..Category::default()
            },
            self_highlight: SelfHighlight {
                enabled: true,
                ..SelfHighlight::default()
            },
            users: vec![config::User {
                pattern: "streamer".to_string(),
                ..config::User::default()
            }],
            phrases: vec![Phrase {
                pattern: "gg".to_string(),
                ..Phrase::default()
            }],
            badges: vec![config::Badge {
                name: "moderator".to_string(),
                ..config::Badge::default()
            }],
        };

        let rules = rebuild(&config, "casper", &Theme);

        assert_eq!(rules.len(), 6);
        assert!(matches!(rules[0], Rule::Subscription(_)));
        assert!(matches!(rules[1], Rule::Whisper(_)));
        assert!(matches!(rules[2], Rule::Sender { .. }));
        assert!(matches!(rules[3], Rule::Text { .. }));
        assert!(matches!(rules[4], Rule::Text { .. }));
        assert!(matches!(rules[5], Rule::Badge { .. }));

        // The nickname rule is built ahead of configured phrases
        let message = Message::new("someone", "hey casper");
        assert!(rules[3].test(&message).is_some());
        assert!(rules[4].test(&message).is_none());
    }

    #[test]
    fn rebuild_skips_invalid_patterns() {
        let config = Highlights {
            phrases: vec![
                Phrase {
                    pattern: "(unclosed".to_string(),
                    is_regex: true,
                    ..Phrase::default()
                },
                Phrase {
                    pattern: "gg".to_string(),
                    ..Phrase::default()
                },
            ],
            ..Highlights::default()
        };

        let rules = rebuild(&config, "", &Theme);

        assert_eq!(rules.len(), 1);
        assert!(rules[0].test(&Message::new("someone", "gg")).is_some());
    }

    #[test]
    fn subscription_rule_reads_flag_only() {
        let config = Highlights {
            subscription: Category {
                enabled: true,
                ..Category::default()
            },
            ..Highlights::default()
        };

        let rules = rebuild(&config, "", &Theme);
        assert_eq!(rules.len(), 1);

        let mut message = Message::new("someone", "resubscribed!");
        assert!(rules[0].test(&message).is_none());

        message.is_subscription = true;
        let outcome = rules[0].test(&message).unwrap();
        assert_eq!(outcome.color, Some(Color::rgb(255, 0, 0)));
        assert!(!outcome.show_in_mentions);
    }

    #[test]
    fn badge_rule_matches_any_badge() {
        let config = Highlights {
            badges: vec![config::Badge {
                name: "moderator".to_string(),
                ..config::Badge::default()
            }],
            ..Highlights::default()
        };

        let rules = rebuild(&config, "", &Theme);
        let mut message = Message::new("someone", "hi");

        message.badges = vec!["subscriber".into(), "Moderator".into()];
        assert!(rules[0].test(&message).is_some());

        message.badges = vec!["subscriber".into()];
        assert!(rules[0].test(&message).is_none());
    }
}
