use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Resolved display color, parsed from `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn parse(hex: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError(hex.to_string());

        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;

        if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
            return Err(invalid());
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[2 * i..2 * i + 2], 16)
                .map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(1)?,
            b: channel(2)?,
            a: if digits.len() == 8 { channel(3)? } else { 0xff },
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { r, g, b, a } = self;

        if *a == 0xff {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid hex color '{0}'")]
pub struct ParseError(String);

/// Highlight categories whose colors are owned by the host's theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Subscription,
    Whisper,
    SelfHighlight,
}

/// Resolves a highlight category to its display color.
pub trait Provider {
    fn color(&self, kind: Kind) -> Color;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        let tests = [
            ("#ff0000", Some(Color::rgb(255, 0, 0))),
            ("#1e90ff", Some(Color::rgb(30, 144, 255))),
            (
                "#1e90ff80",
                Some(Color {
                    r: 30,
                    g: 144,
                    b: 255,
                    a: 128,
                }),
            ),
            ("1e90ff", None),
            ("#1e90f", None),
            ("#gggggg", None),
        ];

        for (hex, expected) in tests {
            assert_eq!(Color::parse(hex).ok(), expected, "{hex}");
        }
    }

    #[test]
    fn display_round_trip() {
        for hex in ["#ff0000", "#1e90ff80"] {
            let color = Color::parse(hex).unwrap();
            assert_eq!(color.to_string(), hex);
        }
    }
}
