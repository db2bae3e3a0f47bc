//! Persisted subtitle presentation settings.

use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One style dimension of the subtitle overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StyleSetting {
    Margin,
    Background,
    Font,
    Size,
}

impl StyleSetting {
    pub const ALL: [StyleSetting; 4] = [
        StyleSetting::Margin,
        StyleSetting::Background,
        StyleSetting::Font,
        StyleSetting::Size,
    ];

    /// Name used in store keys and `settings:` commands.
    pub fn key(self) -> &'static str {
        match self {
            StyleSetting::Margin => "margin",
            StyleSetting::Background => "background",
            StyleSetting::Font => "font",
            StyleSetting::Size => "size",
        }
    }

    /// Class prefix of the percentage levels, `None` for fonts.
    pub fn class_prefix(self) -> Option<&'static str> {
        match self {
            StyleSetting::Margin => Some("m-"),
            StyleSetting::Background => Some("b-"),
            StyleSetting::Size => Some("f-"),
            StyleSetting::Font => None,
        }
    }

    /// Margin is applied to the overlay container, the rest to the text box.
    pub fn target(self) -> OverlayTarget {
        match self {
            StyleSetting::Margin => OverlayTarget::Container,
            _ => OverlayTarget::Subtitles,
        }
    }
}

impl FromStr for StyleSetting {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleSetting::ALL
            .into_iter()
            .find(|setting| setting.key() == s)
            .ok_or_else(|| {
                ModelError::InvalidValue(format!("unknown style setting '{s}'"))
            })
    }
}

impl Display for StyleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Element of the subtitle overlay a class list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverlayTarget {
    /// The box holding the subtitle text
    Subtitles,
    /// The positioning container around it
    Container,
}

/// Current style tokens; `None` means the setting is off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyleSettings {
    pub margin: Option<String>,
    pub background: Option<String>,
    pub font: Option<String>,
    pub size: Option<String>,
}

impl StyleSettings {
    pub fn get(&self, setting: StyleSetting) -> Option<&str> {
        match setting {
            StyleSetting::Margin => self.margin.as_deref(),
            StyleSetting::Background => self.background.as_deref(),
            StyleSetting::Font => self.font.as_deref(),
            StyleSetting::Size => self.size.as_deref(),
        }
    }

    pub fn set(&mut self, setting: StyleSetting, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match setting {
            StyleSetting::Margin => self.margin = value,
            StyleSetting::Background => self.background = value,
            StyleSetting::Font => self.font = value,
            StyleSetting::Size => self.size = value,
        }
    }

    /// Class list for one overlay element, in setting order.
    pub fn classes_for(&self, target: OverlayTarget) -> Vec<String> {
        StyleSetting::ALL
            .into_iter()
            .filter(|setting| setting.target() == target)
            .filter_map(|setting| self.get(setting).map(str::to_string))
            .collect()
    }
}
