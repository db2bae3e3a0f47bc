//! Host message commands and the action strings that produce them.
//!
//! Wire format (colon delimited, parsed once at the edge):
//!
//! | message                     | command                       |
//! |-----------------------------|-------------------------------|
//! | `focus:<id>`                | [`Command::Focus`]            |
//! | `audiotrack:<index>`        | [`Command::SelectAudio`]      |
//! | `subtitle:<index>`          | [`Command::SelectSubtitle`]   |
//! | `fullscreen`                | [`Command::Fullscreen`]       |
//! | `settings:<key>:<value>`    | [`Command::Settings`]         |

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ModelError;

pub const COMMIT_MESSAGE: &str = "player:commit:message:";
pub const PANEL_REQUEST: &str = "panel:request:player:";
pub const RELATED_CONTENT_ACTION: &str = "player:content";
pub const BACK_ACTION: &str = "back";
pub const STYLE_OFF: &str = "off";

/// A parsed host message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Remember which options row has focus
    Focus(String),
    /// Select an audio track, `None` for no track
    SelectAudio(Option<usize>),
    /// Select a subtitle track, `None` for off
    SelectSubtitle(Option<usize>),
    Fullscreen,
    /// Change a style setting; `None` when the value segment is missing
    Settings(Option<StyleChange>),
}

/// A `settings:<key>:<value>` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleChange {
    pub setting: String,
    pub value: StyleValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    Off,
    Set(String),
}

impl Command {
    pub fn parse(message: &str) -> Result<Self, ModelError> {
        if message.is_empty() {
            return Err(ModelError::EmptyCommand);
        }
        if let Some(id) = message.strip_prefix("focus:") {
            return Ok(Command::Focus(id.to_string()));
        }
        if let Some(index) = message.strip_prefix("audiotrack:") {
            return Ok(Command::SelectAudio(parse_index(index)));
        }
        if let Some(index) = message.strip_prefix("subtitle:") {
            return Ok(Command::SelectSubtitle(parse_index(index)));
        }
        if message == "fullscreen" {
            return Ok(Command::Fullscreen);
        }
        if message.starts_with("settings:") {
            let mut parts = message.split(':').skip(1);
            let change = match (parts.next(), parts.next()) {
                (Some(setting), Some(value)) => Some(StyleChange {
                    setting: setting.to_string(),
                    value: if value == STYLE_OFF {
                        StyleValue::Off
                    } else {
                        StyleValue::Set(value.to_string())
                    },
                }),
                _ => None,
            };
            return Ok(Command::Settings(change));
        }
        Err(ModelError::UnknownCommand(message.to_string()))
    }
}

impl FromStr for Command {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

/// Non-numeric or negative indices select nothing.
fn parse_index(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|index| usize::try_from(index).ok())
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Focus(id) => write!(f, "focus:{id}"),
            Command::SelectAudio(index) => {
                write!(f, "audiotrack:{}", IndexArg(*index))
            }
            Command::SelectSubtitle(index) => {
                write!(f, "subtitle:{}", IndexArg(*index))
            }
            Command::Fullscreen => write!(f, "fullscreen"),
            Command::Settings(Some(change)) => match &change.value {
                StyleValue::Off => {
                    write!(f, "settings:{}:{STYLE_OFF}", change.setting)
                }
                StyleValue::Set(value) => {
                    write!(f, "settings:{}:{value}", change.setting)
                }
            },
            Command::Settings(None) => write!(f, "settings:"),
        }
    }
}

struct IndexArg(Option<usize>);

impl Display for IndexArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(index) => write!(f, "{index}"),
            None => write!(f, "-1"),
        }
    }
}

/// Panels the host can request by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Options,
    AudioTrack,
    Subtitle,
    Settings,
}

impl PanelId {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelId::Options => "options",
            PanelId::AudioTrack => "audiotrack",
            PanelId::Subtitle => "subtitle",
            PanelId::Settings => "settings",
        }
    }
}

impl FromStr for PanelId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "options" => Ok(PanelId::Options),
            "audiotrack" => Ok(PanelId::AudioTrack),
            "subtitle" => Ok(PanelId::Subtitle),
            "settings" => Ok(PanelId::Settings),
            other => Err(ModelError::UnknownPanel(other.to_string())),
        }
    }
}

/// Builders for the action strings embedded in panel descriptors.
pub mod action {
    use super::*;

    /// `player:commit:message:<command>`
    pub fn commit(command: &Command) -> String {
        format!("{COMMIT_MESSAGE}{command}")
    }

    /// `panel:request:player:<id>`
    pub fn request_panel(id: PanelId) -> String {
        format!("{PANEL_REQUEST}{}", id.as_str())
    }

    /// Several actions executed in order: `[a|b|...]`
    pub fn sequence<I, S>(actions: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = actions
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("|");
        format!("[{joined}]")
    }
}
