//! Audio and text tracks as exposed by a media element.
//!
//! The engine never owns these values; it reads them live from the element
//! and mutates them only through the element's own setters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of a text track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextTrackKind {
    #[default]
    Subtitles,
    Captions,
    Descriptions,
    Chapters,
    Metadata,
}

impl TextTrackKind {
    /// Subtitles, captions and descriptions are all handled as subtitle tracks.
    pub fn is_subtitle_like(self) -> bool {
        matches!(
            self,
            TextTrackKind::Subtitles
                | TextTrackKind::Captions
                | TextTrackKind::Descriptions
        )
    }
}

/// Rendering mode of a text track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextTrackMode {
    #[default]
    Disabled,
    /// Cues are loaded and fire events, but nothing is rendered natively.
    Hidden,
    Showing,
}

impl TextTrackMode {
    /// A track counts as selected while its cues are live.
    pub fn is_active(self) -> bool {
        matches!(self, TextTrackMode::Showing | TextTrackMode::Hidden)
    }
}

/// What a wired cue does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CueAction {
    /// Replace the overlay text with the cue text and show it
    ShowText,
    /// Hide the overlay
    Hide,
}

/// Enter/exit behavior bound to a single cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CueActivation {
    pub on_enter: CueAction,
    pub on_exit: CueAction,
}

impl Default for CueActivation {
    fn default() -> Self {
        Self {
            on_enter: CueAction::ShowText,
            on_exit: CueAction::Hide,
        }
    }
}

/// A single timed text cue.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// `Some` once enter/exit behavior has been wired
    pub activation: Option<CueActivation>,
    pub snap_to_lines: bool,
    pub line: i32,
}

impl Cue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            activation: None,
            snap_to_lines: true,
            line: -1,
        }
    }

    pub fn is_wired(&self) -> bool {
        self.activation.is_some()
    }
}

/// An audio track of the media element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioTrack {
    pub label: Option<String>,
    pub language: Option<String>,
    pub enabled: bool,
}

impl AudioTrack {
    pub fn new(label: Option<&str>, language: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            language: language.map(str::to_string),
            enabled: false,
        }
    }
}

/// A text track of the media element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextTrack {
    pub kind: TextTrackKind,
    pub label: Option<String>,
    pub language: Option<String>,
    pub mode: TextTrackMode,
    pub cues: Vec<Cue>,
    /// Positions into `cues` of the currently active cues
    pub active_cues: Vec<usize>,
}

impl TextTrack {
    pub fn new(kind: TextTrackKind, label: Option<&str>, language: Option<&str>) -> Self {
        Self {
            kind,
            label: label.map(str::to_string),
            language: language.map(str::to_string),
            mode: TextTrackMode::Disabled,
            cues: Vec::new(),
            active_cues: Vec::new(),
        }
    }
}

/// Common read access to the fields shared by audio and text tracks.
pub trait TrackInfo {
    fn label(&self) -> Option<&str>;
    fn language(&self) -> Option<&str>;
}

impl TrackInfo for AudioTrack {
    fn label(&self) -> Option<&str> {
        non_empty(self.label.as_deref())
    }

    fn language(&self) -> Option<&str> {
        non_empty(self.language.as_deref())
    }
}

impl TrackInfo for TextTrack {
    fn label(&self) -> Option<&str> {
        non_empty(self.label.as_deref())
    }

    fn language(&self) -> Option<&str> {
        non_empty(self.language.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Transient pairing of a track with its position in the element's list.
#[derive(Debug, PartialEq)]
pub struct IndexedTrack<'a, T> {
    pub index: usize,
    pub track: &'a T,
}

impl<T> Clone for IndexedTrack<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IndexedTrack<'_, T> {}

impl<'a, T> IndexedTrack<'a, T> {
    pub fn new(index: usize, track: &'a T) -> Self {
        Self { index, track }
    }
}
