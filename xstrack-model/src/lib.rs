//! Core data model definitions shared across xstrack crates.
#![allow(missing_docs)]

pub mod command;
pub mod error;
pub mod host;
pub mod media_error;
pub mod panel;
pub mod selection;
pub mod style;
pub mod subtitle;
pub mod tracks;

// Intentionally curated re-exports for downstream consumers.
pub use command::{Command, PanelId, StyleChange, StyleValue, action};
pub use error::{ModelError, Result as ModelResult};
pub use host::{
    BaseInfo, InteractionPayload, InteractionResponse, LogLevel,
    PlaybackState, VideoInfo,
};
pub use media_error::{MediaErrorCode, NativeMediaError};
pub use panel::{Panel, PanelItem, PanelPage, PanelTemplate};
pub use selection::SelectionState;
pub use style::{OverlayTarget, StyleSetting, StyleSettings};
pub use subtitle::{SubtitleDeclaration, SubtitleOrder, SubtitleSource};
pub use tracks::{
    AudioTrack, Cue, CueAction, CueActivation, IndexedTrack, TextTrack,
    TextTrackKind, TextTrackMode, TrackInfo,
};
