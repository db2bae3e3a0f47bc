//! # xstrack core
//!
//! Track selection and subtitle resolution engine for HTML5-style video
//! plugins.
//!
//! A [`PlayerSession`] owns all per-player state. The embedder attaches a
//! media element with [`PlayerSession::init`], forwards host and element
//! events to it, and answers panel requests from
//! [`PlayerSession::handle_request`].
//!
//! ## Modules
//!
//! - [`source`]: subtitle locator proxying, securing and host resolution,
//!   joined before declaration
//! - [`registry`]: uncached enumeration of audio and subtitle tracks
//! - [`selection`]: track selection, persistence and indicators
//! - [`defaults`]: default track policy applied once per load
//! - [`cues`]: cue enter/exit wiring and layout hints
//! - [`panels`]: options, audio, subtitle and settings descriptors
//! - [`dispatch`]: host message routing
//! - [`styles`]: persisted subtitle style classes
//! - [`session`]: lifecycle and load tickets
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use xstrack_config::ConfigLoader;
//! use xstrack_contracts::prelude::*;
//! use xstrack_core::PlayerSession;
//!
//! async fn start<M, O, H, S>(
//!     media: M,
//!     overlay: O,
//!     host: Arc<H>,
//!     store: Arc<S>,
//! ) -> Result<(), Box<dyn std::error::Error>>
//! where
//!     M: MediaElement,
//!     O: SubtitleOverlay,
//!     H: PluginHost,
//!     S: PreferenceStore,
//! {
//!     let config = ConfigLoader::from_process_env().load()?.config;
//!     let mut session = PlayerSession::new(host, store, overlay, Arc::new(config));
//!     session.init(media);
//!     session.load().await;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

pub mod cues;
pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod panels;
pub mod registry;
pub mod selection;
pub mod session;
pub mod source;
pub mod styles;
pub mod video;

pub use error::{EngineError, Result};
pub use registry::TrackRegistry;
pub use session::{LoadTicket, PlayerSession};
pub use source::{ResolvedSubtitles, SourceResolver, SubtitlePlan};
pub use video::{CrossOrigin, VideoSettings};

/// Engine types together with the collaborator traits.
pub mod prelude {
    pub use crate::{
        CrossOrigin, EngineError, LoadTicket, PlayerSession, ResolvedSubtitles,
        SubtitlePlan, TrackRegistry,
    };
    pub use xstrack_contracts::prelude::*;
    pub use xstrack_model::{Command, Panel, PanelId, SelectionState};
}
