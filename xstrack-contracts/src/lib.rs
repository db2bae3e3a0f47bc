//! Trait surfaces for the collaborators the engine talks to.
//!
//! None of these are implemented here for production use; embedders adapt
//! their media element, host shell and storage to them. The `mock` feature
//! adds in-memory fakes used by the engine's tests.
#![allow(missing_docs)]

pub mod host;
pub mod media;
#[cfg(feature = "mock")]
pub mod mock;
pub mod overlay;
pub mod store;

pub use host::PluginHost;
pub use media::MediaElement;
pub use overlay::SubtitleOverlay;
pub use store::PreferenceStore;

/// Frequently used trait imports for engine and adapter crates.
pub mod prelude {
    pub use super::host::PluginHost;
    pub use super::media::MediaElement;
    pub use super::overlay::SubtitleOverlay;
    pub use super::store::PreferenceStore;
}
