//! Default track resolution applied once per load.

use std::ops::ControlFlow;

use xstrack_contracts::{MediaElement, PreferenceStore};
use xstrack_model::{SubtitleSource, TrackInfo, VideoInfo};

use crate::registry::TrackRegistry;

/// Stored or configured language value meaning "no preference".
pub const DEFAULT_SENTINEL: &str = "default";

/// Language under `key`: the video property first, then the stored
/// preference. The sentinel maps to `None`.
pub fn preferred_language<S: PreferenceStore + ?Sized>(
    info: Option<&VideoInfo>,
    store: &S,
    key: &str,
) -> Option<String> {
    info.and_then(|info| info.get(key))
        .map(str::to_string)
        .or_else(|| store.get(key).filter(|value| !value.is_empty()))
        .filter(|language| language != DEFAULT_SENTINEL)
}

/// First audio track in `language`, else the first audio track.
///
/// Scans the registry once and stops at the first match.
pub fn default_audio_index<M: MediaElement + ?Sized>(
    registry: &TrackRegistry<'_, M>,
    language: Option<&str>,
) -> Option<usize> {
    let mut fallback = None;
    let matched = registry.for_each_audio(|entry| {
        fallback.get_or_insert(entry.index);
        if language.is_some() && entry.track.language() == language {
            ControlFlow::Break(entry.index)
        } else {
            ControlFlow::Continue(())
        }
    });
    matched.or(fallback)
}

/// Position of the last source in `language`. No language means no
/// default subtitle.
pub fn default_subtitle_index(sources: &[SubtitleSource], language: Option<&str>) -> Option<usize> {
    let language = language?;
    sources.iter().rposition(|source| source.language == language)
}
