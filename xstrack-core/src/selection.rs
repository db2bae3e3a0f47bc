//! Track selection, persistence and the on-screen indicator.

use tracing::debug;
use xstrack_contracts::{MediaElement, PluginHost, PreferenceStore, SubtitleOverlay};
use xstrack_model::{AudioTrack, IndexedTrack, TextTrack, TextTrackMode, TrackInfo};

use crate::cues;
use crate::session::PlayerSession;
use crate::video::keys;

const AUDIO_ICON: &str = "{ico:msx-white:audiotrack}";
const SUBTITLE_ICON: &str = "{ico:msx-white:subtitles}";

/// `{ico:msx-white:audiotrack} EN`, `None` without a language.
pub fn audio_indicator(language: Option<&str>) -> Option<String> {
    language.map(|language| format!("{AUDIO_ICON} {}", language.to_uppercase()))
}

/// `{ico:msx-white:subtitles} EN`, `None` without a language.
pub fn subtitle_indicator(language: Option<&str>) -> Option<String> {
    language
        .map(|language| format!("{SUBTITLE_ICON} {}", language.to_uppercase()))
}

fn track_label<T: TrackInfo>(entry: IndexedTrack<'_, T>, fallback_name: &str) -> String {
    let name = match entry.track.label() {
        Some(label) => label.to_string(),
        None => format!("{fallback_name} {}", entry.index + 1),
    };
    match entry.track.language() {
        Some(language) => format!("{name} ({})", language.to_uppercase()),
        None => name,
    }
}

/// `Label (EN)`, `Audio Track N (EN)`; without a track "None" when the
/// element has audio tracks and "Original" when it has none.
pub fn audio_track_label(entry: Option<IndexedTrack<'_, AudioTrack>>, has_tracks: bool) -> String {
    match entry {
        Some(entry) => track_label(entry, "Audio Track"),
        None if has_tracks => "None".to_string(),
        None => "Original".to_string(),
    }
}

/// `Label (EN)`, `Subtitles N (EN)`, or "Off" without a track.
pub fn subtitle_track_label(entry: Option<IndexedTrack<'_, TextTrack>>) -> String {
    match entry {
        Some(entry) => track_label(entry, "Subtitles"),
        None => "Off".to_string(),
    }
}

impl<M, O, H, S> PlayerSession<M, O, H, S>
where
    M: MediaElement,
    O: SubtitleOverlay,
    H: PluginHost + ?Sized,
    S: PreferenceStore + ?Sized,
{
    /// Enable exactly the audio track at `index` and disable the rest.
    ///
    /// An index without a track leaves every track disabled.
    pub fn select_audio_track(&mut self, index: Option<usize>, persist: bool, apply: bool) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        let count = media.audio_tracks().map_or(0, <[AudioTrack]>::len);
        for position in 0..count {
            media.set_audio_track_enabled(position, Some(position) == index);
        }
        let language = index
            .and_then(|index| media.audio_tracks()?.get(index))
            .and_then(|track| track.language())
            .map(str::to_string);
        debug!(?index, ?language, "audio track selected");

        self.selection.audio_indicator = audio_indicator(language.as_deref());
        if persist {
            self.persist_language(keys::AUDIO_TRACK, language.as_deref());
        }
        if apply {
            self.apply_indicators();
        }
    }

    /// Make the subtitle track at `index` the only live one.
    ///
    /// The matched track is switched to showing so the element materializes
    /// its cues, its cues are wired, and it rests in hidden mode so nothing
    /// renders natively. Every other subtitle track is disabled.
    pub fn select_subtitle_track(&mut self, index: Option<usize>, persist: bool, apply: bool) {
        let subtitle_tracks: Vec<usize> = self
            .registry()
            .subtitles()
            .map(|entry| entry.index)
            .collect();
        let Some(media) = self.media.as_mut() else {
            return;
        };

        let mut language = None;
        for position in subtitle_tracks {
            if Some(position) != index {
                media.set_text_track_mode(position, TextTrackMode::Disabled);
                continue;
            }
            media.set_text_track_mode(position, TextTrackMode::Showing);
            let wired = cues::wire_cues(media, position);
            if self.cue_listeners.insert(position) {
                debug!(track = position, "cue listener installed");
            }
            media.set_text_track_mode(position, TextTrackMode::Hidden);
            language = media
                .text_tracks()
                .and_then(|tracks| tracks.get(position))
                .and_then(|track| track.language())
                .map(str::to_string);
            debug!(track = position, wired, "subtitle track selected");
        }

        self.selection.subtitle_indicator = subtitle_indicator(language.as_deref());
        if persist {
            self.persist_language(keys::SUBTITLE, language.as_deref());
        }
        if apply {
            self.apply_indicators();
        }
    }

    fn persist_language(&self, name: &str, language: Option<&str>) {
        let key = self.config.property_key(name);
        match language {
            Some(language) => self.store.set(&key, language),
            None => self.store.remove(&key),
        }
    }

    /// Push the combined indicator, followed by the video's own extension
    /// label, to the host.
    pub fn apply_indicators(&self) {
        let indicator = self.selection.combined_indicator();
        let label = match (indicator, self.video.extension_label.as_deref()) {
            (Some(indicator), Some(extension)) => {
                Some(format!("{indicator} {extension}"))
            }
            (Some(indicator), None) => Some(indicator),
            (None, extension) => extension.map(str::to_string),
        };
        self.host.set_extension_label(label.as_deref());
    }
}
