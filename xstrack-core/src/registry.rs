//! Live, uncached view over the tracks of a media element.

use std::ops::ControlFlow;

use xstrack_contracts::MediaElement;
use xstrack_model::{AudioTrack, IndexedTrack, TextTrack};

/// Audio tracks are selected while enabled.
pub fn is_audio_selected(track: &AudioTrack) -> bool {
    track.enabled
}

/// Subtitle tracks are selected while showing or hidden.
pub fn is_subtitle_selected(track: &TextTrack) -> bool {
    track.mode.is_active()
}

/// Enumerates tracks on every call; nothing is cached between queries.
///
/// A detached session or an element without a track capability reads as
/// "no tracks".
#[derive(Debug)]
pub struct TrackRegistry<'a, M: ?Sized> {
    media: Option<&'a M>,
}

impl<'a, M: ?Sized> Clone for TrackRegistry<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M: ?Sized> Copy for TrackRegistry<'a, M> {}

impl<'a, M: MediaElement + ?Sized> TrackRegistry<'a, M> {
    pub fn new(media: Option<&'a M>) -> Self {
        Self { media }
    }

    fn audio_list(&self) -> &'a [AudioTrack] {
        self.media
            .and_then(|media| media.audio_tracks())
            .unwrap_or_default()
    }

    fn text_list(&self) -> &'a [TextTrack] {
        self.media
            .and_then(|media| media.text_tracks())
            .unwrap_or_default()
    }

    pub fn has_audio_tracks(&self) -> bool {
        !self.audio_list().is_empty()
    }

    pub fn has_subtitle_tracks(&self) -> bool {
        self.subtitles().next().is_some()
    }

    pub fn audio(&self) -> impl Iterator<Item = IndexedTrack<'a, AudioTrack>> + use<'a, M> {
        self.audio_list()
            .iter()
            .enumerate()
            .map(|(index, track)| IndexedTrack::new(index, track))
    }

    /// Subtitle-like text tracks, indexed by their position in the full
    /// text track list.
    pub fn subtitles(&self) -> impl Iterator<Item = IndexedTrack<'a, TextTrack>> + use<'a, M> {
        self.text_list()
            .iter()
            .enumerate()
            .filter(|(_, track)| track.kind.is_subtitle_like())
            .map(|(index, track)| IndexedTrack::new(index, track))
    }

    /// Visit audio tracks in order until `visit` breaks.
    pub fn for_each_audio<B, F>(&self, visit: F) -> Option<B>
    where
        F: FnMut(IndexedTrack<'a, AudioTrack>) -> ControlFlow<B>,
    {
        match self.audio().try_for_each(visit) {
            ControlFlow::Break(value) => Some(value),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Visit subtitle tracks in order until `visit` breaks.
    pub fn for_each_subtitle<B, F>(&self, visit: F) -> Option<B>
    where
        F: FnMut(IndexedTrack<'a, TextTrack>) -> ControlFlow<B>,
    {
        match self.subtitles().try_for_each(visit) {
            ControlFlow::Break(value) => Some(value),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Subtitle-like track at `index`; other kinds read as absent.
    pub fn subtitle_at(&self, index: usize) -> Option<IndexedTrack<'a, TextTrack>> {
        self.text_list()
            .get(index)
            .filter(|track| track.kind.is_subtitle_like())
            .map(|track| IndexedTrack::new(index, track))
    }

    /// First enabled audio track.
    pub fn selected_audio(&self) -> Option<IndexedTrack<'a, AudioTrack>> {
        self.for_each_audio(|entry| {
            if is_audio_selected(entry.track) {
                ControlFlow::Break(entry)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// First showing or hidden subtitle track.
    pub fn selected_subtitle(&self) -> Option<IndexedTrack<'a, TextTrack>> {
        self.for_each_subtitle(|entry| {
            if is_subtitle_selected(entry.track) {
                ControlFlow::Break(entry)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}
