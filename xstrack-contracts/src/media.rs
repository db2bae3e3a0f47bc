use xstrack_model::{
    AudioTrack, Cue, NativeMediaError, SubtitleDeclaration, TextTrack,
    TextTrackMode,
};

/// Capability surface of the underlying media element.
///
/// Track lists are optional capabilities: `None` means the element cannot
/// expose that kind of track at all, which the engine treats exactly like an
/// empty list.
pub trait MediaElement {
    fn audio_tracks(&self) -> Option<&[AudioTrack]>;

    fn text_tracks(&self) -> Option<&[TextTrack]>;

    fn set_audio_track_enabled(&mut self, index: usize, enabled: bool);

    /// Switching a track to [`TextTrackMode::Showing`] materializes its cues.
    fn set_text_track_mode(&mut self, index: usize, mode: TextTrackMode);

    /// Mutable cue list of a text track, for wiring and layout hints.
    fn cues_mut(&mut self, track: usize) -> Option<&mut [Cue]>;

    /// Fetch cross-origin resources anonymously (without credentials).
    fn set_cross_origin_anonymous(&mut self);

    /// Replace the element's declared subtitle tracks.
    fn declare_subtitles(&mut self, tracks: &[SubtitleDeclaration]);

    /// Set the source and start loading it.
    fn load_source(&mut self, url: &str);

    /// The element's current error, if any.
    fn error(&self) -> Option<NativeMediaError>;
}
