/// Per-session selection state.
///
/// Created when a session starts, reset when it is disposed. Only the
/// language preferences survive a session, and only through the
/// preference store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Language the default audio track should match, if any
    pub default_audio_language: Option<String>,
    /// Index of the declared subtitle track to select on ready
    pub default_subtitle_index: Option<usize>,
    pub audio_indicator: Option<String>,
    pub subtitle_indicator: Option<String>,
    /// Options row that last had focus
    pub options_focus: Option<String>,
}

impl SelectionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Combined on-screen indicator, `None` when neither part is set.
    pub fn combined_indicator(&self) -> Option<String> {
        match (&self.audio_indicator, &self.subtitle_indicator) {
            (Some(audio), Some(subtitle)) => Some(format!("{audio} {subtitle}")),
            (Some(audio), None) => Some(audio.clone()),
            (None, Some(subtitle)) => Some(subtitle.clone()),
            (None, None) => None,
        }
    }
}
