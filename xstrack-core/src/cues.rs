//! Cue activation: enter/exit behavior and layout hints.

use tracing::{debug, trace};
use xstrack_contracts::{MediaElement, PluginHost, PreferenceStore, SubtitleOverlay};
use xstrack_model::{CueAction, CueActivation};

use crate::session::PlayerSession;

/// Bind enter/exit behavior to every unwired cue of `track`.
///
/// Returns how many cues were newly wired.
pub fn wire_cues<M: MediaElement + ?Sized>(media: &mut M, track: usize) -> usize {
    let Some(cues) = media.cues_mut(track) else {
        return 0;
    };
    let mut wired = 0;
    for cue in cues.iter_mut().filter(|cue| !cue.is_wired()) {
        cue.activation = Some(CueActivation::default());
        wired += 1;
    }
    wired
}

/// Set snap-to-lines and the line offset on the active cues of `track`.
///
/// Elements may ignore these hints.
pub fn apply_layout_hints<M: MediaElement + ?Sized>(
    media: &mut M,
    track: usize,
    line: i32,
    snap_to_lines: bool,
) {
    let active: Vec<usize> = media
        .text_tracks()
        .and_then(|tracks| tracks.get(track))
        .map(|track| track.active_cues.clone())
        .unwrap_or_default();
    if active.is_empty() {
        return;
    }
    let Some(cues) = media.cues_mut(track) else {
        return;
    };
    for position in active {
        if let Some(cue) = cues.get_mut(position) {
            cue.snap_to_lines = snap_to_lines;
            cue.line = line;
        }
    }
}

/// Line breaks normalized to `\n`, surrounding whitespace trimmed.
pub fn normalize_cue_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

impl<M, O, H, S> PlayerSession<M, O, H, S>
where
    M: MediaElement,
    O: SubtitleOverlay,
    H: PluginHost + ?Sized,
    S: PreferenceStore + ?Sized,
{
    /// Active cue set of a text track changed.
    pub fn on_cue_change(&mut self, track: usize) {
        let is_subtitle = self.registry().subtitle_at(track).is_some();
        let listening = self.cue_listeners.contains(&track);
        let Some(media) = self.media.as_mut() else {
            return;
        };
        if listening {
            let wired = wire_cues(media, track);
            if wired > 0 {
                debug!(track, wired, "wired late cues");
            }
        }
        if is_subtitle {
            apply_layout_hints(
                media,
                track,
                self.config.cue_line,
                self.config.cue_snap_to_lines,
            );
        }
    }

    pub fn on_cue_enter(&mut self, track: usize, cue: usize) {
        self.run_cue_action(track, cue, |activation| activation.on_enter);
    }

    pub fn on_cue_exit(&mut self, track: usize, cue: usize) {
        self.run_cue_action(track, cue, |activation| activation.on_exit);
    }

    fn run_cue_action(
        &mut self,
        track: usize,
        cue: usize,
        pick: impl FnOnce(CueActivation) -> CueAction,
    ) {
        let Some(cue) = self
            .media
            .as_ref()
            .and_then(|media| media.text_tracks())
            .and_then(|tracks| tracks.get(track))
            .and_then(|track| track.cues.get(cue))
        else {
            return;
        };
        let Some(activation) = cue.activation else {
            trace!(track, "ignoring unwired cue");
            return;
        };
        match pick(activation) {
            CueAction::ShowText => {
                let text = normalize_cue_text(&cue.text);
                self.overlay.replace_text(&text);
                self.overlay.set_visible(true);
            }
            CueAction::Hide => self.overlay.set_visible(false),
        }
    }
}
