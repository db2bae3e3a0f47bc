//! In-memory implementations of the collaborator traits for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::channel::oneshot;
use parking_lot::Mutex;
use serde_json::Value;
use xstrack_model::{
    AudioTrack, Cue, InteractionResponse, LogLevel, NativeMediaError,
    OverlayTarget, PlaybackState, SubtitleDeclaration, TextTrack,
    TextTrackMode,
};

use crate::{MediaElement, PluginHost, PreferenceStore, SubtitleOverlay};

/// Media element backed by plain vectors.
#[derive(Debug, Default)]
pub struct FakeMedia {
    pub audio: Option<Vec<AudioTrack>>,
    pub text: Option<Vec<TextTrack>>,
    /// Cues that appear on a track the first time it is switched to showing
    pub lazy_cues: HashMap<usize, Vec<Cue>>,
    pub mode_changes: Vec<(usize, TextTrackMode)>,
    pub declared: Vec<SubtitleDeclaration>,
    pub declare_calls: usize,
    pub cross_origin_anonymous: bool,
    pub loaded_source: Option<String>,
    pub error: Option<NativeMediaError>,
}

impl FakeMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(mut self, tracks: Vec<AudioTrack>) -> Self {
        self.audio = Some(tracks);
        self
    }

    pub fn with_text(mut self, tracks: Vec<TextTrack>) -> Self {
        self.text = Some(tracks);
        self
    }

    pub fn with_lazy_cues(mut self, track: usize, cues: Vec<Cue>) -> Self {
        self.lazy_cues.insert(track, cues);
        self
    }

    /// Simulate the element appending a cue while playing.
    pub fn push_cue(&mut self, track: usize, cue: Cue) {
        if let Some(track) = self.text.as_mut().and_then(|t| t.get_mut(track)) {
            track.cues.push(cue);
        }
    }

    /// Simulate the active cue set of a track changing.
    pub fn set_active_cues(&mut self, track: usize, active: Vec<usize>) {
        if let Some(track) = self.text.as_mut().and_then(|t| t.get_mut(track)) {
            track.active_cues = active;
        }
    }

    pub fn enabled_audio(&self) -> Vec<usize> {
        self.audio
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, t)| t.enabled)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn active_text(&self) -> Vec<usize> {
        self.text
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, t)| t.mode.is_active())
            .map(|(i, _)| i)
            .collect()
    }
}

impl MediaElement for FakeMedia {
    fn audio_tracks(&self) -> Option<&[AudioTrack]> {
        self.audio.as_deref()
    }

    fn text_tracks(&self) -> Option<&[TextTrack]> {
        self.text.as_deref()
    }

    fn set_audio_track_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(track) = self.audio.as_mut().and_then(|t| t.get_mut(index)) {
            track.enabled = enabled;
        }
    }

    fn set_text_track_mode(&mut self, index: usize, mode: TextTrackMode) {
        self.mode_changes.push((index, mode));
        if let Some(track) = self.text.as_mut().and_then(|t| t.get_mut(index)) {
            track.mode = mode;
            if mode == TextTrackMode::Showing
                && let Some(cues) = self.lazy_cues.remove(&index)
            {
                track.cues.extend(cues);
            }
        }
    }

    fn cues_mut(&mut self, track: usize) -> Option<&mut [Cue]> {
        self.text
            .as_mut()
            .and_then(|t| t.get_mut(track))
            .map(|t| t.cues.as_mut_slice())
    }

    fn set_cross_origin_anonymous(&mut self) {
        self.cross_origin_anonymous = true;
    }

    fn declare_subtitles(&mut self, tracks: &[SubtitleDeclaration]) {
        self.declare_calls += 1;
        self.declared = tracks.to_vec();
        self.text = Some(
            tracks
                .iter()
                .map(|d| {
                    TextTrack::new(d.kind, Some(&d.label), Some(&d.language))
                })
                .collect(),
        );
    }

    fn load_source(&mut self, url: &str) {
        self.loaded_source = Some(url.to_string());
    }

    fn error(&self) -> Option<NativeMediaError> {
        self.error.clone()
    }
}

/// Everything the fake host has been told.
#[derive(Debug, Default, Clone)]
pub struct HostRecord {
    pub logs: Vec<(LogLevel, String)>,
    pub loading_started: usize,
    pub loading_stopped: usize,
    pub playback_started: Vec<bool>,
    pub playback_stopped: usize,
    pub volume_applied: usize,
    pub states: Vec<PlaybackState>,
    pub extension_labels: Vec<Option<String>>,
    pub actions: Vec<String>,
    pub fullscreen_requests: usize,
    pub resolved_ids: Vec<String>,
    pub data_requests: Vec<String>,
}

impl HostRecord {
    pub fn messages(&self, level: LogLevel) -> Vec<&str> {
        self.logs
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    pub fn last_extension_label(&self) -> Option<&str> {
        self.extension_labels.last().and_then(|l| l.as_deref())
    }
}

/// Scriptable plugin host.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub record: Mutex<HostRecord>,
    pub data: Mutex<HashMap<String, Value>>,
    pub url_params: Mutex<HashMap<String, String>>,
    pub responses: Mutex<HashMap<String, InteractionResponse>>,
    deferred: Mutex<HashMap<String, oneshot::Receiver<InteractionResponse>>>,
    pub secure: bool,
    pub fullscreen_enabled: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn with_fullscreen(mut self) -> Self {
        self.fullscreen_enabled = true;
        self
    }

    pub fn with_data(self, key: &str, value: Value) -> Self {
        self.data.lock().insert(key.to_string(), value);
        self
    }

    pub fn with_param(self, name: &str, value: &str) -> Self {
        self.url_params
            .lock()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_response(self, id: &str, response: InteractionResponse) -> Self {
        self.responses.lock().insert(id.to_string(), response);
        self
    }

    /// Make `resolve(id)` wait until the returned sender fires.
    pub fn defer(&self, id: &str) -> oneshot::Sender<InteractionResponse> {
        let (tx, rx) = oneshot::channel();
        self.deferred.lock().insert(id.to_string(), rx);
        tx
    }

    pub fn snapshot(&self) -> HostRecord {
        self.record.lock().clone()
    }
}

#[async_trait]
impl PluginHost for FakeHost {
    async fn resolve(&self, id: &str) -> InteractionResponse {
        self.record.lock().resolved_ids.push(id.to_string());
        let deferred = self.deferred.lock().remove(id);
        if let Some(rx) = deferred {
            return rx
                .await
                .unwrap_or_else(|_| InteractionResponse::error("cancelled"));
        }
        self.responses
            .lock()
            .get(id)
            .cloned()
            .unwrap_or_else(|| InteractionResponse::error(format!("unknown id {id}")))
    }

    async fn request_data(&self, key: &str) -> Option<Value> {
        self.record.lock().data_requests.push(key.to_string());
        self.data.lock().get(key).cloned()
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.record.lock().logs.push((level, message.to_string()));
    }

    fn start_loading(&self) {
        self.record.lock().loading_started += 1;
    }

    fn stop_loading(&self) {
        self.record.lock().loading_stopped += 1;
    }

    fn start_playback(&self, accelerated: bool) {
        self.record.lock().playback_started.push(accelerated);
    }

    fn stop_playback(&self) {
        self.record.lock().playback_stopped += 1;
    }

    fn apply_volume(&self) {
        self.record.lock().volume_applied += 1;
    }

    fn set_state(&self, state: PlaybackState) {
        self.record.lock().states.push(state);
    }

    fn set_extension_label(&self, label: Option<&str>) {
        self.record
            .lock()
            .extension_labels
            .push(label.map(str::to_string));
    }

    fn execute_action(&self, action: &str) {
        self.record.lock().actions.push(action.to_string());
    }

    fn is_fullscreen_enabled(&self) -> bool {
        self.fullscreen_enabled
    }

    fn request_fullscreen(&self) {
        self.record.lock().fullscreen_requests += 1;
    }

    fn url_param(&self, name: &str) -> Option<String> {
        self.url_params.lock().get(name).cloned()
    }

    fn is_secure_context(&self) -> bool {
        self.secure
    }

    fn host_url(&self, path: &str) -> String {
        format!("http://host.test/{path}")
    }
}

/// Preference store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}

/// Overlay that remembers what it was told.
#[derive(Debug, Default)]
pub struct FakeOverlay {
    pub text: String,
    pub visible: bool,
    pub classes: HashMap<OverlayTarget, Vec<String>>,
}

impl FakeOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self, target: OverlayTarget) -> &[String] {
        self.classes.get(&target).map(Vec::as_slice).unwrap_or_default()
    }
}

impl SubtitleOverlay for FakeOverlay {
    fn replace_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_classes(&mut self, target: OverlayTarget, classes: &[String]) {
        self.classes.insert(target, classes.to_vec());
    }
}
