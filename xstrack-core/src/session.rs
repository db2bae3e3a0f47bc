//! Per-player session state and lifecycle.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use xstrack_config::EngineConfig;
use xstrack_contracts::{MediaElement, PluginHost, PreferenceStore, SubtitleOverlay};
use xstrack_model::{
    BaseInfo, LogLevel, PlaybackState, SelectionState, SubtitleDeclaration,
    VideoInfo,
};

use crate::defaults;
use crate::error::{EngineError, Result};
use crate::registry::TrackRegistry;
use crate::source::{ResolvedSubtitles, SubtitlePlan};
use crate::video::{self, CrossOrigin, VideoSettings, keys};

/// Data request answered with platform information.
pub const INFO_BASE: &str = "info:base";
/// Data request answered with the video property bag.
pub const VIDEO_INFO: &str = "video:info";
/// URL parameter holding an identifier to resolve.
pub const ID_PARAM: &str = "id";
/// URL parameter holding a direct video URL.
pub const URL_PARAM: &str = "url";

/// Snapshot of the session epoch taken when an asynchronous phase starts.
///
/// The epoch moves on every load, re-init and dispose. Continuations
/// carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Everything one player instance knows between `init` and `dispose`.
///
/// Owns the attached media element and the overlay; shares host, store and
/// configuration with the embedder.
pub struct PlayerSession<M, O, H: ?Sized, S: ?Sized> {
    pub(crate) host: Arc<H>,
    pub(crate) store: Arc<S>,
    pub(crate) overlay: O,
    pub(crate) config: Arc<EngineConfig>,
    pub(crate) media: Option<M>,
    pub(crate) selection: SelectionState,
    pub(crate) video: VideoSettings,
    pub(crate) base_info: BaseInfo,
    /// Text tracks whose newly added cues are wired on cue change
    pub(crate) cue_listeners: BTreeSet<usize>,
    epoch: u64,
    ready: bool,
    ended: bool,
}

impl<M, O, H: ?Sized, S: ?Sized> fmt::Debug for PlayerSession<M, O, H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerSession")
            .field("attached", &self.media.is_some())
            .field("epoch", &self.epoch)
            .field("ready", &self.ready)
            .field("ended", &self.ended)
            .field("selection", &self.selection)
            .field("video", &self.video)
            .field("cue_listeners", &self.cue_listeners)
            .finish()
    }
}

impl<M, O, H, S> PlayerSession<M, O, H, S>
where
    M: MediaElement,
    O: SubtitleOverlay,
    H: PluginHost + ?Sized,
    S: PreferenceStore + ?Sized,
{
    pub fn new(host: Arc<H>, store: Arc<S>, overlay: O, config: Arc<EngineConfig>) -> Self {
        Self {
            host,
            store,
            overlay,
            config,
            media: None,
            selection: SelectionState::default(),
            video: VideoSettings::default(),
            base_info: BaseInfo::default(),
            cue_listeners: BTreeSet::new(),
            epoch: 0,
            ready: false,
            ended: false,
        }
    }

    /// Attach a media element. Replaces any previous element and resets
    /// every per-load flag.
    pub fn init(&mut self, media: M) {
        if self.media.is_some() {
            debug!(epoch = self.epoch, "re-initializing attached session");
        }
        self.epoch += 1;
        self.media = Some(media);
        self.reset_state();
    }

    /// Detach the media element. Later events and late continuations are
    /// no-ops.
    pub fn dispose(&mut self) {
        if self.media.take().is_some() {
            self.epoch += 1;
            self.reset_state();
            debug!(epoch = self.epoch, "session disposed");
        }
    }

    fn reset_state(&mut self) {
        self.ready = false;
        self.ended = false;
        self.selection.reset();
        self.video = VideoSettings::default();
        self.base_info = BaseInfo::default();
        self.cue_listeners.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.media.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn video_settings(&self) -> &VideoSettings {
        &self.video
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> TrackRegistry<'_, M> {
        TrackRegistry::new(self.media.as_ref())
    }

    pub fn ticket(&self) -> LoadTicket {
        LoadTicket(self.epoch)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.media.is_some() && ticket.0 == self.epoch
    }

    pub(crate) fn check_ticket(&self, ticket: LoadTicket) -> Result<()> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(EngineError::StaleTicket {
                ticket: ticket.0,
                current: self.epoch,
            })
        }
    }

    /// Surface an engine error through the host diagnostics sink.
    pub(crate) fn report(&self, err: &EngineError) {
        match err.level() {
            LogLevel::Error => error!(error = %err, "engine error"),
            LogLevel::Warn => warn!(error = %err, "engine warning"),
            LogLevel::Debug => debug!(error = %err, "engine notice"),
        }
        self.host.log(err.level(), &err.to_string());
    }

    /// Host `ready`: resolve the video, declare subtitles and start loading
    /// the source.
    pub async fn load(&mut self) {
        let Some(ticket) = self.start_load() else {
            return;
        };
        let host = Arc::clone(&self.host);

        let base = host.request_data(INFO_BASE).await;
        if self.check_ticket(ticket).is_err() {
            return;
        }
        self.base_info = base
            .as_ref()
            .map(BaseInfo::from_data)
            .unwrap_or_default();

        let url = match self.video_url().await {
            Ok(url) => url,
            Err(err) => {
                self.report(&err);
                host.stop_loading();
                return;
            }
        };

        let data = host.request_data(VIDEO_INFO).await;
        let info = data.as_ref().and_then(VideoInfo::from_data);
        let Some(plan) = self.prepare_subtitles(ticket, info.as_ref()) else {
            return;
        };
        let resolved = plan.resolve(&*host, &self.config).await;
        if self.declare_subtitles(resolved) {
            self.load_source(ticket, &url);
        }
    }

    /// Begin a load: moves the epoch, shows the loading indicator and
    /// applies the stored subtitle styles. `None` when detached.
    pub fn start_load(&mut self) -> Option<LoadTicket> {
        if self.media.is_none() {
            self.report(&EngineError::NotInitialized);
            return None;
        }
        self.epoch += 1;
        info!(epoch = self.epoch, "loading video");
        self.host.log(LogLevel::Debug, "Video plugin ready");
        self.host.start_loading();
        self.apply_styles();
        Some(self.ticket())
    }

    /// Video URL from the `id` parameter (resolved through the host) or
    /// the `url` parameter.
    async fn video_url(&self) -> Result<String> {
        if let Some(id) = self.host.url_param(ID_PARAM).filter(|id| !id.is_empty()) {
            let response = self.host.resolve(&id).await;
            if let Some(error) = response.error_message() {
                return Err(EngineError::Resolution(error.to_string()));
            }
            return response
                .resolved_url()
                .map(str::to_string)
                .ok_or(EngineError::VideoUrlMissing);
        }
        self.host
            .url_param(URL_PARAM)
            .filter(|url| !url.is_empty())
            .ok_or(EngineError::VideoSourceMissing)
    }

    /// Apply the per-video settings of `info` and collect the subtitle
    /// sources that still need resolving.
    pub fn prepare_subtitles(
        &mut self,
        ticket: LoadTicket,
        info: Option<&VideoInfo>,
    ) -> Option<SubtitlePlan> {
        if let Err(err) = self.check_ticket(ticket) {
            debug!(error = %err, "dropping video info");
            return None;
        }
        let video = VideoSettings::from_info(info, &self.config);
        if video.cross_origin == CrossOrigin::Anonymous
            && let Some(media) = self.media.as_mut()
        {
            media.set_cross_origin_anonymous();
        }

        self.selection.default_audio_language = defaults::preferred_language(
            info,
            &*self.store,
            &self.config.property_key(keys::AUDIO_TRACK),
        );
        let language = defaults::preferred_language(
            info,
            &*self.store,
            &self.config.property_key(keys::SUBTITLE),
        );
        let sources = video::subtitle_sources(info, &self.config);
        let cross_origin = video.cross_origin;
        self.video = video;

        Some(SubtitlePlan {
            ticket,
            sources,
            cross_origin,
            language,
        })
    }

    /// Hand the joined subtitle list to the media element and remember
    /// which declared track is the default. Returns `false` when the
    /// result belongs to an earlier load.
    pub fn declare_subtitles(&mut self, resolved: ResolvedSubtitles) -> bool {
        if let Err(err) = self.check_ticket(resolved.ticket) {
            debug!(error = %err, "dropping resolved subtitles");
            return false;
        }
        let Some(media) = self.media.as_mut() else {
            return false;
        };
        let default_index = defaults::default_subtitle_index(
            &resolved.sources,
            resolved.language.as_deref(),
        );
        let declarations: Vec<SubtitleDeclaration> = resolved
            .sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                SubtitleDeclaration::from_source(source, Some(index) == default_index)
            })
            .collect();
        media.declare_subtitles(&declarations);
        self.cue_listeners.clear();
        self.selection.default_subtitle_index = default_index;
        debug!(
            declared = declarations.len(),
            default = ?default_index,
            "subtitle tracks declared"
        );
        true
    }

    /// Set the source and start loading it.
    pub fn load_source(&mut self, ticket: LoadTicket, url: &str) -> bool {
        if let Err(err) = self.check_ticket(ticket) {
            debug!(error = %err, "dropping video source");
            return false;
        }
        match self.media.as_mut() {
            Some(media) => {
                media.load_source(url);
                true
            }
            None => false,
        }
    }

    /// Media element can play. Runs the default selection once per
    /// attached element.
    pub fn on_ready(&mut self) {
        if self.media.is_none() || self.ready {
            return;
        }
        self.ready = true;
        debug!("video ready");
        self.host.log(LogLevel::Debug, "Video ready");

        let audio = defaults::default_audio_index(
            &self.registry(),
            self.selection.default_audio_language.as_deref(),
        );
        self.select_audio_track(audio, false, false);
        self.select_subtitle_track(
            self.selection.default_subtitle_index,
            false,
            true,
        );
        self.host.apply_volume();
        self.host.stop_loading();
        self.host.start_playback(true);
    }

    pub fn on_error(&mut self) {
        let Some(native) = self.media.as_ref().and_then(M::error) else {
            return;
        };
        let message = format!("Video error: {native}");
        error!(code = native.code.code(), "{message}");
        self.host.log(LogLevel::Error, &message);
        self.host.stop_loading();
    }

    pub fn on_ended(&mut self) {
        if self.media.is_none() || self.ended {
            return;
        }
        self.ended = true;
        debug!("video ended");
        self.host.log(LogLevel::Debug, "Video ended");
        self.host.stop_playback();
    }

    pub fn on_waiting(&mut self) {
        if self.media.is_some() {
            self.host.start_loading();
        }
    }

    pub fn on_playing(&mut self) {
        if self.media.is_some() {
            self.host.stop_loading();
            self.host.set_state(PlaybackState::Playing);
        }
    }

    pub fn on_paused(&mut self) {
        if self.media.is_some() {
            self.host.stop_loading();
            self.host.set_state(PlaybackState::Paused);
        }
    }

    /// Play, seeked and abort events.
    pub fn on_continue(&mut self) {
        if self.media.is_some() {
            self.host.stop_loading();
        }
    }
}
