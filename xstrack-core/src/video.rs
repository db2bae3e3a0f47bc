//! Per-load settings derived from the video property bag.

use tracing::debug;
use xstrack_config::EngineConfig;
use xstrack_model::{SubtitleOrder, SubtitleSource, VideoInfo};

/// Property names, relative to the configured property prefix.
pub mod keys {
    pub const CORS: &str = "cors";
    pub const CONTENT: &str = "content";
    pub const AUDIO_TRACK: &str = "audiotrack";
    pub const SUBTITLE: &str = "subtitle";
    pub const SUBTITLE_DECLARATION: &str = "subtitle:";
    pub const SUBTITLE_ORDER: &str = "subtitle:order";
    /// Not prefixed
    pub const EXTENSION_LABEL: &str = "label:extension";
}

/// How subtitle files are fetched across origins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossOrigin {
    /// The element fetches without credentials
    #[default]
    Anonymous,
    /// HTTP(S) sources are routed through the host's proxy endpoint
    Proxy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSettings {
    pub cross_origin: CrossOrigin,
    /// Whether the related content row is shown at all
    pub show_related: bool,
    /// Whether the video has related content to open
    pub has_related: bool,
    /// Label appended after the track indicators
    pub extension_label: Option<String>,
}

impl VideoSettings {
    pub fn from_info(info: Option<&VideoInfo>, config: &EngineConfig) -> Self {
        let Some(info) = info else {
            return Self::default();
        };
        let cross_origin = if info.get_bool(&config.property_key(keys::CORS), true) {
            CrossOrigin::Anonymous
        } else {
            CrossOrigin::Proxy
        };
        Self {
            cross_origin,
            show_related: info.get_bool(&config.property_key(keys::CONTENT), false),
            has_related: info.has_related_content(),
            extension_label: info.get(keys::EXTENSION_LABEL).map(str::to_string),
        }
    }
}

/// Subtitle sources declared as `<prefix>subtitle:<language>:<label>`,
/// ordered per `<prefix>subtitle:order`.
pub fn subtitle_sources(info: Option<&VideoInfo>, config: &EngineConfig) -> Vec<SubtitleSource> {
    let Some(info) = info else {
        return Vec::new();
    };
    let prefix = config.property_key(keys::SUBTITLE_DECLARATION);
    let mut sources: Vec<SubtitleSource> = info
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(prefix.as_str())
                .and_then(|declaration| {
                    SubtitleSource::from_declaration(declaration, value)
                })
        })
        .collect();

    let order = SubtitleOrder::from_property(
        info.get(&config.property_key(keys::SUBTITLE_ORDER)),
    );
    order.sort(&mut sources);
    debug!(count = sources.len(), %order, "collected subtitle sources");
    sources
}
