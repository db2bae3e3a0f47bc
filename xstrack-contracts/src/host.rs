use async_trait::async_trait;
use serde_json::Value;
use xstrack_model::{InteractionResponse, LogLevel, PlaybackState};

/// The shell embedding the engine.
///
/// Asynchronous calls are fire-and-forget from the host's perspective: each
/// resolves exactly once. Everything else is a synchronous notification.
#[async_trait]
pub trait PluginHost: Send + Sync {
    /// Resolve an opaque identifier to a concrete URL.
    async fn resolve(&self, id: &str) -> InteractionResponse;

    /// Fetch bootstrap data by key (`info:base`, `video:info`).
    async fn request_data(&self, key: &str) -> Option<Value>;

    /// Leveled diagnostics sink.
    fn log(&self, level: LogLevel, message: &str);

    fn start_loading(&self);

    fn stop_loading(&self);

    fn start_playback(&self, accelerated: bool);

    fn stop_playback(&self);

    fn apply_volume(&self);

    fn set_state(&self, state: PlaybackState);

    /// Label shown next to the player controls; `None` clears it.
    fn set_extension_label(&self, label: Option<&str>);

    /// Run a host action such as `cleanup`.
    fn execute_action(&self, action: &str);

    fn is_fullscreen_enabled(&self) -> bool;

    fn request_fullscreen(&self);

    /// Query parameter of the plugin URL.
    fn url_param(&self, name: &str) -> Option<String>;

    /// Whether the page requires secure transport.
    fn is_secure_context(&self) -> bool;

    /// Absolute URL of a host-relative path.
    fn host_url(&self, path: &str) -> String;
}
