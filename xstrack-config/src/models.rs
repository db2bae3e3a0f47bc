use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder in [`EngineConfig::proxy_url`] replaced by the encoded URL.
pub const URL_PLACEHOLDER: &str = "{URL}";

/// Source that produced the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    File(PathBuf),
}

/// Engine tuning. Every field has a default matching the plugin's historic
/// behavior, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix of video properties and of the language preference keys.
    pub property_prefix: String,
    /// Prefix of the persisted style setting keys.
    pub style_prefix: String,
    /// Host-relative proxy endpoint used when cross-origin credentials are
    /// disallowed. Must contain `{URL}`.
    pub proxy_url: String,
    /// Line offset applied to active cues; moves them up from the bottom edge.
    pub cue_line: i32,
    pub cue_snap_to_lines: bool,
    /// Platform substrings on which the fullscreen option is offered.
    pub fullscreen_platforms: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            property_prefix: "html5x:".to_string(),
            style_prefix: "html5xs:".to_string(),
            proxy_url: format!("services/proxy.php?url={URL_PLACEHOLDER}"),
            cue_line: -3,
            cue_snap_to_lines: true,
            fullscreen_platforms: vec!["ios".to_string(), "mac".to_string()],
        }
    }
}

impl EngineConfig {
    /// `<property_prefix><name>`
    pub fn property_key(&self, name: &str) -> String {
        format!("{}{name}", self.property_prefix)
    }

    /// `<style_prefix><setting>`
    pub fn style_key(&self, setting: &str) -> String {
        format!("{}{setting}", self.style_prefix)
    }
}
