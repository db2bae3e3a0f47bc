//! Data exchanged with the plugin host.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity of a diagnostic routed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Debug,
    Warn,
    Error,
}

/// Playback state reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlaybackState {
    Playing,
    Paused,
}

/// Response to a resolve interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InteractionResponse {
    #[cfg_attr(feature = "serde", serde(default))]
    pub error: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub response: Option<InteractionPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InteractionPayload {
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
}

impl InteractionResponse {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            error: None,
            response: Some(InteractionPayload {
                url: Some(url.into()),
            }),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            response: None,
        }
    }

    /// Non-empty error string, if the host reported one.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    pub fn resolved_url(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// Platform information from the `info:base` data request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseInfo {
    pub platform: Option<String>,
}

impl BaseInfo {
    /// Whether the platform name contains any of `needles`.
    pub fn platform_matches<S: AsRef<str>>(&self, needles: &[S]) -> bool {
        self.platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .is_some_and(|platform| {
                needles.iter().any(|n| platform.contains(n.as_ref()))
            })
    }
}

/// Per-video property bag, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoInfo {
    /// Position of the video in its playlist; `Some(n >= 0)` means related
    /// content exists
    pub index: Option<i64>,
    properties: Vec<(String, String)>,
}

impl VideoInfo {
    pub fn new<I, K, V>(index: Option<i64>, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            index,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Non-empty string value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Boolean value of `key`, `default` when absent or unparseable.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(str::to_ascii_lowercase).as_deref() {
            Some("true") | Some("1") | Some("yes") | Some("on") => true,
            Some("false") | Some("0") | Some("no") | Some("off") => false,
            _ => default,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_related_content(&self) -> bool {
        self.index.is_some_and(|index| index >= 0)
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::{BaseInfo, VideoInfo};
    use serde_json::Value;

    impl VideoInfo {
        /// Reads `video.info` from a `video:info` data response.
        pub fn from_data(data: &Value) -> Option<Self> {
            let info = data.get("video")?.get("info")?;
            if info.is_null() {
                return None;
            }
            let index = info.get("index").and_then(Value::as_i64);
            let properties = info
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| {
                    props
                        .iter()
                        .filter_map(|(k, v)| scalar(v).map(|v| (k.clone(), v)))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            Some(VideoInfo::new(index, properties))
        }
    }

    impl BaseInfo {
        /// Reads `info` from an `info:base` data response.
        pub fn from_data(data: &Value) -> Self {
            let platform = data
                .get("info")
                .and_then(|info| info.get("platform"))
                .and_then(Value::as_str)
                .map(str::to_string);
            BaseInfo { platform }
        }
    }

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_properties_fall_back_to_default() {
        let info = VideoInfo::new(
            None,
            [("html5x:cors", "false"), ("html5x:content", "maybe")],
        );
        assert!(!info.get_bool("html5x:cors", true));
        assert!(info.get_bool("html5x:content", true));
        assert!(!info.get_bool("html5x:missing", false));
    }

    #[test]
    fn empty_values_read_as_absent() {
        let info = VideoInfo::new(Some(-1), [("label:extension", "")]);
        assert_eq!(info.get("label:extension"), None);
        assert!(!info.has_related_content());
    }

    #[test]
    fn platform_match_uses_substrings() {
        let info = BaseInfo {
            platform: Some("tizen|ios-webview".into()),
        };
        assert!(info.platform_matches(&["ios", "mac"]));
        assert!(!BaseInfo::default().platform_matches(&["ios"]));
    }

    #[test]
    fn interaction_response_ignores_blank_fields() {
        let response = InteractionResponse {
            error: Some(String::new()),
            response: Some(InteractionPayload { url: None }),
        };
        assert_eq!(response.error_message(), None);
        assert_eq!(response.resolved_url(), None);
    }
}
