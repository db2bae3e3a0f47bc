use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::{ConfigSource, EngineConfig, URL_PLACEHOLDER};
use crate::util::{parse_bool, parse_csv};

/// Path of an optional TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "XSTRACK_CONFIG_PATH";
pub const PROPERTY_PREFIX_VAR: &str = "XSTRACK_PROPERTY_PREFIX";
pub const STYLE_PREFIX_VAR: &str = "XSTRACK_STYLE_PREFIX";
pub const PROXY_URL_VAR: &str = "XSTRACK_PROXY_URL";
pub const CUE_LINE_VAR: &str = "XSTRACK_CUE_LINE";
pub const CUE_SNAP_VAR: &str = "XSTRACK_CUE_SNAP_TO_LINES";
pub const FULLSCREEN_PLATFORMS_VAR: &str = "XSTRACK_FULLSCREEN_PLATFORMS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Effective configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: EngineConfig,
    pub source: ConfigSource,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Composes defaults, an optional TOML file and `XSTRACK_*` overrides.
///
/// Evaluation order:
/// 1) built-in defaults,
/// 2) the file named by `$XSTRACK_CONFIG_PATH`, if set,
/// 3) individual `XSTRACK_*` variables.
#[derive(Debug, Clone)]
pub struct ConfigLoader<F = fn(&str) -> Option<String>> {
    env: F,
}

impl ConfigLoader {
    pub fn from_process_env() -> Self {
        Self { env: process_env }
    }
}

impl<F> ConfigLoader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Loader reading variables through `env` instead of the process
    /// environment.
    pub fn with_env(env: F) -> Self {
        Self { env }
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigError> {
        match self.var(CONFIG_PATH_VAR) {
            Some(path) => self.load_file(Path::new(&path)),
            None => self.finish(EngineConfig::default(), ConfigSource::Default),
        }
    }

    pub fn load_file(&self, path: &Path) -> Result<ConfigLoad, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "loaded engine config file");
        self.finish(config, ConfigSource::File(path.to_path_buf()))
    }

    fn finish(
        &self,
        mut config: EngineConfig,
        source: ConfigSource,
    ) -> Result<ConfigLoad, ConfigError> {
        self.apply_overrides(&mut config)?;
        validate(&config)?;
        Ok(ConfigLoad { config, source })
    }

    fn apply_overrides(&self, config: &mut EngineConfig) -> Result<(), ConfigError> {
        if let Some(prefix) = self.var(PROPERTY_PREFIX_VAR) {
            config.property_prefix = prefix;
        }
        if let Some(prefix) = self.var(STYLE_PREFIX_VAR) {
            config.style_prefix = prefix;
        }
        if let Some(url) = self.var(PROXY_URL_VAR) {
            config.proxy_url = url;
        }
        if let Some(raw) = self.var(CUE_LINE_VAR) {
            config.cue_line = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: CUE_LINE_VAR,
                    value: raw.clone(),
                }
            })?;
        }
        if let Some(raw) = self.var(CUE_SNAP_VAR) {
            config.cue_snap_to_lines =
                parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                    key: CUE_SNAP_VAR,
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = self.var(FULLSCREEN_PLATFORMS_VAR) {
            config.fullscreen_platforms = parse_csv(&raw);
        }
        Ok(())
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.env)(key).filter(|value| !value.trim().is_empty())
    }
}

fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.property_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "property_prefix must not be empty".to_string(),
        ));
    }
    if config.style_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "style_prefix must not be empty".to_string(),
        ));
    }
    if !config.proxy_url.contains(URL_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "proxy_url must contain {URL_PLACEHOLDER}"
        )));
    }
    Ok(())
}
