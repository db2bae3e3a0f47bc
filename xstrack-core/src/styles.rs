//! Persisted subtitle style settings and their overlay classes.

use tracing::{debug, warn};
use xstrack_config::EngineConfig;
use xstrack_contracts::{MediaElement, PluginHost, PreferenceStore, SubtitleOverlay};
use xstrack_model::{OverlayTarget, StyleChange, StyleSetting, StyleSettings, StyleValue};

use crate::session::PlayerSession;

/// Current settings as stored under `<style prefix><setting>`.
pub fn load_style_settings<S: PreferenceStore + ?Sized>(
    store: &S,
    config: &EngineConfig,
) -> StyleSettings {
    let mut settings = StyleSettings::default();
    for setting in StyleSetting::ALL {
        settings.set(setting, store.get(&config.style_key(setting.key())));
    }
    settings
}

/// Store or clear one setting. Unknown setting names are ignored.
pub fn store_style_change<S: PreferenceStore + ?Sized>(
    store: &S,
    config: &EngineConfig,
    change: &StyleChange,
) {
    let setting = match change.setting.parse::<StyleSetting>() {
        Ok(setting) => setting,
        Err(err) => {
            warn!(error = %err, "ignoring style change");
            return;
        }
    };
    let key = config.style_key(setting.key());
    match &change.value {
        StyleValue::Off => store.remove(&key),
        StyleValue::Set(value) => store.set(&key, value),
    }
    debug!(%setting, value = ?change.value, "style setting stored");
}

impl<M, O, H, S> PlayerSession<M, O, H, S>
where
    M: MediaElement,
    O: SubtitleOverlay,
    H: PluginHost + ?Sized,
    S: PreferenceStore + ?Sized,
{
    /// Replace the class lists of the subtitle box and its container with
    /// the stored settings.
    pub fn apply_styles(&mut self) {
        let settings = load_style_settings(&*self.store, &self.config);
        for target in [OverlayTarget::Subtitles, OverlayTarget::Container] {
            self.overlay
                .set_classes(target, &settings.classes_for(target));
        }
    }

    pub fn style_settings(&self) -> StyleSettings {
        load_style_settings(&*self.store, &self.config)
    }
}
