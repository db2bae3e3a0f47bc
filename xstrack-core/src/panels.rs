//! Panel descriptors rebuilt from live state on every request.

use serde_json::Value;
use tracing::{trace, warn};
use xstrack_contracts::{MediaElement, PluginHost, PreferenceStore, SubtitleOverlay};
use xstrack_model::command::{BACK_ACTION, RELATED_CONTENT_ACTION};
use xstrack_model::{
    Command, Panel, PanelId, PanelItem, PanelPage, PanelTemplate,
    StyleChange, StyleSetting, StyleValue, action,
};

use crate::registry::TrackRegistry;
use crate::selection::{audio_track_label, subtitle_track_label};
use crate::session::PlayerSession;

const CHECK_ICON: &str = "check";
const BLANK_ICON: &str = "blank";
const LEVELS: usize = 11;
const FONT_WEIGHTS: [&str; 6] = ["Thin", "Light", "Regular", "Medium", "Bold", "Black"];
/// Percentage pages, in display order.
const LEVEL_PAGES: [(&str, StyleSetting); 3] = [
    ("Margin", StyleSetting::Margin),
    ("Size", StyleSetting::Size),
    ("Background", StyleSetting::Background),
];

/// State the options panel reflects.
#[derive(Debug, Clone, Copy)]
pub struct OptionsContext<'a> {
    pub focus: Option<&'a str>,
    pub show_fullscreen: bool,
    pub show_related: bool,
    pub has_related: bool,
}

fn focus_then(id: &str, next: String) -> String {
    action::sequence([action::commit(&Command::Focus(id.to_string())), next])
}

fn option_row(
    context: &OptionsContext<'_>,
    id: &str,
    icon: &str,
    label: &str,
    next: String,
) -> PanelItem {
    PanelItem {
        id: Some(id.to_string()),
        focus: Some(context.focus == Some(id)),
        icon: Some(icon.to_string()),
        label: label.to_string(),
        action: focus_then(id, next),
        ..PanelItem::default()
    }
}

/// Options menu: audio, subtitles, settings, fullscreen and related
/// content rows.
pub fn options_panel<M: MediaElement + ?Sized>(
    registry: &TrackRegistry<'_, M>,
    context: &OptionsContext<'_>,
) -> Panel {
    let audio = PanelItem {
        extension_label: Some(audio_track_label(
            registry.selected_audio(),
            registry.has_audio_tracks(),
        )),
        ..option_row(
            context,
            "audiotrack",
            "audiotrack",
            "Audio",
            action::request_panel(PanelId::AudioTrack),
        )
    };
    let subtitle = PanelItem {
        extension_label: Some(subtitle_track_label(
            registry.selected_subtitle(),
        )),
        ..option_row(
            context,
            "subtitle",
            "subtitles",
            "Subtitles",
            action::request_panel(PanelId::Subtitle),
        )
    };
    let settings = option_row(
        context,
        "settings",
        "settings",
        "Settings",
        action::request_panel(PanelId::Settings),
    );
    let fullscreen = PanelItem {
        display: Some(context.show_fullscreen),
        offset: Some("0,0.25,0,0".to_string()),
        ..option_row(
            context,
            "fullscreen",
            "fullscreen",
            "Fullscreen",
            action::commit(&Command::Fullscreen),
        )
    };
    let content = PanelItem {
        display: Some(context.show_related),
        enable: Some(context.has_related),
        offset: Some(
            if context.show_fullscreen {
                "0,0.5,0,0"
            } else {
                "0,0.25,0,0"
            }
            .to_string(),
        ),
        ..option_row(
            context,
            "content",
            "pageview",
            "Related Content",
            RELATED_CONTENT_ACTION.to_string(),
        )
    };

    Panel::with_items(
        "Options",
        PanelTemplate::control_rows(),
        vec![audio, subtitle, settings, fullscreen, content],
    )
}

fn track_row(command: Command, label: String, selected: bool) -> PanelItem {
    PanelItem {
        focus: Some(selected),
        label,
        extension_icon: Some(
            if selected { CHECK_ICON } else { BLANK_ICON }.to_string(),
        ),
        action: if selected {
            BACK_ACTION.to_string()
        } else {
            action::commit(&command)
        },
        ..PanelItem::default()
    }
}

/// Synthetic "None"/"Original" row followed by one row per audio track.
pub fn audio_panel<M: MediaElement + ?Sized>(registry: &TrackRegistry<'_, M>) -> Panel {
    let selected = registry.selected_audio().map(|entry| entry.index);
    let mut items = vec![track_row(
        Command::SelectAudio(None),
        audio_track_label(None, registry.has_audio_tracks()),
        selected.is_none(),
    )];
    items.extend(registry.audio().map(|entry| {
        track_row(
            Command::SelectAudio(Some(entry.index)),
            audio_track_label(Some(entry), true),
            selected == Some(entry.index),
        )
    }));
    Panel::with_items("Audio", PanelTemplate::control_rows(), items)
}

/// Synthetic "Off" row followed by one row per subtitle track.
pub fn subtitle_panel<M: MediaElement + ?Sized>(registry: &TrackRegistry<'_, M>) -> Panel {
    let selected = registry.selected_subtitle().map(|entry| entry.index);
    let mut items = vec![track_row(
        Command::SelectSubtitle(None),
        subtitle_track_label(None),
        selected.is_none(),
    )];
    items.extend(registry.subtitles().map(|entry| {
        track_row(
            Command::SelectSubtitle(Some(entry.index)),
            subtitle_track_label(Some(entry)),
            selected == Some(entry.index),
        )
    }));
    Panel::with_items("Subtitles", PanelTemplate::control_rows(), items)
}

fn style_cell(
    setting: StyleSetting,
    value: StyleValue,
    label: String,
    layout: String,
) -> PanelItem {
    PanelItem {
        label,
        layout: Some(layout),
        action: action::commit(&Command::Settings(Some(StyleChange {
            setting: setting.key().to_string(),
            value,
        }))),
        ..PanelItem::default()
    }
}

fn level_page(headline: &str, setting: StyleSetting) -> PanelPage {
    let prefix = setting.class_prefix().unwrap_or_default();
    let items = (0..LEVELS)
        .map(|level| {
            let width = if level == LEVELS - 1 { 2 } else { 1 };
            let layout = format!("{},{},{width},1", level % 8, level / 8);
            if level == 0 {
                style_cell(setting, StyleValue::Off, "Off".to_string(), layout)
            } else {
                style_cell(
                    setting,
                    StyleValue::Set(format!("{prefix}{level}")),
                    format!("{level}0%"),
                    layout,
                )
            }
        })
        .collect();
    PanelPage {
        headline: headline.to_string(),
        items,
    }
}

fn font_page() -> PanelPage {
    let items = [false, true]
        .into_iter()
        .flat_map(|italic| FONT_WEIGHTS.iter().map(move |weight| (italic, *weight)))
        .enumerate()
        .map(|(position, (italic, weight))| {
            let (label, token) = if italic {
                (
                    format!("{weight} Italic"),
                    format!("roboto-{}-italic", weight.to_lowercase()),
                )
            } else {
                (
                    weight.to_string(),
                    format!("roboto-{}", weight.to_lowercase()),
                )
            };
            let layout = format!("{},{},4,1", (position / 6) * 4, position % 6);
            style_cell(StyleSetting::Font, StyleValue::Set(token), label, layout)
        })
        .collect();
    PanelPage {
        headline: "Font".to_string(),
        items,
    }
}

/// Percentage grids for margin, size and background plus the font grid.
pub fn settings_panel() -> Panel {
    let mut pages: Vec<PanelPage> = LEVEL_PAGES
        .iter()
        .map(|(headline, setting)| level_page(headline, *setting))
        .collect();
    pages.push(font_page());
    Panel::with_pages("Subtitles Settings", pages)
}

impl<M, O, H, S> PlayerSession<M, O, H, S>
where
    M: MediaElement,
    O: SubtitleOverlay,
    H: PluginHost + ?Sized,
    S: PreferenceStore + ?Sized,
{
    /// Panel descriptor for a host request id; `None` for unknown ids.
    pub fn handle_request(&self, id: &str) -> Option<Panel> {
        let panel = match id.parse::<PanelId>() {
            Ok(panel) => panel,
            Err(err) => {
                trace!(error = %err, "no panel for request");
                return None;
            }
        };
        let registry = self.registry();
        Some(match panel {
            PanelId::Options => {
                let context = OptionsContext {
                    focus: self.selection.options_focus.as_deref(),
                    show_fullscreen: self.fullscreen_supported(),
                    show_related: self.video.show_related,
                    has_related: self.video.has_related,
                };
                options_panel(&registry, &context)
            }
            PanelId::AudioTrack => audio_panel(&registry),
            PanelId::Subtitle => subtitle_panel(&registry),
            PanelId::Settings => settings_panel(),
        })
    }

    /// [`Self::handle_request`] serialized to the host's JSON schema.
    pub fn handle_request_json(&self, id: &str) -> Option<Value> {
        let panel = self.handle_request(id)?;
        serde_json::to_value(&panel)
            .inspect_err(|err| warn!(error = %err, id, "panel serialization failed"))
            .ok()
    }

    /// Fullscreen is offered on the configured platforms when the host
    /// allows it.
    pub fn fullscreen_supported(&self) -> bool {
        self.base_info
            .platform_matches(&self.config.fullscreen_platforms)
            && self.host.is_fullscreen_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xstrack_contracts::mock::FakeMedia;
    use xstrack_model::{AudioTrack, TextTrack, TextTrackKind, TextTrackMode};

    fn selected(panel: &Panel) -> Vec<usize> {
        panel
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_selected())
            .map(|(position, _)| position)
            .collect()
    }

    #[test]
    fn audio_panel_without_tracks_offers_original() {
        let media = FakeMedia::new();
        let panel = audio_panel(&TrackRegistry::new(Some(&media)));
        assert_eq!(panel.items().len(), 1);
        assert_eq!(panel.items()[0].label, "Original");
        assert_eq!(panel.items()[0].action, "back");
        assert_eq!(selected(&panel), [0]);
    }

    #[test]
    fn audio_panel_marks_enabled_track() {
        let mut media = FakeMedia::new().with_audio(vec![
            AudioTrack::new(Some("Main"), Some("en")),
            AudioTrack::new(None, Some("de")),
        ]);
        media.set_audio_track_enabled(1, true);
        let panel = audio_panel(&TrackRegistry::new(Some(&media)));

        let labels: Vec<_> = panel.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["None", "Main (EN)", "Audio Track 2 (DE)"]);
        assert_eq!(selected(&panel), [2]);
        assert_eq!(
            panel.items()[0].action,
            "player:commit:message:audiotrack:-1"
        );
        assert_eq!(
            panel.items()[1].action,
            "player:commit:message:audiotrack:0"
        );
    }

    #[test]
    fn subtitle_panel_has_exactly_one_selected_row() {
        let mut media = FakeMedia::new().with_text(vec![
            TextTrack::new(TextTrackKind::Metadata, None, None),
            TextTrack::new(TextTrackKind::Subtitles, None, Some("en")),
            TextTrack::new(TextTrackKind::Captions, Some("CC"), None),
        ]);
        let panel = subtitle_panel(&TrackRegistry::new(Some(&media)));
        assert_eq!(selected(&panel), [0]);

        media.set_text_track_mode(2, TextTrackMode::Hidden);
        let panel = subtitle_panel(&TrackRegistry::new(Some(&media)));
        let labels: Vec<_> = panel.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Off", "Subtitles 2 (EN)", "CC"]);
        assert_eq!(selected(&panel), [2]);
        assert_eq!(
            panel.items()[1].action,
            "player:commit:message:subtitle:1"
        );
    }

    #[test]
    fn settings_panel_layout() {
        let panel = settings_panel();
        let pages = panel.pages.as_deref().unwrap_or_default();
        let headlines: Vec<_> = pages.iter().map(|p| p.headline.as_str()).collect();
        assert_eq!(headlines, ["Margin", "Size", "Background", "Font"]);

        let margin = &pages[0].items;
        assert_eq!(margin.len(), 11);
        assert_eq!(margin[0].label, "Off");
        assert_eq!(margin[0].action, "player:commit:message:settings:margin:off");
        assert_eq!(margin[3].label, "30%");
        assert_eq!(margin[3].action, "player:commit:message:settings:margin:m-3");
        assert_eq!(margin[9].layout.as_deref(), Some("1,1,1,1"));
        assert_eq!(margin[10].layout.as_deref(), Some("2,1,2,1"));
        assert_eq!(pages[1].items[5].action, "player:commit:message:settings:size:f-5");

        let fonts = &pages[3].items;
        assert_eq!(fonts.len(), 12);
        assert_eq!(fonts[0].label, "Thin");
        assert_eq!(fonts[0].layout.as_deref(), Some("0,0,4,1"));
        assert_eq!(fonts[11].label, "Black Italic");
        assert_eq!(fonts[11].layout.as_deref(), Some("4,5,4,1"));
        assert_eq!(
            fonts[7].action,
            "player:commit:message:settings:font:roboto-light-italic"
        );
    }

    #[test]
    fn options_rows_follow_context() {
        let media = FakeMedia::new();
        let context = OptionsContext {
            focus: Some("subtitle"),
            show_fullscreen: true,
            show_related: true,
            has_related: false,
        };
        let panel = options_panel(&TrackRegistry::new(Some(&media)), &context);
        let items = panel.items();
        let ids: Vec<_> = items.iter().filter_map(|i| i.id.as_deref()).collect();
        assert_eq!(ids, ["audiotrack", "subtitle", "settings", "fullscreen", "content"]);
        assert_eq!(items[0].extension_label.as_deref(), Some("Original"));
        assert_eq!(items[1].extension_label.as_deref(), Some("Off"));
        assert_eq!(items[1].focus, Some(true));
        assert_eq!(items[0].focus, Some(false));
        assert_eq!(
            items[0].action,
            "[player:commit:message:focus:audiotrack|panel:request:player:audiotrack]"
        );
        assert_eq!(
            items[3].action,
            "[player:commit:message:focus:fullscreen|player:commit:message:fullscreen]"
        );
        assert_eq!(items[4].action, "[player:commit:message:focus:content|player:content]");
        assert_eq!(items[4].offset.as_deref(), Some("0,0.5,0,0"));
        assert_eq!(items[4].enable, Some(false));
    }
}
