mod common;

use serde_json::json;
use xstrack_contracts::PreferenceStore;
use xstrack_contracts::mock::{FakeHost, FakeMedia, MemoryStore};
use xstrack_core::CrossOrigin;
use xstrack_model::{AudioTrack, Cue, InteractionResponse, LogLevel};

use common::{Harness, VIDEO_URL, base_info, video_info};

fn media() -> FakeMedia {
    FakeMedia::new()
        .with_audio(vec![
            AudioTrack::new(Some("Original"), Some("en")),
            AudioTrack::new(Some("Synchro"), Some("de")),
        ])
        .with_lazy_cues(1, vec![Cue::new(0.0, 1.5, "Hello")])
}

fn host_with(properties: serde_json::Value) -> FakeHost {
    FakeHost::new()
        .with_param("url", VIDEO_URL)
        .with_data("info:base", base_info("ios"))
        .with_data("video:info", video_info(0, properties))
}

#[tokio::test]
async fn ready_applies_defaults_exactly_once() -> anyhow::Result<()> {
    let host = host_with(json!({
        "html5x:audiotrack": "de",
        "html5x:subtitle": "en",
        "html5x:subtitle:de:Deutsch": "https://cdn.test/de.vtt",
        "html5x:subtitle:en:English": "https://cdn.test/en.vtt",
    }));
    let mut h = Harness::attached(host, MemoryStore::new(), media());

    h.session.load().await;
    assert_eq!(h.media().loaded_source.as_deref(), Some(VIDEO_URL));
    assert_eq!(h.session.selection().default_subtitle_index, Some(1));

    h.session.on_ready();
    assert!(h.session.is_ready());
    assert_eq!(h.media().enabled_audio(), [1]);
    assert_eq!(h.media().active_text(), [1]);
    assert!(h.media().text.as_ref().unwrap()[1].cues[0].is_wired());

    // The user turns subtitles off; a duplicate ready must not undo it.
    h.session.handle_message("subtitle:-1");
    h.session.on_ready();
    assert!(h.media().active_text().is_empty());

    let record = h.host.snapshot();
    assert_eq!(record.playback_started, [true]);
    assert_eq!(record.volume_applied, 1);
    assert_eq!(record.loading_started, 1);
    assert_eq!(record.loading_stopped, 1);
    assert_eq!(record.data_requests, ["info:base", "video:info"]);
    assert_eq!(record.messages(LogLevel::Debug), ["Video plugin ready", "Video ready"]);

    // Defaults are applied without persisting them.
    assert_eq!(h.store.get("html5x:audiotrack"), None);
    Ok(())
}

#[tokio::test]
async fn ready_label_combines_both_indicators() {
    let host = host_with(json!({
        "html5x:audiotrack": "de",
        "html5x:subtitle": "en",
        "html5x:subtitle:en:English": "https://cdn.test/en.vtt",
        "label:extension": "{ico:msx-white:hd}",
    }));
    let mut h = Harness::attached(host, MemoryStore::new(), media());
    h.session.load().await;
    h.session.on_ready();

    assert_eq!(
        h.host.snapshot().last_extension_label(),
        Some(
            "{ico:msx-white:audiotrack} DE {ico:msx-white:subtitles} EN {ico:msx-white:hd}"
        )
    );
}

#[tokio::test]
async fn sentinel_beats_stored_subtitle_preference() {
    let host = host_with(json!({
        "html5x:subtitle": "default",
        "html5x:subtitle:en:English": "https://cdn.test/en.vtt",
    }));
    let store = MemoryStore::new().with("html5x:subtitle", "en");
    let mut h = Harness::attached(host, store, media());

    h.session.load().await;
    h.session.on_ready();

    assert_eq!(h.session.selection().default_subtitle_index, None);
    assert!(h.media().declared.iter().all(|d| !d.default));
    assert!(h.media().active_text().is_empty());
}

#[tokio::test]
async fn duplicate_language_defaults_to_last_declared() {
    let host = host_with(json!({
        "html5x:subtitle": "en",
        "html5x:subtitle:en:English": "https://cdn.test/en.vtt",
        "html5x:subtitle:de:Deutsch": "https://cdn.test/de.vtt",
        "html5x:subtitle:en:English SDH": "https://cdn.test/en-sdh.vtt",
    }));
    let mut h = Harness::attached(host, MemoryStore::new(), media());

    h.session.load().await;
    h.session.on_ready();

    let defaults: Vec<_> = h.media().declared.iter().map(|d| d.default).collect();
    assert_eq!(defaults, [false, false, true]);
    assert_eq!(h.session.selection().default_subtitle_index, Some(2));
    assert_eq!(h.media().active_text(), [2]);
}

#[tokio::test]
async fn stored_preferences_pick_defaults() {
    let host = host_with(json!({
        "html5x:subtitle:de:Deutsch": "https://cdn.test/de.vtt",
        "html5x:subtitle:en:English": "https://cdn.test/en.vtt",
    }));
    let store = MemoryStore::new()
        .with("html5x:audiotrack", "default")
        .with("html5x:subtitle", "de");
    let mut h = Harness::attached(host, store, media());

    h.session.load().await;
    h.session.on_ready();

    // Audio sentinel falls back to the first track.
    assert_eq!(h.media().enabled_audio(), [0]);
    assert_eq!(h.media().active_text(), [0]);
}

#[tokio::test]
async fn disabled_cors_routes_subtitles_through_proxy() {
    let host = host_with(json!({
        "html5x:cors": false,
        "html5x:subtitle:en:English": "http://cdn.test/en.vtt",
    }))
    .secure();
    let mut h = Harness::attached(host, MemoryStore::new(), media());
    h.session.load().await;

    assert_eq!(h.session.video_settings().cross_origin, CrossOrigin::Proxy);
    let media = h.media();
    assert!(!media.cross_origin_anonymous);
    assert_eq!(
        media.declared[0].src,
        "https://host.test/services/proxy.php?url=http%3A%2F%2Fcdn.test%2Fen.vtt"
    );
}

#[tokio::test]
async fn video_id_is_resolved_through_host() {
    let host = FakeHost::new()
        .with_param("id", "video-7")
        .with_response("video-7", InteractionResponse::url("https://cdn.test/7.mp4"));
    let mut h = Harness::attached(host, MemoryStore::new(), FakeMedia::new());
    h.session.load().await;

    assert_eq!(h.media().loaded_source.as_deref(), Some("https://cdn.test/7.mp4"));
    assert_eq!(h.host.snapshot().resolved_ids, ["video-7"]);
}

#[tokio::test]
async fn video_id_error_stops_loading() {
    let host = FakeHost::new()
        .with_param("id", "video-7")
        .with_param("url", VIDEO_URL)
        .with_response("video-7", InteractionResponse::error("Access denied"));
    let mut h = Harness::attached(host, MemoryStore::new(), FakeMedia::new());
    h.session.load().await;

    let record = h.host.snapshot();
    assert_eq!(record.messages(LogLevel::Error), ["Access denied"]);
    assert_eq!(record.loading_stopped, 1);
    assert_eq!(record.data_requests, ["info:base"]);
    assert_eq!(h.media().loaded_source, None);
}

#[tokio::test]
async fn video_id_without_url_warns() {
    let host = FakeHost::new()
        .with_param("id", "video-7")
        .with_response("video-7", InteractionResponse::default());
    let mut h = Harness::attached(host, MemoryStore::new(), FakeMedia::new());
    h.session.load().await;

    let record = h.host.snapshot();
    assert_eq!(record.messages(LogLevel::Warn), ["Video URL is missing"]);
    assert_eq!(record.loading_stopped, 1);
}

#[tokio::test]
async fn missing_source_warns() {
    let mut h = Harness::attached(FakeHost::new(), MemoryStore::new(), FakeMedia::new());
    h.session.load().await;

    let record = h.host.snapshot();
    assert_eq!(record.messages(LogLevel::Warn), ["Video ID or URL is missing"]);
    assert_eq!(record.loading_started, 1);
    assert_eq!(record.loading_stopped, 1);
}

#[tokio::test]
async fn load_without_media_is_reported() {
    let mut h = Harness::new(FakeHost::new(), MemoryStore::new());
    h.session.load().await;

    let record = h.host.snapshot();
    assert_eq!(record.messages(LogLevel::Error), ["Video player is not initialized"]);
    assert!(record.data_requests.is_empty());
}
