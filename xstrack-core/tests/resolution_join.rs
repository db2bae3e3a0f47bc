mod common;

use std::pin::pin;

use futures::poll;
use serde_json::json;
use xstrack_contracts::mock::{FakeHost, FakeMedia, MemoryStore};
use xstrack_model::{InteractionResponse, LogLevel, VideoInfo};

use common::{Harness, VIDEO_URL, video_info};

fn subtitle_bag() -> VideoInfo {
    VideoInfo::new(
        None,
        [
            ("html5x:subtitle", "de"),
            ("html5x:subtitle:en:English", "sub-en"),
            ("html5x:subtitle:de:Deutsch", "sub-de"),
            ("html5x:subtitle:fr:Francais", "https://cdn.test/fr.vtt"),
            ("html5x:subtitle:it:Italiano", "sub-it"),
        ],
    )
}

#[tokio::test]
async fn join_settles_once_after_every_resolution() -> anyhow::Result<()> {
    let mut h = Harness::attached(FakeHost::new(), MemoryStore::new(), FakeMedia::new());
    let en = h.host.defer("sub-en");
    let de = h.host.defer("sub-de");
    let it = h.host.defer("sub-it");

    let ticket = h.session.start_load().expect("attached");
    let plan = h
        .session
        .prepare_subtitles(ticket, Some(&subtitle_bag()))
        .expect("current ticket");
    assert_eq!(plan.sources.len(), 4);

    let host = std::sync::Arc::clone(&h.host);
    let config = std::sync::Arc::clone(&h.config);
    let mut join = pin!(plan.resolve(&*host, &config));
    assert!(poll!(join.as_mut()).is_pending());

    // Settle in reverse order; nothing is declared until the last one.
    assert!(it.send(InteractionResponse::error("Not found")).is_ok());
    assert!(poll!(join.as_mut()).is_pending());
    assert!(de.send(InteractionResponse::url("http://cdn.test/de.vtt")).is_ok());
    assert!(poll!(join.as_mut()).is_pending());
    assert_eq!(h.media().declare_calls, 0);

    assert!(en.send(InteractionResponse::url("http://cdn.test/en.vtt")).is_ok());
    let resolved = join.await;

    assert!(h.session.declare_subtitles(resolved));
    let media = h.media();
    assert_eq!(media.declare_calls, 1);
    let declared: Vec<_> = media
        .declared
        .iter()
        .map(|d| (d.language.as_str(), d.src.as_str(), d.default))
        .collect();
    assert_eq!(
        declared,
        [
            ("en", "http://cdn.test/en.vtt", false),
            ("de", "http://cdn.test/de.vtt", true),
            ("fr", "https://cdn.test/fr.vtt", false),
        ]
    );
    assert_eq!(h.session.selection().default_subtitle_index, Some(1));
    assert_eq!(h.host.snapshot().messages(LogLevel::Error), ["Not found"]);
    Ok(())
}

#[tokio::test]
async fn load_declares_before_setting_source() -> anyhow::Result<()> {
    let host = FakeHost::new()
        .with_param("url", VIDEO_URL)
        .with_data(
            "video:info",
            video_info(
                -1,
                json!({
                    "html5x:subtitle:en:English": "sub-en",
                    "html5x:subtitle:de:Deutsch": "sub-de",
                }),
            ),
        );
    let mut h = Harness::attached(host, MemoryStore::new(), FakeMedia::new());
    let de = h.host.defer("sub-de");
    let en = h.host.defer("sub-en");

    let settle = async move {
        assert!(de.send(InteractionResponse::url("https://cdn.test/de.vtt")).is_ok());
        assert!(en.send(InteractionResponse::url("https://cdn.test/en.vtt")).is_ok());
    };
    futures::join!(h.session.load(), settle);

    let media = h.media();
    assert_eq!(media.declare_calls, 1);
    let srcs: Vec<_> = media.declared.iter().map(|d| d.src.as_str()).collect();
    assert_eq!(srcs, ["https://cdn.test/en.vtt", "https://cdn.test/de.vtt"]);
    assert_eq!(media.loaded_source.as_deref(), Some(VIDEO_URL));
    assert!(media.cross_origin_anonymous);
    Ok(())
}

#[tokio::test]
async fn stale_join_result_is_dropped() -> anyhow::Result<()> {
    let mut h = Harness::attached(FakeHost::new(), MemoryStore::new(), FakeMedia::new());
    let en = h.host.defer("sub-en");

    let ticket = h.session.start_load().expect("attached");
    let plan = h
        .session
        .prepare_subtitles(ticket, Some(&subtitle_bag()))
        .expect("current ticket");

    // The element is replaced while the resolution is in flight.
    h.session.init(FakeMedia::new());

    assert!(en.send(InteractionResponse::url("http://cdn.test/en.vtt")).is_ok());
    let resolved = plan.resolve(&*h.host, &h.config).await;
    assert!(!h.session.declare_subtitles(resolved));
    assert!(!h.session.load_source(ticket, VIDEO_URL));

    let media = h.media();
    assert_eq!(media.declare_calls, 0);
    assert_eq!(media.loaded_source, None);
    Ok(())
}

#[test]
fn continuation_after_dispose_is_a_no_op() {
    let mut h = Harness::attached(FakeHost::new(), MemoryStore::new(), FakeMedia::new());
    let ticket = h.session.start_load().expect("attached");
    h.session.dispose();

    assert!(h.session.prepare_subtitles(ticket, Some(&subtitle_bag())).is_none());
    assert!(!h.session.load_source(ticket, VIDEO_URL));
    assert!(h.session.media().is_none());
}
