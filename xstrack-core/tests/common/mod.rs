#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use xstrack_config::EngineConfig;
use xstrack_contracts::mock::{FakeHost, FakeMedia, FakeOverlay, MemoryStore};
use xstrack_core::PlayerSession;

pub type TestSession = PlayerSession<FakeMedia, FakeOverlay, FakeHost, MemoryStore>;

pub const VIDEO_URL: &str = "https://cdn.test/video.mp4";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `video:info` response carrying `properties`.
pub fn video_info(index: i64, properties: Value) -> Value {
    json!({
        "video": {
            "info": {
                "index": index,
                "properties": properties,
            }
        }
    })
}

pub fn base_info(platform: &str) -> Value {
    json!({ "info": { "platform": platform } })
}

pub struct Harness {
    pub session: TestSession,
    pub host: Arc<FakeHost>,
    pub store: Arc<MemoryStore>,
    pub config: Arc<EngineConfig>,
}

impl Harness {
    pub fn new(host: FakeHost, store: MemoryStore) -> Self {
        init_tracing();
        let host = Arc::new(host);
        let store = Arc::new(store);
        let config = Arc::new(EngineConfig::default());
        let session = PlayerSession::new(
            Arc::clone(&host),
            Arc::clone(&store),
            FakeOverlay::new(),
            Arc::clone(&config),
        );
        Self {
            session,
            host,
            store,
            config,
        }
    }

    /// Harness with `media` attached.
    pub fn attached(host: FakeHost, store: MemoryStore, media: FakeMedia) -> Self {
        let mut harness = Self::new(host, store);
        harness.session.init(media);
        harness
    }

    pub fn media(&self) -> &FakeMedia {
        self.session.media().expect("media attached")
    }

    pub fn media_mut(&mut self) -> &mut FakeMedia {
        self.session.media_mut().expect("media attached")
    }
}
