//! Subtitle source resolution.
//!
//! A configured locator is either an absolute HTTP(S) URL, which only needs
//! proxying and securing, or an opaque host identifier that must first be
//! resolved through the host. All resolutions of one load run concurrently
//! and are joined before anything is declared to the media element.

use futures::future::join_all;
use tracing::{debug, warn};
use url::Url;
use xstrack_config::{EngineConfig, URL_PLACEHOLDER};
use xstrack_contracts::PluginHost;
use xstrack_model::SubtitleSource;

use crate::error::{EngineError, Result};
use crate::session::LoadTicket;
use crate::video::CrossOrigin;

/// Whether `locator` parses as an absolute `http` or `https` URL.
pub fn is_http_url(locator: &str) -> bool {
    Url::parse(locator)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Rewrite a plain `http:` locator to `https:`; anything else is returned
/// unchanged.
pub fn secure_url(locator: &str) -> String {
    match locator.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http:") => {
            format!("https:{}", &locator[5..])
        }
        _ => locator.to_string(),
    }
}

/// Rewrites and resolves subtitle locators for one load.
#[derive(Debug)]
pub struct SourceResolver<'a, H: ?Sized> {
    host: &'a H,
    proxy_url: &'a str,
    cross_origin: CrossOrigin,
}

impl<'a, H: PluginHost + ?Sized> SourceResolver<'a, H> {
    pub fn new(host: &'a H, config: &'a EngineConfig, cross_origin: CrossOrigin) -> Self {
        Self {
            host,
            proxy_url: &config.proxy_url,
            cross_origin,
        }
    }

    /// Proxy step followed by the secure step.
    pub fn rewrite(&self, locator: &str) -> String {
        let proxied = match self.cross_origin {
            CrossOrigin::Proxy if is_http_url(locator) => {
                let endpoint = self.host.host_url(self.proxy_url);
                endpoint.replace(URL_PLACEHOLDER, &urlencoding::encode(locator))
            }
            _ => locator.to_string(),
        };
        if self.host.is_secure_context() {
            secure_url(&proxied)
        } else {
            proxied
        }
    }

    /// Final locator of one source.
    pub async fn resolve(&self, source: &SubtitleSource) -> Result<String> {
        if is_http_url(&source.src) {
            return Ok(self.rewrite(&source.src));
        }
        let response = self.host.resolve(&source.src).await;
        if let Some(error) = response.error_message() {
            return Err(EngineError::Resolution(error.to_string()));
        }
        match response.resolved_url() {
            Some(url) if is_http_url(url) => Ok(self.rewrite(url)),
            _ => Err(EngineError::InvalidTrackUrl),
        }
    }

    /// Resolve every source concurrently and return the survivors in their
    /// original order. Failed sources are reported to the host and dropped.
    pub async fn resolve_all(&self, sources: Vec<SubtitleSource>) -> Vec<SubtitleSource> {
        if sources.is_empty() {
            return sources;
        }
        let total = sources.len();
        let results = join_all(sources.iter().map(|source| self.resolve(source))).await;

        let resolved: Vec<SubtitleSource> = sources
            .into_iter()
            .zip(results)
            .filter_map(|(mut source, result)| match result {
                Ok(src) => {
                    source.src = src;
                    Some(source)
                }
                Err(err) => {
                    warn!(
                        language = %source.language,
                        label = %source.label,
                        error = %err,
                        "dropping subtitle source"
                    );
                    self.host.log(err.level(), &err.to_string());
                    None
                }
            })
            .collect();
        debug!(resolved = resolved.len(), total, "subtitle sources settled");
        resolved
    }
}

/// Subtitle sources of one load, waiting for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitlePlan {
    pub ticket: LoadTicket,
    pub sources: Vec<SubtitleSource>,
    pub cross_origin: CrossOrigin,
    /// Preferred subtitle language; `None` means subtitles stay off
    pub language: Option<String>,
}

impl SubtitlePlan {
    /// Run the resolution join. The ticket travels with the result so a
    /// session that moved on can discard it.
    pub async fn resolve<H: PluginHost + ?Sized>(
        self,
        host: &H,
        config: &EngineConfig,
    ) -> ResolvedSubtitles {
        let resolver = SourceResolver::new(host, config, self.cross_origin);
        let sources = resolver.resolve_all(self.sources).await;
        ResolvedSubtitles {
            ticket: self.ticket,
            sources,
            language: self.language,
        }
    }
}

/// Output of the resolution join, ready to be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubtitles {
    pub ticket: LoadTicket,
    pub sources: Vec<SubtitleSource>,
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use xstrack_contracts::mock::FakeHost;
    use xstrack_model::{InteractionResponse, LogLevel};

    fn source(language: &str, src: &str) -> SubtitleSource {
        SubtitleSource {
            label: language.to_uppercase(),
            language: language.to_string(),
            src: src.to_string(),
        }
    }

    #[test]
    fn detects_http_urls_only() {
        assert!(is_http_url("http://cdn.test/en.vtt"));
        assert!(is_http_url("HTTPS://cdn.test/en.vtt"));
        assert!(!is_http_url("ftp://cdn.test/en.vtt"));
        assert!(!is_http_url("subtitle-42"));
        assert!(!is_http_url(""));
    }

    #[test]
    fn secure_rewrites_plain_http() {
        assert_eq!(secure_url("http://a.test/x"), "https://a.test/x");
        assert_eq!(secure_url("https://a.test/x"), "https://a.test/x");
        assert_eq!(secure_url("id:7"), "id:7");
    }

    #[test]
    fn proxy_encodes_original_url() {
        let host = FakeHost::new();
        let config = EngineConfig::default();
        let resolver = SourceResolver::new(&host, &config, CrossOrigin::Proxy);
        assert_eq!(
            resolver.rewrite("http://cdn.test/en.vtt?lang=en"),
            "http://host.test/services/proxy.php?url=http%3A%2F%2Fcdn.test%2Fen.vtt%3Flang%3Den"
        );
        assert_eq!(resolver.rewrite("local.vtt"), "local.vtt");
    }

    #[test]
    fn secure_context_applies_after_proxy() {
        let host = FakeHost::new().secure();
        let config = EngineConfig::default();
        let resolver = SourceResolver::new(&host, &config, CrossOrigin::Proxy);
        assert!(
            resolver
                .rewrite("http://cdn.test/en.vtt")
                .starts_with("https://host.test/services/proxy.php?url=")
        );

        let direct = SourceResolver::new(&host, &config, CrossOrigin::Anonymous);
        assert_eq!(direct.rewrite("http://cdn.test/en.vtt"), "https://cdn.test/en.vtt");
    }

    #[tokio::test]
    async fn resolved_url_is_proxied_then_secured() {
        let host = FakeHost::new()
            .secure()
            .with_response("sub-en", InteractionResponse::url("http://cdn.test/en.vtt"));
        let config = EngineConfig::default();
        let resolver = SourceResolver::new(&host, &config, CrossOrigin::Proxy);

        let resolved = resolver.resolve(&source("en", "sub-en")).await;
        assert_eq!(
            resolved.ok().as_deref(),
            Some("https://host.test/services/proxy.php?url=http%3A%2F%2Fcdn.test%2Fen.vtt")
        );
        assert_eq!(host.snapshot().resolved_ids, ["sub-en"]);
    }

    #[tokio::test]
    async fn failures_are_reported_and_dropped() {
        let host = FakeHost::new()
            .with_response("sub-en", InteractionResponse::url("http://cdn.test/en.vtt"))
            .with_response("sub-de", InteractionResponse::error("Access denied"))
            .with_response("sub-fr", InteractionResponse::url("not a url"));
        let config = EngineConfig::default();
        let resolver = SourceResolver::new(&host, &config, CrossOrigin::Anonymous);

        let resolved = resolver
            .resolve_all(vec![
                source("de", "sub-de"),
                source("en", "sub-en"),
                source("fr", "sub-fr"),
                source("it", "https://cdn.test/it.vtt"),
            ])
            .await;

        let srcs: Vec<_> = resolved.iter().map(|s| s.src.as_str()).collect();
        assert_eq!(srcs, ["http://cdn.test/en.vtt", "https://cdn.test/it.vtt"]);

        let record = host.snapshot();
        assert_eq!(record.messages(LogLevel::Error), ["Access denied"]);
        assert_eq!(record.messages(LogLevel::Warn), ["Track URL is missing or invalid"]);
        assert_eq!(record.resolved_ids, ["sub-de", "sub-en", "sub-fr"]);
    }
}
