//! Subtitle source descriptors declared through the video property bag.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::ModelError;
use crate::tracks::TextTrackKind;

/// A configured subtitle source.
///
/// Built from a property suffix of the form `language:label` and a source
/// locator. `src` starts out as the raw locator and is rewritten in place
/// once it has been proxied, secured or resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubtitleSource {
    pub label: String,
    pub language: String,
    pub src: String,
}

impl SubtitleSource {
    /// Parse a `language:label` declaration paired with its locator.
    ///
    /// Returns `None` for blank input or a declaration without a language
    /// before the first separator.
    pub fn from_declaration(declaration: &str, src: &str) -> Option<Self> {
        if declaration.is_empty() || src.is_empty() {
            return None;
        }
        match declaration.find(':') {
            Some(separator) if separator > 0 => Some(Self {
                label: declaration[separator + 1..].to_string(),
                language: declaration[..separator].to_string(),
                src: src.to_string(),
            }),
            _ => None,
        }
    }
}

/// Ordering applied to the configured subtitle list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SubtitleOrder {
    #[default]
    Declaration,
    Label,
    Language,
}

impl SubtitleOrder {
    /// Unknown values keep declaration order.
    pub fn from_property(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Stable sort of `sources` according to this order.
    pub fn sort(self, sources: &mut [SubtitleSource]) {
        match self {
            SubtitleOrder::Declaration => {}
            SubtitleOrder::Label => {
                sources.sort_by(|a, b| compare_text(&a.label, &b.label))
            }
            SubtitleOrder::Language => sources
                .sort_by(|a, b| compare_text(&a.language, &b.language)),
        }
    }
}

impl FromStr for SubtitleOrder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label" => Ok(SubtitleOrder::Label),
            "language" => Ok(SubtitleOrder::Language),
            other => Err(ModelError::InvalidValue(format!(
                "unknown subtitle order '{other}'"
            ))),
        }
    }
}

impl Display for SubtitleOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtitleOrder::Declaration => write!(f, "declaration"),
            SubtitleOrder::Label => write!(f, "label"),
            SubtitleOrder::Language => write!(f, "language"),
        }
    }
}

/// Root collation approximation: base letters compared without accents or
/// case, then accents, then case with lowercase first. Byte order breaks the
/// remaining ties so the order stays total.
fn compare_text(a: &str, b: &str) -> Ordering {
    fn base(text: &str) -> impl Iterator<Item = char> + '_ {
        text.nfd().filter(|c| !is_combining_mark(*c))
    }

    base(a)
        .flat_map(char::to_lowercase)
        .cmp(base(b).flat_map(char::to_lowercase))
        .then_with(|| {
            a.nfd()
                .flat_map(char::to_lowercase)
                .cmp(b.nfd().flat_map(char::to_lowercase))
        })
        .then_with(|| base(a).map(char::is_uppercase).cmp(base(b).map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

/// A subtitle track handed to the media element for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubtitleDeclaration {
    pub kind: TextTrackKind,
    pub label: String,
    pub language: String,
    pub src: String,
    /// Marks the track selected by the default resolution policy
    pub default: bool,
}

impl SubtitleDeclaration {
    pub fn from_source(source: &SubtitleSource, default: bool) -> Self {
        Self {
            kind: TextTrackKind::Subtitles,
            label: source.label.clone(),
            language: source.language.clone(),
            src: source.src.clone(),
            default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(language: &str, label: &str) -> SubtitleSource {
        SubtitleSource {
            label: label.to_string(),
            language: language.to_string(),
            src: format!("https://cdn.test/{language}.vtt"),
        }
    }

    #[test]
    fn declaration_splits_at_first_separator() {
        let parsed =
            SubtitleSource::from_declaration("en:English: SDH", "a.vtt")
                .unwrap();
        assert_eq!(parsed.language, "en");
        assert_eq!(parsed.label, "English: SDH");
        assert_eq!(parsed.src, "a.vtt");
    }

    #[test]
    fn malformed_declarations_are_skipped() {
        assert!(SubtitleSource::from_declaration("english", "a.vtt").is_none());
        assert!(SubtitleSource::from_declaration(":English", "a.vtt").is_none());
        assert!(SubtitleSource::from_declaration("en:English", "").is_none());
        assert!(SubtitleSource::from_declaration("", "a.vtt").is_none());
    }

    #[test]
    fn label_order_sorts_by_label() {
        let mut sources = vec![source("de", "B"), source("en", "A")];
        SubtitleOrder::Label.sort(&mut sources);
        assert_eq!(sources[0].label, "A");
        assert_eq!(sources[1].label, "B");
    }

    #[test]
    fn language_order_sorts_by_language() {
        let mut sources = vec![source("de", "B"), source("en", "A")];
        SubtitleOrder::Language.sort(&mut sources);
        assert_eq!(sources[0].language, "de");
        assert_eq!(sources[1].language, "en");
    }

    #[test]
    fn sort_ignores_case_and_is_stable() {
        let mut sources = vec![
            source("en", "beta"),
            source("fr", "Alpha"),
            source("de", "alpha"),
            source("it", "Alpha"),
        ];
        SubtitleOrder::Label.sort(&mut sources);
        let languages: Vec<_> = sources.iter().map(|s| s.language.as_str()).collect();
        // Lowercase wins a case-only tie; equal labels keep their order.
        assert_eq!(languages, ["de", "fr", "it", "en"]);
    }

    #[test]
    fn accented_labels_sort_with_their_base_letter() {
        let mut sources = vec![
            source("fr", "Français"),
            source("cs", "Čeština"),
            source("zu", "Zulu"),
            source("is", "Íslenska"),
        ];
        SubtitleOrder::Label.sort(&mut sources);
        let labels: Vec<_> = sources.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Čeština", "Français", "Íslenska", "Zulu"]);
    }

    #[test]
    fn unaccented_label_precedes_accented_twin() {
        let mut sources = vec![source("fr", "Élan"), source("en", "Elan"), source("de", "Elbe")];
        SubtitleOrder::Label.sort(&mut sources);
        let labels: Vec<_> = sources.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Elan", "Élan", "Elbe"]);
    }

    #[test]
    fn unknown_order_keeps_declaration_order() {
        assert_eq!(
            SubtitleOrder::from_property(Some("random")),
            SubtitleOrder::Declaration
        );
        assert_eq!(SubtitleOrder::from_property(None), SubtitleOrder::Declaration);
    }
}
