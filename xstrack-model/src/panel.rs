//! UI-agnostic panel descriptors.
//!
//! Serialized as camelCase JSON; absent optional fields are omitted so the
//! host applies its own defaults.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A panel the host renders from scratch on every request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Panel {
    pub cache: bool,
    pub reuse: bool,
    pub headline: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", skip_serializing_if = "Option::is_none")
    )]
    pub kind: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub template: Option<PanelTemplate>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub items: Option<Vec<PanelItem>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pages: Option<Vec<PanelPage>>,
}

impl Panel {
    /// A non-cacheable item panel.
    pub fn with_items(
        headline: impl Into<String>,
        template: PanelTemplate,
        items: Vec<PanelItem>,
    ) -> Self {
        Self {
            cache: false,
            reuse: false,
            headline: headline.into(),
            kind: None,
            template: Some(template),
            items: Some(items),
            pages: None,
        }
    }

    /// A non-cacheable paged list panel.
    pub fn with_pages(headline: impl Into<String>, pages: Vec<PanelPage>) -> Self {
        Self {
            cache: false,
            reuse: false,
            headline: headline.into(),
            kind: Some("list".to_string()),
            template: None,
            items: None,
            pages: Some(pages),
        }
    }

    /// Items of an item panel, empty for paged panels.
    pub fn items(&self) -> &[PanelItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Defaults applied to every item of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PanelTemplate {
    pub enumerate: bool,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub layout: String,
}

impl PanelTemplate {
    /// Full-width control rows.
    pub fn control_rows() -> Self {
        Self {
            enumerate: false,
            kind: "control".to_string(),
            layout: "0,0,8,1".to_string(),
        }
    }
}

/// One page of a paged panel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PanelPage {
    pub headline: String,
    pub items: Vec<PanelItem>,
}

/// A single row or grid cell.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PanelItem {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub focus: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub display: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub enable: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub offset: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub icon: Option<String>,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub extension_label: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub extension_icon: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub layout: Option<String>,
    pub action: String,
}

impl PanelItem {
    /// Whether the row is drawn as the current choice.
    pub fn is_selected(&self) -> bool {
        self.extension_icon.as_deref() == Some("check")
    }
}
