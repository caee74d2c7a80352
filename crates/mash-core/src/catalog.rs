//! Catalog data model and on-disk parsing
//!
//! A catalog file is either the full object form:
//!
//! ```json
//! { "skipIntro": true, "items": [{ "title": "Build", "desc": "...", "cmd": "make", "tags": ["dev"] }] }
//! ```
//!
//! or, for older configs, a bare array of items.

use serde::{Deserialize, Deserializer, Serialize};

/// A single launchable command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub title: String,

    #[serde(rename = "desc", default)]
    pub description: String,

    /// Shell command, or `cd:<path>` to open a shell in a directory
    #[serde(rename = "cmd", default)]
    pub command: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl CatalogItem {
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// The whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub skip_intro: bool,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<CatalogItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc_color: Option<String>,
}

/// Which shape a config file was parsed as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCatalog {
    Catalog(Catalog),
    ItemArray(Vec<CatalogItem>),
}

impl ParsedCatalog {
    /// Parse config content, trying the object form first and the legacy
    /// item array second.
    ///
    /// When both fail, the reported error is the one for the shape the
    /// document appears to be, so `[...]` files get array diagnostics.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        let object_err = match serde_json::from_str::<Catalog>(content) {
            Ok(catalog) => return Ok(Self::Catalog(catalog)),
            Err(e) => e,
        };

        match serde_json::from_str::<Vec<CatalogItem>>(content) {
            Ok(items) => Ok(Self::ItemArray(items)),
            Err(array_err) if content.trim_start().starts_with('[') => Err(array_err),
            Err(_) => Err(object_err),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::ItemArray(_))
    }

    pub fn into_catalog(self) -> Catalog {
        match self {
            Self::Catalog(catalog) => catalog,
            Self::ItemArray(items) => Catalog {
                items,
                ..Catalog::default()
            },
        }
    }
}

impl From<ParsedCatalog> for Catalog {
    fn from(parsed: ParsedCatalog) -> Self {
        parsed.into_catalog()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
