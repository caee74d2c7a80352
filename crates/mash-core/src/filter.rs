//! Tag based visibility
//!
//! `FilterSpec::include` is the only place that decides whether an item is
//! shown; the interactive list and the tree view both go through it.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, CatalogItem};

/// Which items are visible for a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Lowercased tag names; empty means no tag filter
    include_tags: BTreeSet<String>,
    /// Hide items that carry no tags at all
    pub require_any_tag: bool,
}

impl FilterSpec {
    /// Show everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Show every item that has at least one tag
    pub fn any_tag() -> Self {
        Self {
            include_tags: BTreeSet::new(),
            require_any_tag: true,
        }
    }

    /// Show items carrying at least one of `tags`
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            include_tags: tags.into_iter().map(|t| t.as_ref().to_lowercase()).collect(),
            require_any_tag: false,
        }
    }

    pub fn include_tags(&self) -> impl Iterator<Item = &str> {
        self.include_tags.iter().map(String::as_str)
    }

    pub fn has_tag_filter(&self) -> bool {
        !self.include_tags.is_empty()
    }

    /// Whether a single tag is named by the filter (case-insensitive)
    pub fn names_tag(&self, tag: &str) -> bool {
        self.include_tags.contains(&tag.to_lowercase())
    }

    /// Decide whether an item with `item_tags` is visible
    pub fn include<S: AsRef<str>>(&self, item_tags: &[S]) -> bool {
        if self.require_any_tag && item_tags.is_empty() {
            return false;
        }

        if self.include_tags.is_empty() {
            return true;
        }

        item_tags.iter().any(|tag| self.names_tag(tag.as_ref()))
    }

    /// Visible items in catalog order, paired with their catalog index
    pub fn visible<'c>(&self, catalog: &'c Catalog) -> Vec<(usize, &'c CatalogItem)> {
        catalog
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.include(item.tags.as_slice()))
            .collect()
    }
}

/// Split a `--tag` value (`"dev; infra;;"`) into trimmed, non-empty names
pub fn parse_tag_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
