//! Tag tree for `--tree`
//!
//! Visible items are grouped under each relevant tag, groups sorted by tag
//! spelling, with an `(untagged)` group last. Nodes borrow from the catalog.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, CatalogItem};
use crate::filter::FilterSpec;

pub const ROOT_LABEL: &str = "mash";
pub const UNTAGGED_LABEL: &str = "(untagged)";

/// What a node represents, so renderers can style it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Tag,
    Untagged,
    Item,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<'a> {
    pub label: &'a str,
    pub kind: NodeKind,
    pub children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    fn leaf(label: &'a str, kind: NodeKind) -> Self {
        Self {
            label,
            kind,
            children: Vec::new(),
        }
    }

    fn group(label: &'a str, kind: NodeKind, items: &[&'a CatalogItem]) -> Self {
        Self {
            label,
            kind,
            children: items.iter().map(|&item| Self::item(item)).collect(),
        }
    }

    fn item(item: &'a CatalogItem) -> Self {
        let mut node = Self::leaf(&item.title, NodeKind::Item);
        if !item.description.is_empty() {
            node.children
                .push(Self::leaf(&item.description, NodeKind::Description));
        }
        node
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Labels of the direct children
    pub fn child_labels(&self) -> Vec<&'a str> {
        self.children.iter().map(|child| child.label).collect()
    }

    pub fn find(&self, label: &str) -> Option<&TreeNode<'a>> {
        self.children.iter().find(|child| child.label == label)
    }
}

/// Group the visible items of `catalog` into a tree
pub fn build<'a>(catalog: &'a Catalog, spec: &FilterSpec) -> TreeNode<'a> {
    let mut tagged: BTreeMap<&'a str, Vec<&'a CatalogItem>> = BTreeMap::new();
    let mut untagged: Vec<&'a CatalogItem> = Vec::new();

    for (_, item) in spec.visible(catalog) {
        if !item.is_tagged() {
            untagged.push(item);
            continue;
        }

        for tag in &item.tags {
            if spec.has_tag_filter() && !spec.names_tag(tag) {
                continue;
            }
            let group = tagged.entry(tag.as_str()).or_default();
            // An item repeating a tag is listed once
            if !group.iter().any(|listed| std::ptr::eq(*listed, item)) {
                group.push(item);
            }
        }
    }

    let mut root = TreeNode::leaf(ROOT_LABEL, NodeKind::Root);
    root.children = tagged
        .into_iter()
        .map(|(tag, items)| TreeNode::group(tag, NodeKind::Tag, &items))
        .collect();

    if !untagged.is_empty() {
        root.children
            .push(TreeNode::group(UNTAGGED_LABEL, NodeKind::Untagged, &untagged));
    }

    root
}
