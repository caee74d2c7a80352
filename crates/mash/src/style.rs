//! Styles for the list and the tree
//!
//! Built once from the catalog's optional colours and passed to every
//! renderer.

use std::str::FromStr;

use mash_core::color::{color_for, Rgb};
use mash_core::Catalog;
use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

const ACCENT: Color = Color::Indexed(62);
const ACCENT_TEXT: Color = Color::Indexed(230);
const SELECTED: Color = Color::Rgb(0xee, 0x6f, 0xf8);

#[derive(Debug, Clone, PartialEq)]
pub struct Styles {
    /// The "mash" badge
    pub root: Style,
    /// Tag group labels in the tree
    pub tag: Style,
    pub title: Style,
    pub description: Style,
    pub selected_title: Style,
    pub selected_description: Style,
    /// Tree branches
    pub enumerator: Style,
    pub muted: Style,
    pub key_hint: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            root: Style::default()
                .fg(ACCENT_TEXT)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
            tag: Style::default().add_modifier(Modifier::BOLD),
            title: Style::default(),
            description: Style::default().add_modifier(Modifier::DIM),
            selected_title: Style::default().fg(SELECTED).add_modifier(Modifier::BOLD),
            selected_description: Style::default().fg(Color::Rgb(0xad, 0x58, 0xb4)),
            enumerator: Style::default().fg(Color::Indexed(240)),
            muted: Style::default().fg(Color::DarkGray),
            key_hint: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        }
    }
}

impl Styles {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut styles = Self::default();

        if let Some(color) = parse_color("tagColor", catalog.tag_color.as_deref()) {
            styles.tag = styles.tag.fg(color);
        }
        if let Some(color) = parse_color("titleColor", catalog.title_color.as_deref()) {
            styles.title = styles.title.fg(color);
        }
        if let Some(color) = parse_color("descColor", catalog.desc_color.as_deref()) {
            // A configured description colour replaces the faint default
            styles.description = Style::default().fg(color);
        }

        styles
    }

    /// Chip style for a tag, from its hashed colour
    pub fn tag_chip(&self, tag: &str) -> Style {
        let color = color_for(tag);
        Style::default()
            .fg(rgb(color.foreground))
            .bg(rgb(color.background))
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Named colours, `#rrggbb`, or a 256-colour index
fn parse_color(field: &str, spec: Option<&str>) -> Option<Color> {
    let spec = spec.map(str::trim).filter(|s| !s.is_empty())?;
    match Color::from_str(spec) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!(field, value = spec, "ignoring unrecognised colour");
            None
        }
    }
}
