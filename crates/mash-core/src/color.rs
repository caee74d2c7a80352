//! Deterministic tag colours
//!
//! Every tag hashes (SHA-256) to a fixed background colour, so the same tag
//! looks the same in every session and on every machine.

use sha2::{Digest, Sha256};

/// An RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness (ITU-R BT.601 weights)
    pub fn luminance(&self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 128.0
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colours for a rendered tag chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagColor {
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Colour for `tag`, derived from the first three bytes of its hash
pub fn color_for(tag: &str) -> TagColor {
    let digest = Sha256::digest(tag.as_bytes());
    let background = Rgb::new(digest[0], digest[1], digest[2]);
    let foreground = if background.is_dark() {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    };

    TagColor {
        background,
        foreground,
    }
}
