//! Colors and the word-cloud palette.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// CSS-style hex string (`#rrggbb`, or `#rrggbbaa` when not opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Palette glyph colors are drawn from.
pub fn default_palette() -> Vec<SerializableColor> {
    [
        Color::from_rgba8(0xE7, 0x4C, 0x3C, 0xFF), // red
        Color::from_rgba8(0xF3, 0x9C, 0x12, 0xFF), // orange
        Color::from_rgba8(0xF1, 0xC4, 0x0F, 0xFF), // yellow
        Color::from_rgba8(0x2E, 0xCC, 0x71, 0xFF), // green
        Color::from_rgba8(0x1A, 0xBC, 0x9C, 0xFF), // teal
        Color::from_rgba8(0x34, 0x98, 0xDB, 0xFF), // blue
        Color::from_rgba8(0x9B, 0x59, 0xB6, 0xFF), // purple
        Color::from_rgba8(0xE9, 0x1E, 0x63, 0xFF), // pink
        Color::from_rgba8(0xB4, 0x53, 0x09, 0xFF), // amber
        Color::from_rgba8(0x14, 0x53, 0x2D, 0xFF), // forest
    ]
    .into_iter()
    .map(SerializableColor::from)
    .collect()
}
