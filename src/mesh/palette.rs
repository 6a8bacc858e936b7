//! Material color palette

use crate::core::error::Error;
use crate::core::types::{MaterialId, Result};

/// Base palette, indexed by `material_id % len`
pub const BASE_PALETTE: [u32; 12] = [
    0x000000, 0xffffff, 0x000000, 0xff0000, 0xff5500, 0xffaa00,
    0xffff00, 0x00ff00, 0x00ffff, 0x0055ff, 0x0000ff, 0xff00ff,
];

/// RGB color with components in `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidInput(format!("invalid color {s:?}, expected #rrggbb")));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|e| Error::InvalidInput(format!("invalid color {s:?}: {e}")))?;
        Ok(Self::from_hex(hex))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Ordered list of colors; material ids wrap around its length
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// The fixed base palette
    pub fn base() -> Self {
        Self {
            colors: BASE_PALETTE.iter().map(|&hex| Color::from_hex(hex)).collect(),
        }
    }

    /// Base palette extended with caller-supplied colors
    pub fn with_custom(custom: &[Color]) -> Self {
        let mut palette = Self::base();
        palette.colors.extend_from_slice(custom);
        palette
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Render color of a material; ids past the end alias back to the start
    pub fn color_for(&self, id: MaterialId) -> Color {
        self.colors[id as usize % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::base()
    }
}
