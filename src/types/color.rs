//! Packed 24-bit RGB colors as stored in tool records and text objects

use std::fmt;

/// An RGB color packed as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RgbColor(pub u32);

impl RgbColor {
    /// Assemble from three bytes in file order (R, G, B)
    pub const fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        RgbColor(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(&self) -> u8 {
        self.0 as u8
    }

    pub const BLACK: RgbColor = RgbColor(0);
    pub const WHITE: RgbColor = RgbColor(0xFF_FFFF);
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}
