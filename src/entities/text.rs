//! Text features

use super::Entity;
use crate::types::{Mbr, RgbColor, Vector2};

use bitflags::bitflags;

bitflags! {
    /// Justification, line spacing and label line bits of a text record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextFlags: u16 {
        const JUSTIFY_CENTER = 0x0200;
        const JUSTIFY_RIGHT = 0x0400;
        const SPACING_1_5 = 0x0800;
        const SPACING_DOUBLE = 0x1000;
        const LINE_SIMPLE = 0x2000;
        const LINE_ARROW = 0x4000;
    }
}

bitflags! {
    /// Font style and effect bits of a text record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FontStyle: u16 {
        const BOLD = 0x0001;
        const ITALIC = 0x0002;
        const UNDERLINE = 0x0004;
        const STRIKEOUT = 0x0008;
        const OUTLINE = 0x0010;
        const SHADOW = 0x0020;
        const INVERSE = 0x0040;
        const BLINK = 0x0080;
        const BOX = 0x0100;
        const HALO = 0x0200;
        const ALL_CAPS = 0x0400;
        const EXPANDED = 0x0800;
    }
}

/// Horizontal justification decoded from [`TextFlags`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextJustification {
    Left,
    Center,
    Right,
}

/// A text label
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    /// Lower-left corner of the MBR. This is an approximation; the true
    /// insertion point depends on rotation and justification.
    pub anchor: Vector2,
    /// Rotation in degrees
    pub angle: f64,
    pub height: f64,
    pub flags: TextFlags,
    pub font_style: FontStyle,
    pub fg_color: RgbColor,
    pub bg_color: RgbColor,
    /// End point of the label line
    pub label_line_end: Vector2,
    pub mbr: Mbr,
}

impl Text {
    pub fn justification(&self) -> TextJustification {
        if self.flags.contains(TextFlags::JUSTIFY_RIGHT) {
            TextJustification::Right
        } else if self.flags.contains(TextFlags::JUSTIFY_CENTER) {
            TextJustification::Center
        } else {
            TextJustification::Left
        }
    }

    /// Line spacing multiplier
    pub fn line_spacing(&self) -> f64 {
        if self.flags.contains(TextFlags::SPACING_DOUBLE) {
            2.0
        } else if self.flags.contains(TextFlags::SPACING_1_5) {
            1.5
        } else {
            1.0
        }
    }
}

impl Entity for Text {
    fn mbr(&self) -> Mbr {
        self.mbr
    }

    fn entity_type(&self) -> &'static str {
        "TEXT"
    }
}
