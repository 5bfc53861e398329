//! Point features

use super::Entity;
use crate::types::{Mbr, RgbColor, Vector2};

/// Font symbol attributes stored inline in the object record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSymbol {
    /// Character code of the symbol in its font
    pub shape: u8,
    pub point_size: u8,
    pub font_style: u8,
    pub effect: u8,
    pub color: RgbColor,
    /// Rotation in degrees
    pub rotation: f64,
    /// 1-based index of the font in the tool table
    pub font_index: u8,
}

/// Symbol encoding of a point; each object type pair maps to one kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointKind {
    /// MapInfo 3.0 symbol referencing a symbol tool
    Symbol { symbol_index: u8 },
    /// TrueType font symbol
    FontSymbol(FontSymbol),
    /// Bitmap symbol referencing a symbol tool
    CustomSymbol { unknown: i16, symbol_index: u8 },
}

/// A single located symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vector2,
    pub kind: PointKind,
}

impl Point {
    pub fn new(position: Vector2, kind: PointKind) -> Self {
        Point { position, kind }
    }
}

impl Entity for Point {
    fn mbr(&self) -> Mbr {
        Mbr::from_point(self.position)
    }

    fn entity_type(&self) -> &'static str {
        "POINT"
    }
}
