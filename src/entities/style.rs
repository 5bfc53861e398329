//! Drawing tool definitions and the style attached to a feature

use crate::types::RgbColor;

/// Line style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenDef {
    pub ref_count: i32,
    pub line_width: u8,
    pub line_pattern: u8,
    pub line_style: u8,
    pub color: RgbColor,
}

/// Fill style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrushDef {
    pub ref_count: i32,
    pub fill_pattern: u8,
    pub transparent_fill: bool,
    pub fg_color: RgbColor,
    pub bg_color: RgbColor,
}

/// Font name definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontDef {
    pub ref_count: i32,
    pub name: String,
}

/// Point symbol definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymbolDef {
    pub ref_count: i32,
    pub symbol_no: i16,
    pub point_size: i16,
    pub unknown: u8,
    pub color: RgbColor,
}

/// Tool table indexes read from an object record.
///
/// Indexes are 1-based; `None` means the object type carries no reference
/// of that kind, `Some(0)` means "none" as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolRefs {
    pub pen: Option<u8>,
    pub brush: Option<u8>,
    pub font: Option<u8>,
    pub symbol: Option<u8>,
}

impl ToolRefs {
    pub fn pen(index: u8) -> Self {
        ToolRefs {
            pen: Some(index),
            ..Default::default()
        }
    }

    pub fn pen_brush(pen: u8, brush: u8) -> Self {
        ToolRefs {
            pen: Some(pen),
            brush: Some(brush),
            ..Default::default()
        }
    }

    pub fn symbol(index: u8) -> Self {
        ToolRefs {
            symbol: Some(index),
            ..Default::default()
        }
    }

    pub fn font(index: u8) -> Self {
        ToolRefs {
            font: Some(index),
            ..Default::default()
        }
    }
}

/// Resolved style of a feature. Each field is set only when the object type
/// references that kind of tool and the index resolves in the tool table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureStyle {
    pub pen: Option<PenDef>,
    pub brush: Option<BrushDef>,
    pub font: Option<FontDef>,
    pub symbol: Option<SymbolDef>,
}

impl FeatureStyle {
    pub fn is_empty(&self) -> bool {
        self.pen.is_none() && self.brush.is_none() && self.font.is_none() && self.symbol.is_none()
    }
}
