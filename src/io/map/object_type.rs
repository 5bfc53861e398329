//! MapInfo object type codes.
//!
//! The type byte that prefixes each object record in an object block.
//! Codes come in pairs: the `*C` variant stores its coordinates as int16
//! deltas from the object block centroid, the other as absolute int32.

use crate::error::{MitabError, Result};
use std::fmt;

/// Object type byte as stored in `.MAP` object blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MapObjectType {
    None = 0x00,
    OldSymbolC = 0x01,
    OldSymbol = 0x02,
    LineC = 0x04,
    Line = 0x05,
    PlineC = 0x07,
    Pline = 0x08,
    ArcC = 0x0a,
    Arc = 0x0b,
    RegionC = 0x0d,
    Region = 0x0e,
    TextC = 0x10,
    Text = 0x11,
    RectC = 0x13,
    Rect = 0x14,
    RoundRectC = 0x16,
    RoundRect = 0x17,
    EllipseC = 0x19,
    Ellipse = 0x1a,
    MultiPlineC = 0x25,
    MultiPline = 0x26,
    FontSymbolC = 0x28,
    FontSymbol = 0x29,
    CustomSymbolC = 0x2b,
    CustomSymbol = 0x2c,
}

/// Decoder family an object type dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectFamily {
    None,
    Point,
    FontPoint,
    CustomPoint,
    Line,
    Polyline,
    MultiPolyline,
    Region,
    Rectangle,
    RoundRectangle,
    Ellipse,
    Arc,
    Text,
}

impl MapObjectType {
    /// Map a raw type byte, `None` for codes this reader does not know.
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0x00 => Self::None,
            0x01 => Self::OldSymbolC,
            0x02 => Self::OldSymbol,
            0x04 => Self::LineC,
            0x05 => Self::Line,
            0x07 => Self::PlineC,
            0x08 => Self::Pline,
            0x0a => Self::ArcC,
            0x0b => Self::Arc,
            0x0d => Self::RegionC,
            0x0e => Self::Region,
            0x10 => Self::TextC,
            0x11 => Self::Text,
            0x13 => Self::RectC,
            0x14 => Self::Rect,
            0x16 => Self::RoundRectC,
            0x17 => Self::RoundRect,
            0x19 => Self::EllipseC,
            0x1a => Self::Ellipse,
            0x25 => Self::MultiPlineC,
            0x26 => Self::MultiPline,
            0x28 => Self::FontSymbolC,
            0x29 => Self::FontSymbol,
            0x2b => Self::CustomSymbolC,
            0x2c => Self::CustomSymbol,
            _ => return None,
        })
    }

    /// Like [`from_raw`](Self::from_raw) but fails with
    /// [`MitabError::UnsupportedGeometryType`].
    pub fn try_from_raw(value: u8) -> Result<Self> {
        Self::from_raw(value).ok_or(MitabError::UnsupportedGeometryType(value))
    }

    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// True for the `*C` variants whose coordinates are centroid deltas.
    pub fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::OldSymbolC
                | Self::LineC
                | Self::PlineC
                | Self::ArcC
                | Self::RegionC
                | Self::TextC
                | Self::RectC
                | Self::RoundRectC
                | Self::EllipseC
                | Self::MultiPlineC
                | Self::FontSymbolC
                | Self::CustomSymbolC
        )
    }

    pub fn family(self) -> ObjectFamily {
        match self {
            Self::None => ObjectFamily::None,
            Self::OldSymbolC | Self::OldSymbol => ObjectFamily::Point,
            Self::FontSymbolC | Self::FontSymbol => ObjectFamily::FontPoint,
            Self::CustomSymbolC | Self::CustomSymbol => ObjectFamily::CustomPoint,
            Self::LineC | Self::Line => ObjectFamily::Line,
            Self::PlineC | Self::Pline => ObjectFamily::Polyline,
            Self::MultiPlineC | Self::MultiPline => ObjectFamily::MultiPolyline,
            Self::RegionC | Self::Region => ObjectFamily::Region,
            Self::RectC | Self::Rect => ObjectFamily::Rectangle,
            Self::RoundRectC | Self::RoundRect => ObjectFamily::RoundRectangle,
            Self::EllipseC | Self::Ellipse => ObjectFamily::Ellipse,
            Self::ArcC | Self::Arc => ObjectFamily::Arc,
            Self::TextC | Self::Text => ObjectFamily::Text,
        }
    }
}

impl fmt::Display for MapObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:#04x})", self, self.as_raw())
    }
}
