//! Decoded feature model
//!
//! Each MapInfo object family decodes into its own plain struct; a
//! [`Geometry`] holds exactly one of them, and a [`Feature`] pairs it with
//! the feature id and its resolved drawing style.

use crate::types::Mbr;

pub mod arc;
pub mod ellipse;
pub mod feature;
pub mod geometry;
pub mod point;
pub mod polyline;
pub mod rectangle;
pub mod region;
pub mod style;
pub mod text;

pub use arc::Arc;
pub use ellipse::Ellipse;
pub use feature::Feature;
pub use geometry::Geometry;
pub use point::{FontSymbol, Point, PointKind};
pub use polyline::Polyline;
pub use rectangle::Rectangle;
pub use region::Region;
pub use style::{BrushDef, FeatureStyle, FontDef, PenDef, SymbolDef, ToolRefs};
pub use text::{FontStyle, Text, TextFlags, TextJustification};

/// Common behaviour of every geometry struct
pub trait Entity {
    /// Normalized minimum bounding rectangle
    fn mbr(&self) -> Mbr;

    /// MIF keyword for this geometry
    fn entity_type(&self) -> &'static str;
}
