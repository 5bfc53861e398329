//! Decoded feature record

use super::{FeatureStyle, Geometry};
use crate::io::map::MapObjectType;
use crate::types::Mbr;

use std::fmt;

/// One feature of a `.MAP` file: its id, geometry and resolved style.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// 1-based feature id (row number in the attribute table)
    pub id: i32,
    /// Object type byte the geometry was decoded from
    pub object_type: MapObjectType,
    pub geometry: Geometry,
    pub style: FeatureStyle,
}

impl Feature {
    /// Feature with no geometry
    pub fn empty(id: i32) -> Self {
        Feature {
            id,
            object_type: MapObjectType::None,
            geometry: Geometry::None,
            style: FeatureStyle::default(),
        }
    }

    pub fn mbr(&self) -> Option<Mbr> {
        self.geometry.mbr()
    }

    /// MIF keyword of the geometry ("POINT", "REGION", ...)
    pub fn geometry_kind(&self) -> &'static str {
        self.geometry.kind()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Point, PointKind};
    use crate::types::Vector2;

    #[test]
    fn test_display_and_kind() {
        let feature = Feature {
            id: 4,
            object_type: MapObjectType::OldSymbol,
            geometry: Geometry::Point(Point::new(
                Vector2::new(-98.0, 50.0),
                PointKind::Symbol { symbol_index: 1 },
            )),
            style: FeatureStyle::default(),
        };
        assert_eq!(feature.geometry_kind(), "POINT");
        assert_eq!(feature.to_string(), "#4 POINT -98 50");

        let empty = Feature::empty(9);
        assert_eq!(empty.geometry_kind(), "NONE");
        assert!(empty.mbr().is_none());
        assert_eq!(empty.to_string(), "#9 NONE");
    }
}
