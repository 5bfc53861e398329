//! Line, polyline and multi-polyline features

use super::Entity;
use crate::types::{LineString, Mbr, Vector2};

/// One or more line strings.
///
/// Simple lines and polylines carry a single part; multi-polylines carry one
/// part per section, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub parts: Vec<LineString>,
    /// Stored as a spline/smoothed line
    pub smooth: bool,
    /// Decoded from a multi-section record
    pub multi: bool,
    /// Reference point for compressed coordinates, when the record has one
    pub center: Option<Vector2>,
    /// MBR as stored in the record
    pub mbr: Mbr,
}

impl Polyline {
    /// Single-part polyline
    pub fn single(line: LineString, mbr: Mbr) -> Self {
        Polyline {
            parts: vec![line],
            mbr,
            ..Default::default()
        }
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn num_points(&self) -> usize {
        self.parts.iter().map(LineString::len).sum()
    }
}

impl Entity for Polyline {
    fn mbr(&self) -> Mbr {
        self.mbr
    }

    fn entity_type(&self) -> &'static str {
        if self.multi {
            "MULTIPLINE"
        } else if self.parts.first().map_or(0, LineString::len) == 2 {
            "LINE"
        } else {
            "PLINE"
        }
    }
}
