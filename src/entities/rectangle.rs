//! Rectangle and rounded rectangle features

use super::Entity;
use crate::types::{LineString, Mbr};

/// Axis-aligned rectangle, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub mbr: Mbr,
    /// Corner radii (x, y) for rounded rectangles, as stored
    pub corner_radius: Option<(f64, f64)>,
    /// Closed outline; corners are sampled for rounded rectangles
    pub ring: LineString,
}

impl Rectangle {
    pub fn is_rounded(&self) -> bool {
        self.corner_radius.is_some()
    }
}

impl Entity for Rectangle {
    fn mbr(&self) -> Mbr {
        self.mbr
    }

    fn entity_type(&self) -> &'static str {
        if self.is_rounded() {
            "ROUNDRECT"
        } else {
            "RECT"
        }
    }
}
