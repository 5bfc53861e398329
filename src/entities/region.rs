//! Region (polygon) features

use super::Entity;
use crate::types::{LineString, Mbr, Vector2};

/// A polygon made of rings in file order.
///
/// Ring 0 is treated as the outer boundary. Holes and islands are not
/// reconstructed: rings are not nested or validated against each other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    pub rings: Vec<LineString>,
    /// Hole counts as declared in each section header
    pub declared_holes: Vec<i32>,
    pub center: Option<Vector2>,
    pub mbr: Mbr,
}

impl Region {
    pub fn outer_ring(&self) -> Option<&LineString> {
        self.rings.first()
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }
}

impl Entity for Region {
    fn mbr(&self) -> Mbr {
        self.mbr
    }

    fn entity_type(&self) -> &'static str {
        "REGION"
    }
}
