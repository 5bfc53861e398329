//! Ellipse features

use super::Entity;
use crate::types::{LineString, Mbr, Vector2};

/// Axis-aligned ellipse inscribed in its MBR.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Vector2,
    pub x_radius: f64,
    pub y_radius: f64,
    pub mbr: Mbr,
    /// Closed sampled outline
    pub ring: LineString,
}

impl Entity for Ellipse {
    fn mbr(&self) -> Mbr {
        self.mbr
    }

    fn entity_type(&self) -> &'static str {
        "ELLIPSE"
    }
}
