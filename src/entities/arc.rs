//! Arc features

use super::Entity;
use crate::types::{LineString, Mbr, Vector2};

/// Elliptical arc, sampled into a line string.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Center of the defining ellipse
    pub center: Vector2,
    pub x_radius: f64,
    pub y_radius: f64,
    /// Start angle in degrees, counterclockwise from the positive X axis
    pub start_angle: f64,
    /// End angle in degrees
    pub end_angle: f64,
    /// MBR of the arc itself
    pub mbr: Mbr,
    /// MBR of the full ellipse the arc lies on
    pub ellipse_mbr: Mbr,
    pub line: LineString,
}

impl Arc {
    /// Angular extent in degrees, wrapped into `[0, 360)`
    pub fn sweep_angle(&self) -> f64 {
        let sweep = self.end_angle - self.start_angle;
        if sweep < 0.0 {
            sweep + 360.0
        } else {
            sweep
        }
    }
}

impl Entity for Arc {
    fn mbr(&self) -> Mbr {
        self.mbr
    }

    fn entity_type(&self) -> &'static str {
        "ARC"
    }
}
