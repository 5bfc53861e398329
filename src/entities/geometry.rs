//! Closed set of decoded geometries

use super::{Arc, Ellipse, Entity, Point, Polyline, Rectangle, Region, Text};
use crate::types::Mbr;

use std::fmt;

/// Geometry of one feature, in coordinate system units.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// The feature has no geometry (null object pointer or type 0)
    None,
    Point(Point),
    Polyline(Polyline),
    Region(Region),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Arc(Arc),
    Text(Text),
}

impl Geometry {
    fn entity(&self) -> Option<&dyn Entity> {
        match self {
            Geometry::None => None,
            Geometry::Point(g) => Some(g),
            Geometry::Polyline(g) => Some(g),
            Geometry::Region(g) => Some(g),
            Geometry::Rectangle(g) => Some(g),
            Geometry::Ellipse(g) => Some(g),
            Geometry::Arc(g) => Some(g),
            Geometry::Text(g) => Some(g),
        }
    }

    /// Normalized MBR, `None` for features without geometry
    pub fn mbr(&self) -> Option<Mbr> {
        self.entity().map(Entity::mbr)
    }

    /// MIF keyword describing the geometry
    pub fn kind(&self) -> &'static str {
        self.entity().map_or("NONE", Entity::entity_type)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Geometry::None)
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polyline(&self) -> Option<&Polyline> {
        match self {
            Geometry::Polyline(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_region(&self) -> Option<&Region> {
        match self {
            Geometry::Region(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_arc(&self) -> Option<&Arc> {
        match self {
            Geometry::Arc(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Geometry::Text(t) => Some(t),
            _ => None,
        }
    }
}

fn write_corners(f: &mut fmt::Formatter<'_>, mbr: &Mbr) -> fmt::Result {
    let (min, max) = (mbr.min(), mbr.max());
    write!(f, "{} {} {} {}", min.x, min.y, max.x, max.y)
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::None => write!(f, "NONE"),
            Geometry::Point(p) => write!(f, "POINT {} {}", p.position.x, p.position.y),
            Geometry::Polyline(p) if p.multi => write!(f, "PLINE MULTIPLE {}", p.num_parts()),
            Geometry::Polyline(p) => match p.parts.first() {
                Some(line) if line.len() == 2 => {
                    let (a, b) = (line.points[0], line.points[1]);
                    write!(f, "LINE {} {} {} {}", a.x, a.y, b.x, b.y)
                }
                Some(line) => write!(f, "PLINE {}", line.len()),
                None => write!(f, "PLINE 0"),
            },
            Geometry::Region(r) => write!(f, "REGION {}", r.num_rings()),
            Geometry::Rectangle(r) => {
                write!(f, "{} ", r.entity_type())?;
                write_corners(f, &r.mbr)?;
                if let Some((rx, _)) = r.corner_radius {
                    write!(f, " {}", rx)?;
                }
                Ok(())
            }
            Geometry::Ellipse(e) => {
                write!(f, "ELLIPSE ")?;
                write_corners(f, &e.mbr)
            }
            Geometry::Arc(a) => {
                write!(f, "ARC ")?;
                write_corners(f, &a.ellipse_mbr)?;
                write!(f, " {} {}", a.start_angle, a.end_angle)
            }
            Geometry::Text(t) => write!(f, "TEXT \"{}\" {} {}", t.value, t.anchor.x, t.anchor.y),
        }
    }
}
