//! Vertex sequences and the shared arc generator

use super::{Mbr, Vector2};
use std::f64::consts::PI;

/// Ordered sequence of vertices in coordinate-system units.
///
/// Used for polylines, polygon rings, and the sampled outlines of arcs,
/// ellipses and rounded rectangles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    pub points: Vec<Vector2>,
}

impl LineString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LineString {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn from_points(points: Vec<Vector2>) -> Self {
        LineString { points }
    }

    pub fn push(&mut self, point: Vector2) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Vector2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vector2> {
        self.points.last().copied()
    }

    /// Bounding rectangle of all vertices, `None` when empty
    pub fn mbr(&self) -> Option<Mbr> {
        Mbr::from_points(&self.points)
    }

    /// True when the first and last vertices are the same point
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Append the first vertex again unless the ring is already closed.
    ///
    /// Calling this twice has the same effect as calling it once.
    pub fn close_ring(&mut self) {
        if let Some(first) = self.first() {
            if !self.is_closed() {
                self.points.push(first);
            }
        }
    }

    /// Append `num_points` vertices on the ellipse `(center, x_radius, y_radius)`,
    /// walking counterclockwise from `start_angle` to `end_angle` (radians).
    ///
    /// An `end_angle` smaller than `start_angle` is wrapped forward by a full
    /// turn, so the span walked is always within `[0, 2π]`.
    pub fn generate_arc(
        &mut self,
        center: Vector2,
        x_radius: f64,
        y_radius: f64,
        start_angle: f64,
        end_angle: f64,
        num_points: usize,
    ) {
        let end_angle = if end_angle < start_angle {
            end_angle + 2.0 * PI
        } else {
            end_angle
        };

        let step = if num_points > 1 {
            (end_angle - start_angle) / (num_points - 1) as f64
        } else {
            0.0
        };

        self.points.reserve(num_points);
        for i in 0..num_points {
            let angle = start_angle + step * i as f64;
            self.points.push(Vector2::new(
                center.x + x_radius * angle.cos(),
                center.y + y_radius * angle.sin(),
            ));
        }
    }

    /// Convenience constructor around [`LineString::generate_arc`]
    pub fn arc(
        center: Vector2,
        x_radius: f64,
        y_radius: f64,
        start_angle: f64,
        end_angle: f64,
        num_points: usize,
    ) -> Self {
        let mut line = LineString::with_capacity(num_points);
        line.generate_arc(center, x_radius, y_radius, start_angle, end_angle, num_points);
        line
    }
}

impl From<Vec<Vector2>> for LineString {
    fn from(points: Vec<Vector2>) -> Self {
        LineString { points }
    }
}
