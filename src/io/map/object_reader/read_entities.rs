//! Per-family object decoders

use std::f64::consts::PI;
use std::io::{Read, Seek};

use super::common::{flip_angle, tenths_to_degrees};
use super::{DecodedObject, ObjectReader};
use crate::entities::{
    Arc, Ellipse, FontStyle, FontSymbol, Geometry, Point, PointKind, Polyline, Rectangle, Region,
    Text, TextFlags, ToolRefs,
};
use crate::error::{MitabError, Result};
use crate::io::map::constants::arc_sampling;
use crate::types::{LineString, Mbr, Vector2};

impl<R: Read + Seek> ObjectReader<'_, R> {
    // -----------------------------------------------------------------------
    // Points
    // -----------------------------------------------------------------------

    /// Read a SYMBOL point.
    pub(super) fn read_point(&mut self, compressed: bool) -> Result<DecodedObject> {
        let position = self.read_coord(compressed)?;
        let symbol_index = self.object_block.read_u8()?;
        Ok(DecodedObject::new(
            Geometry::Point(Point::new(position, PointKind::Symbol { symbol_index })),
            ToolRefs::symbol(symbol_index),
        ))
    }

    /// Read a FONT SYMBOL point.
    pub(super) fn read_font_point(&mut self, compressed: bool) -> Result<DecodedObject> {
        let shape = self.object_block.read_u8()?;
        let point_size = self.object_block.read_u8()?;
        let font_style = self.object_block.read_u8()?;
        let effect = self.object_block.read_u8()?;
        let color = self.read_rgb()?;
        self.object_block.skip(3)?;
        let rotation = tenths_to_degrees(self.object_block.read_i16()?);
        let position = self.read_coord(compressed)?;
        let font_index = self.object_block.read_u8()?;

        let symbol = FontSymbol {
            shape,
            point_size,
            font_style,
            effect,
            color,
            rotation,
            font_index,
        };
        Ok(DecodedObject::new(
            Geometry::Point(Point::new(position, PointKind::FontSymbol(symbol))),
            ToolRefs::font(font_index),
        ))
    }

    /// Read a CUSTOM SYMBOL point.
    pub(super) fn read_custom_point(&mut self, compressed: bool) -> Result<DecodedObject> {
        let unknown = self.object_block.read_i16()?;
        let position = self.read_coord(compressed)?;
        let symbol_index = self.object_block.read_u8()?;
        Ok(DecodedObject::new(
            Geometry::Point(Point::new(
                position,
                PointKind::CustomSymbol {
                    unknown,
                    symbol_index,
                },
            )),
            ToolRefs::symbol(symbol_index),
        ))
    }

    // -----------------------------------------------------------------------
    // Lines
    // -----------------------------------------------------------------------

    /// Read a two-point LINE.
    pub(super) fn read_line(&mut self, compressed: bool) -> Result<DecodedObject> {
        let start = self.read_coord(compressed)?;
        let end = self.read_coord(compressed)?;
        let pen = self.object_block.read_u8()?;

        let line = LineString::from_points(vec![start, end]);
        Ok(DecodedObject::new(
            Geometry::Polyline(Polyline::single(line, Mbr::from_corners(start, end))),
            ToolRefs::pen(pen),
        ))
    }

    /// Read a single-part PLINE.
    pub(super) fn read_polyline(&mut self, compressed: bool) -> Result<DecodedObject> {
        let coord_ptr = self.object_block.read_i32()?;
        let data_size = self.object_block.read_i32()?;
        let center = self.read_center(compressed)?;
        let mbr = self.read_mbr(compressed)?;
        let pen = self.object_block.read_u8()?;

        // A negative size flags a smoothed polyline.
        let smooth = data_size < 0;
        let pair_size = if compressed { 4 } else { 8 };
        let num_points = data_size.unsigned_abs() as usize / pair_size;

        self.seek_coord_block(coord_ptr)?;
        self.coord_block.set_compr_origin(center.0, center.1);
        let points = self.read_coord_points(compressed, num_points)?;

        let polyline = Polyline {
            parts: vec![LineString::from_points(points)],
            smooth,
            multi: false,
            center: Some(self.header.int_to_coordsys(center.0, center.1)),
            mbr,
        };
        Ok(DecodedObject::new(Geometry::Polyline(polyline), ToolRefs::pen(pen)))
    }

    /// Read a MULTIPLE PLINE.
    pub(super) fn read_multi_polyline(&mut self, compressed: bool) -> Result<DecodedObject> {
        let coord_ptr = self.object_block.read_i32()?;
        self.object_block.skip(4)?;
        let num_sections = self.object_block.read_i16()?;
        let center = self.read_center(compressed)?;
        let mbr = self.read_mbr(compressed)?;
        let pen = self.object_block.read_u8()?;

        let (parts, _) = self.read_sections(coord_ptr, num_sections, compressed, center)?;

        let polyline = Polyline {
            parts,
            smooth: false,
            multi: true,
            center: Some(self.header.int_to_coordsys(center.0, center.1)),
            mbr,
        };
        Ok(DecodedObject::new(Geometry::Polyline(polyline), ToolRefs::pen(pen)))
    }

    // -----------------------------------------------------------------------
    // Areas
    // -----------------------------------------------------------------------

    /// Read a REGION.
    ///
    /// Rings come back in file order; hole counts are kept as stored and
    /// rings are not nested.
    pub(super) fn read_region(&mut self, compressed: bool) -> Result<DecodedObject> {
        let coord_ptr = self.object_block.read_i32()?;
        self.object_block.skip(4)?;
        let num_sections = self.object_block.read_i16()?;
        let center = self.read_center(compressed)?;
        let mbr = self.read_mbr(compressed)?;
        let pen = self.object_block.read_u8()?;
        let brush = self.object_block.read_u8()?;

        let (rings, sections) = self.read_sections(coord_ptr, num_sections, compressed, center)?;

        let region = Region {
            rings,
            declared_holes: sections.headers.iter().map(|h| h.num_holes).collect(),
            center: Some(self.header.int_to_coordsys(center.0, center.1)),
            mbr,
        };
        Ok(DecodedObject::new(Geometry::Region(region), ToolRefs::pen_brush(pen, brush)))
    }

    /// Read a RECT or ROUNDRECT.
    pub(super) fn read_rectangle(&mut self, compressed: bool, rounded: bool) -> Result<DecodedObject> {
        let radius = if rounded {
            let rx = self.object_block.read_int_value(compressed)?;
            let ry = self.object_block.read_int_value(compressed)?;
            let (rx, ry) = self.header.int_to_coordsys_dist(rx, ry);
            Some((rx.abs(), ry.abs()))
        } else {
            None
        };
        let mbr = self.read_mbr(compressed)?;
        let pen = self.object_block.read_u8()?;
        let brush = self.object_block.read_u8()?;

        let (ring, corner_radius) = rectangle_ring(&mbr, radius);
        let rectangle = Rectangle {
            mbr,
            corner_radius,
            ring,
        };
        Ok(DecodedObject::new(
            Geometry::Rectangle(rectangle),
            ToolRefs::pen_brush(pen, brush),
        ))
    }

    /// Read an ELLIPSE.
    pub(super) fn read_ellipse(&mut self, compressed: bool) -> Result<DecodedObject> {
        let mbr = self.read_mbr(compressed)?;
        let pen = self.object_block.read_u8()?;
        let brush = self.object_block.read_u8()?;

        let center = mbr.center();
        let x_radius = mbr.width() / 2.0;
        let y_radius = mbr.height() / 2.0;
        let mut ring = LineString::arc(
            center,
            x_radius,
            y_radius,
            0.0,
            2.0 * PI,
            arc_sampling::ELLIPSE_POINTS,
        );
        ring.close_ring();

        let ellipse = Ellipse {
            center,
            x_radius,
            y_radius,
            mbr,
            ring,
        };
        Ok(DecodedObject::new(Geometry::Ellipse(ellipse), ToolRefs::pen_brush(pen, brush)))
    }

    // -----------------------------------------------------------------------
    // Arc
    // -----------------------------------------------------------------------

    /// Read an ARC.
    pub(super) fn read_arc(&mut self, compressed: bool) -> Result<DecodedObject> {
        // Stored end first, then start.
        let end_angle = flip_angle(tenths_to_degrees(self.object_block.read_i16()?));
        let start_angle = flip_angle(tenths_to_degrees(self.object_block.read_i16()?));
        let mbr = self.read_mbr(compressed)?;
        let ellipse_mbr = self.read_mbr(compressed)?;
        let pen = self.object_block.read_u8()?;

        let center = ellipse_mbr.center();
        let x_radius = ellipse_mbr.width() / 2.0;
        let y_radius = ellipse_mbr.height() / 2.0;
        let num_points = arc_point_count(start_angle, end_angle);
        let line = LineString::arc(
            center,
            x_radius,
            y_radius,
            start_angle.to_radians(),
            end_angle.to_radians(),
            num_points,
        );

        let arc = Arc {
            center,
            x_radius,
            y_radius,
            start_angle,
            end_angle,
            mbr,
            ellipse_mbr,
            line,
        };
        Ok(DecodedObject::new(Geometry::Arc(arc), ToolRefs::pen(pen)))
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Read a TEXT object.
    pub(super) fn read_text(&mut self, compressed: bool) -> Result<DecodedObject> {
        let string_ptr = self.object_block.read_i32()?;
        let string_len = self.object_block.read_i16()?;
        let flags = TextFlags::from_bits_truncate(self.object_block.read_i16()? as u16);
        let angle = flip_angle(tenths_to_degrees(self.object_block.read_i16()?));
        let font_style = FontStyle::from_bits_truncate(self.object_block.read_i16()? as u16);
        let fg_color = self.read_rgb()?;
        let bg_color = self.read_rgb()?;
        let label_line_end = self.read_coord(compressed)?;
        let raw_height = self.object_block.read_int_value(compressed)?;
        let (_, height) = self.header.int_to_coordsys_dist(0, raw_height);
        let font = self.object_block.read_u8()?;
        let mbr = self.read_mbr(compressed)?;
        let pen = self.object_block.read_u8()?;

        let len = usize::try_from(string_len).map_err(|_| {
            MitabError::InvalidFormat(format!("negative text length {string_len}"))
        })?;
        let value = self.read_string(string_ptr, len)?;

        let text = Text {
            value,
            anchor: mbr.min(),
            angle,
            height,
            flags,
            font_style,
            fg_color,
            bg_color,
            label_line_end,
            mbr,
        };
        Ok(DecodedObject::new(
            Geometry::Text(text),
            ToolRefs {
                pen: Some(pen),
                font: Some(font),
                ..Default::default()
            },
        ))
    }
}

/// Number of vertices sampled along an arc, one every two degrees.
pub fn arc_point_count(start_angle: f64, end_angle: f64) -> usize {
    let span = if end_angle < start_angle {
        end_angle + 360.0 - start_angle
    } else {
        end_angle - start_angle
    };
    let steps = (span.abs() / arc_sampling::ARC_STEP_DEGREES).round() as usize;
    (steps + 1).max(2)
}

/// Closed outline of a rectangle, with quarter-ellipse corners when a
/// radius is given. The radius is clamped to half the extent on each axis;
/// the clamped value is returned with the ring.
pub fn rectangle_ring(mbr: &Mbr, radius: Option<(f64, f64)>) -> (LineString, Option<(f64, f64)>) {
    let (min, max) = (mbr.min(), mbr.max());
    let mut ring = LineString::new();

    let radius = radius.map(|(rx, ry)| (rx.min(mbr.width() / 2.0), ry.min(mbr.height() / 2.0)));
    match radius {
        Some((rx, ry)) => {
            let n = arc_sampling::ROUND_CORNER_POINTS;
            ring.generate_arc(Vector2::new(min.x + rx, min.y + ry), rx, ry, PI, 1.5 * PI, n);
            ring.generate_arc(Vector2::new(max.x - rx, min.y + ry), rx, ry, 1.5 * PI, 2.0 * PI, n);
            ring.generate_arc(Vector2::new(max.x - rx, max.y - ry), rx, ry, 0.0, PI / 2.0, n);
            ring.generate_arc(Vector2::new(min.x + rx, max.y - ry), rx, ry, PI / 2.0, PI, n);
        }
        None => {
            ring.push(min);
            ring.push(Vector2::new(max.x, min.y));
            ring.push(max);
            ring.push(Vector2::new(min.x, max.y));
        }
    }
    ring.close_ring();
    (ring, radius)
}
