//! Shared field readers for the geometry decoders

use std::io::{Read, Seek};

use super::ObjectReader;
use crate::error::{MitabError, Result};
use crate::io::map::coord_block::CoordSections;
use crate::io::map::raw_block::file_offset;
use crate::notification::{Notification, NotificationType};
use crate::types::{LineString, Mbr, RgbColor, Vector2};

/// Convert a stored angle to the coordinate system orientation.
///
/// Angles are stored for integer space, whose X axis is reversed.
pub fn flip_angle(angle: f64) -> f64 {
    if angle <= 180.0 {
        180.0 - angle
    } else {
        540.0 - angle
    }
}

/// Stored tenths of a degree to degrees
pub fn tenths_to_degrees(value: i16) -> f64 {
    value as f64 / 10.0
}

impl<R: Read + Seek> ObjectReader<'_, R> {
    /// One coordinate pair from the object record, in coordinate system units.
    pub(super) fn read_coord(&mut self, compressed: bool) -> Result<Vector2> {
        let (x, y) = self.object_block.read_int_coord(compressed)?;
        Ok(self.header.int_to_coordsys(x, y))
    }

    /// Two coordinate pairs from the object record, normalized.
    pub(super) fn read_mbr(&mut self, compressed: bool) -> Result<Mbr> {
        let a = self.read_coord(compressed)?;
        let b = self.read_coord(compressed)?;
        Ok(Mbr::from_corners(a, b))
    }

    /// Packed color, three bytes most significant first.
    pub(super) fn read_rgb(&mut self) -> Result<RgbColor> {
        let r = self.object_block.read_u8()?;
        let g = self.object_block.read_u8()?;
        let b = self.object_block.read_u8()?;
        Ok(RgbColor::from_bytes(r, g, b))
    }

    /// Absolute integer center stored by polyline and region records.
    ///
    /// Compressed records carry an extra int16 pair in front of it.
    pub(super) fn read_center(&mut self, compressed: bool) -> Result<(i32, i32)> {
        if compressed {
            self.object_block.skip(4)?;
        }
        let x = self.object_block.read_i32()?;
        let y = self.object_block.read_i32()?;
        Ok((x, y))
    }

    /// Position the coordinate cursor at a pointer read from the record.
    pub(super) fn seek_coord_block(&mut self, ptr: i32) -> Result<()> {
        let offset = file_offset(ptr)?;
        self.coord_block.seek(&mut *self.source, offset)
    }

    /// `count` vertices from the coordinate block, transformed.
    pub(super) fn read_coord_points(&mut self, compressed: bool, count: usize) -> Result<Vec<Vector2>> {
        let raw = self.coord_block.read_int_coords(&mut *self.source, compressed, count)?;
        Ok(raw
            .into_iter()
            .map(|(x, y)| self.header.int_to_coordsys(x, y))
            .collect())
    }

    /// Section headers followed by every vertex of a multi-part object,
    /// sliced into one line string per section.
    ///
    /// Headers are read in one pass and all vertices in one bulk read.
    pub(super) fn read_sections(
        &mut self,
        ptr: i32,
        num_sections: i16,
        compressed: bool,
        center: (i32, i32),
    ) -> Result<(Vec<LineString>, CoordSections)> {
        let num_sections = usize::try_from(num_sections).map_err(|_| {
            MitabError::InvalidFormat(format!("negative section count {num_sections}"))
        })?;

        self.seek_coord_block(ptr)?;
        self.coord_block.set_compr_origin(center.0, center.1);
        let sections = self
            .coord_block
            .read_coord_sec_hdrs(&mut *self.source, compressed, num_sections)?;

        for (index, header) in sections.headers.iter().enumerate() {
            if !header.data_offset_matches(num_sections) {
                self.notifications.push(
                    Notification::new(
                        NotificationType::Warning,
                        format!(
                            "section {index} data offset {} disagrees with vertex offset {}",
                            header.data_offset, header.vertex_offset
                        ),
                    )
                    .with_feature(self.feature_id),
                );
            }
        }

        let vertices = self.read_coord_points(compressed, sections.total_vertices)?;
        let parts = sections
            .headers
            .iter()
            .map(|h| LineString::from_points(vertices[h.vertex_range()].to_vec()))
            .collect();
        Ok((parts, sections))
    }

    /// Text bytes stored in the coordinate block chain.
    pub(super) fn read_string(&mut self, ptr: i32, len: usize) -> Result<String> {
        if len == 0 {
            return Ok(String::new());
        }
        self.seek_coord_block(ptr)?;
        let mut bytes = vec![0u8; len];
        self.coord_block.read_bytes(&mut *self.source, &mut bytes)?;
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
        Ok(text.into_owned())
    }
}
