//! Geometry decoders.
//!
//! One decoder per MapInfo object family. Each decoder starts with the
//! object block cursor just past the object type byte and feature id, reads
//! the fixed fields of its record, fetches vertex data or text from the
//! coordinate block chain when the record points there, and converts every
//! integer coordinate through the header transform.
//!
//! A decoder either returns a complete geometry or the first error it hit;
//! partially built geometries are dropped.

pub mod common;
pub mod read_entities;

use std::io::{Read, Seek};

use crate::entities::{Geometry, ToolRefs};
use crate::error::Result;
use crate::io::map::coord_block::CoordBlock;
use crate::io::map::header_block::HeaderBlock;
use crate::io::map::object_block::ObjectBlock;
use crate::io::map::object_type::{MapObjectType, ObjectFamily};
use crate::notification::NotificationCollection;

/// Geometry of one object plus the tool indexes its record carried.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedObject {
    pub geometry: Geometry,
    pub tools: ToolRefs,
}

impl DecodedObject {
    fn new(geometry: Geometry, tools: ToolRefs) -> Self {
        Self { geometry, tools }
    }

    /// Object without geometry
    pub fn none() -> Self {
        Self::new(Geometry::None, ToolRefs::default())
    }
}

/// Borrowed view over the cursors of an open `.MAP` file, alive for the
/// decoding of a single object.
pub struct ObjectReader<'a, R: Read + Seek> {
    source: &'a mut R,
    header: &'a HeaderBlock,
    object_block: &'a mut ObjectBlock,
    coord_block: &'a mut CoordBlock,
    notifications: &'a mut NotificationCollection,
    /// Feature being decoded, attached to notifications
    feature_id: i32,
}

impl<'a, R: Read + Seek> ObjectReader<'a, R> {
    pub fn new(
        source: &'a mut R,
        header: &'a HeaderBlock,
        object_block: &'a mut ObjectBlock,
        coord_block: &'a mut CoordBlock,
        notifications: &'a mut NotificationCollection,
        feature_id: i32,
    ) -> Self {
        Self {
            source,
            header,
            object_block,
            coord_block,
            notifications,
            feature_id,
        }
    }

    /// Decode the object at the object block cursor.
    pub fn read(&mut self, object_type: MapObjectType) -> Result<DecodedObject> {
        let compressed = object_type.is_compressed();
        tracing::trace!(
            feature = self.feature_id,
            object_type = %object_type,
            offset = self.object_block.file_position(),
            "decoding object"
        );

        match object_type.family() {
            ObjectFamily::None => Ok(DecodedObject::none()),
            ObjectFamily::Point => self.read_point(compressed),
            ObjectFamily::FontPoint => self.read_font_point(compressed),
            ObjectFamily::CustomPoint => self.read_custom_point(compressed),
            ObjectFamily::Line => self.read_line(compressed),
            ObjectFamily::Polyline => self.read_polyline(compressed),
            ObjectFamily::MultiPolyline => self.read_multi_polyline(compressed),
            ObjectFamily::Region => self.read_region(compressed),
            ObjectFamily::Rectangle => self.read_rectangle(compressed, false),
            ObjectFamily::RoundRectangle => self.read_rectangle(compressed, true),
            ObjectFamily::Ellipse => self.read_ellipse(compressed),
            ObjectFamily::Arc => self.read_arc(compressed),
            ObjectFamily::Text => self.read_text(compressed),
        }
    }
}
