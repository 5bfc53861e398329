//! `.MAP` header block (page 0).
//!
//! Holds the file-wide bounding box, the first block pointers, the
//! per-object-type size table and the integer ↔ coordinate system
//! transform used by every geometry decoder.

use super::constants::{header, HEADER_MAGIC_COOKIE, MAP_BLOCK_SIZE};
use super::raw_block::PagedBlockStore;
use crate::error::{MitabError, Result};
use crate::types::Vector2;

use std::io::{Read, Seek};

/// Projection parameters embedded in the header.
///
/// Values are kept as stored; translating them to a spatial reference is
/// left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectionInfo {
    pub proj_id: u8,
    pub ellipsoid_id: u8,
    pub units_id: u8,
    pub proj_params: [f64; 6],
    pub datum_shift_x: f64,
    pub datum_shift_y: f64,
    pub datum_shift_z: f64,
    pub datum_params: [f64; 5],
}

/// Decoded header block.
#[derive(Debug, Clone)]
pub struct HeaderBlock {
    pub version: i16,
    pub block_size: i16,

    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,

    pub first_index_block: i32,
    pub first_garbage_block: i32,
    pub first_tool_block: i32,

    pub num_point_objects: i32,
    pub num_line_objects: i32,
    pub num_region_objects: i32,
    pub num_text_objects: i32,

    pub max_spatial_index_depth: u8,

    pub x_scale: f64,
    pub y_scale: f64,
    pub x_displ: f64,
    pub y_displ: f64,

    pub projection: ProjectionInfo,

    object_table: [u8; header::OBJECT_TABLE_LEN],
}

impl HeaderBlock {
    /// Read and validate page 0 of a `.MAP` file.
    pub fn read<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let mut store = PagedBlockStore::new(MAP_BLOCK_SIZE, true);
        store.read_from_file(source, 0, MAP_BLOCK_SIZE)?;
        Self::decode(&mut store)
    }

    /// Decode from a store whose buffered page is the header.
    pub fn decode(store: &mut PagedBlockStore) -> Result<Self> {
        store.goto_byte_in_block(header::MAGIC_COOKIE as i64)?;
        let magic = store.read_i32()?;
        if magic != HEADER_MAGIC_COOKIE {
            return Err(MitabError::InvalidFormat(format!(
                "bad magic cookie {magic}, not a .MAP header block"
            )));
        }

        let mut object_table = [0u8; header::OBJECT_TABLE_LEN];
        store.goto_byte_in_block(header::OBJECT_TABLE as i64)?;
        store.read_bytes(&mut object_table)?;

        store.goto_byte_in_block(header::VERSION as i64)?;
        let version = store.read_i16()?;
        let block_size = store.read_i16()?;

        store.goto_byte_in_block(header::BOUNDS as i64)?;
        let x_min = store.read_i32()?;
        let y_min = store.read_i32()?;
        let x_max = store.read_i32()?;
        let y_max = store.read_i32()?;

        store.goto_byte_in_block(header::BLOCK_POINTERS as i64)?;
        let first_index_block = store.read_i32()?;
        let first_garbage_block = store.read_i32()?;
        let first_tool_block = store.read_i32()?;
        let num_point_objects = store.read_i32()?;
        let num_line_objects = store.read_i32()?;
        let num_region_objects = store.read_i32()?;
        let num_text_objects = store.read_i32()?;

        store.goto_byte_in_block(header::MAX_SPATIAL_INDEX_DEPTH as i64)?;
        let max_spatial_index_depth = store.read_u8()?;

        store.goto_byte_in_block(header::PROJECTION as i64)?;
        let mut projection = ProjectionInfo {
            proj_id: store.read_u8()?,
            ellipsoid_id: store.read_u8()?,
            units_id: store.read_u8()?,
            ..Default::default()
        };
        let x_scale = store.read_f64()?;
        let y_scale = store.read_f64()?;
        let x_displ = store.read_f64()?;
        let y_displ = store.read_f64()?;

        for param in projection.proj_params.iter_mut() {
            *param = store.read_f64()?;
        }
        projection.datum_shift_x = store.read_f64()?;
        projection.datum_shift_y = store.read_f64()?;
        projection.datum_shift_z = store.read_f64()?;
        for param in projection.datum_params.iter_mut() {
            *param = store.read_f64()?;
        }

        if x_scale == 0.0 || y_scale == 0.0 {
            return Err(MitabError::InvalidFormat(format!(
                "zero coordinate scale ({x_scale}, {y_scale})"
            )));
        }

        tracing::debug!(version, block_size, x_scale, y_scale, "decoded .MAP header");

        Ok(Self {
            version,
            block_size,
            x_min,
            y_min,
            x_max,
            y_max,
            first_index_block,
            first_garbage_block,
            first_tool_block,
            num_point_objects,
            num_line_objects,
            num_region_objects,
            num_text_objects,
            max_spatial_index_depth,
            x_scale,
            y_scale,
            x_displ,
            y_displ,
            projection,
            object_table,
        })
    }

    /// Integer coordinates to coordinate system units. The X axis is negated.
    pub fn int_to_coordsys(&self, x: i32, y: i32) -> Vector2 {
        Vector2::new(
            -(x as f64 - self.x_displ) / self.x_scale,
            (y as f64 - self.y_displ) / self.y_scale,
        )
    }

    /// Exact inverse of [`int_to_coordsys`](Self::int_to_coordsys), rounded
    /// to the nearest integer.
    pub fn coordsys_to_int(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (-x * self.x_scale + self.x_displ).round() as i32,
            (y * self.y_scale + self.y_displ).round() as i32,
        )
    }

    /// Scale an integer distance pair; no displacement, no sign flip.
    pub fn int_to_coordsys_dist(&self, dx: i32, dy: i32) -> (f64, f64) {
        (dx as f64 / self.x_scale, dy as f64 / self.y_scale)
    }

    pub fn coordsys_to_int_dist(&self, dx: f64, dy: f64) -> (i32, i32) {
        (
            (dx * self.x_scale).round() as i32,
            (dy * self.y_scale).round() as i32,
        )
    }

    fn object_table_entry(&self, object_type: i32) -> Result<u8> {
        usize::try_from(object_type)
            .ok()
            .and_then(|i| self.object_table.get(i).copied())
            .ok_or_else(|| {
                MitabError::IllegalArgument(format!("invalid object type {object_type}"))
            })
    }

    /// Fixed body size of an object type, from the header table.
    pub fn object_body_size(&self, object_type: i32) -> Result<u8> {
        Ok(self.object_table_entry(object_type)? & header::BODY_SIZE_MASK)
    }

    /// True when objects of this type keep their coordinates in coord blocks.
    pub fn uses_coord_block(&self, object_type: i32) -> Result<bool> {
        Ok(self.object_table_entry(object_type)? & header::USES_COORD_BLOCK != 0)
    }

    /// Total objects across the four counted families.
    pub fn total_objects(&self) -> i64 {
        self.num_point_objects as i64
            + self.num_line_objects as i64
            + self.num_region_objects as i64
            + self.num_text_objects as i64
    }
}
