//! Coordinate blocks.
//!
//! Vertex arrays, multi-part section headers and text strings live in
//! chains of coordinate pages. Reads that run past the data of one page
//! continue on the next page of the chain.

use super::constants::{coord_block, MAP_BLOCK_SIZE};
use super::raw_block::{BlockType, ChainedBlock};
use crate::error::{MitabError, Result};

use byteorder::{ByteOrder, LittleEndian};
use std::io::{Read, Seek};

/// Header of one part of a multi-part geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordSectionHeader {
    pub num_vertices: i32,
    pub num_holes: i32,
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
    /// Stored offset of the section's vertices, relative to the first header
    pub data_offset: i32,
    /// Index of the section's first vertex in the flattened vertex array
    pub vertex_offset: usize,
}

impl CoordSectionHeader {
    /// Range of this section in the flattened vertex array
    pub fn vertex_range(&self) -> std::ops::Range<usize> {
        self.vertex_offset..self.vertex_offset + self.num_vertices as usize
    }

    /// True when the stored data offset agrees with the running vertex
    /// offset, under either the compressed or the uncompressed layout.
    pub fn data_offset_matches(&self, num_sections: usize) -> bool {
        let offset = self.data_offset as i64;
        let n = num_sections as i64;
        let uncompressed = offset - n * coord_block::SECTION_HEADER_SIZE as i64;
        let compressed = offset - n * coord_block::SECTION_HEADER_SIZE_COMPRESSED as i64;
        let expected = self.vertex_offset as i64;
        (uncompressed >= 0 && uncompressed % 8 == 0 && uncompressed / 8 == expected)
            || (compressed >= 0 && compressed % 4 == 0 && compressed / 4 == expected)
    }
}

/// Section headers of one object plus the vertex total they describe.
#[derive(Debug, Clone, Default)]
pub struct CoordSections {
    pub headers: Vec<CoordSectionHeader>,
    pub total_vertices: usize,
}

/// Cursor over the coordinate block chain of a `.MAP` file.
#[derive(Debug, Clone)]
pub struct CoordBlock {
    chain: ChainedBlock,
    compr_origin: (i32, i32),
}

impl Default for CoordBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordBlock {
    pub fn new() -> Self {
        Self {
            chain: ChainedBlock::new(BlockType::Coord, MAP_BLOCK_SIZE),
            compr_origin: (0, 0),
        }
    }

    /// Position the cursor at a file offset. Landing exactly on a page
    /// boundary skips the page header.
    pub fn seek<R: Read + Seek>(&mut self, source: &mut R, offset: u64) -> Result<()> {
        if offset % MAP_BLOCK_SIZE as u64 == 0 {
            self.chain.goto_block_data(source, offset)
        } else {
            self.chain.goto_byte_in_file(source, offset)
        }
    }

    pub fn data_bytes(&self) -> i16 {
        self.chain.data_bytes()
    }

    pub fn next_block(&self) -> i32 {
        self.chain.next_block()
    }

    /// Absolute file offset of the cursor
    pub fn file_position(&self) -> u64 {
        self.chain.file_position()
    }

    /// Set the origin compressed coordinates are relative to. Must be called
    /// before reading any compressed value of an object.
    pub fn set_compr_origin(&mut self, x: i32, y: i32) {
        self.compr_origin = (x, y);
    }

    pub fn compr_origin(&self) -> (i32, i32) {
        self.compr_origin
    }

    /// Copy `dst.len()` bytes, following the next-block chain as needed.
    pub fn read_bytes<R: Read + Seek>(&mut self, source: &mut R, dst: &mut [u8]) -> Result<()> {
        self.chain.read_bytes(source, dst)
    }

    pub fn read_i16<R: Read + Seek>(&mut self, source: &mut R) -> Result<i16> {
        self.chain.read_i16(source)
    }

    pub fn read_i32<R: Read + Seek>(&mut self, source: &mut R) -> Result<i32> {
        self.chain.read_i32(source)
    }

    /// Read one coordinate pair, relative to the compressed origin when
    /// `compressed`.
    pub fn read_int_coord<R: Read + Seek>(&mut self, source: &mut R, compressed: bool) -> Result<(i32, i32)> {
        if compressed {
            let dx = self.read_i16(source)?;
            let dy = self.read_i16(source)?;
            Ok((
                self.compr_origin.0.wrapping_add(dx as i32),
                self.compr_origin.1.wrapping_add(dy as i32),
            ))
        } else {
            let x = self.read_i32(source)?;
            let y = self.read_i32(source)?;
            Ok((x, y))
        }
    }

    /// Read a flat run of `count` coordinate pairs.
    ///
    /// Pairs are read one page worth at a time, so a corrupt count fails
    /// at the end of the chain without allocating for the whole run.
    pub fn read_int_coords<R: Read + Seek>(
        &mut self,
        source: &mut R,
        compressed: bool,
        count: usize,
    ) -> Result<Vec<(i32, i32)>> {
        let pair_size = if compressed { 4 } else { 8 };
        let pairs_per_read = MAP_BLOCK_SIZE / pair_size;
        let mut raw = vec![0u8; pairs_per_read * pair_size];
        let mut coords = Vec::with_capacity(count.min(pairs_per_read));

        let (ox, oy) = self.compr_origin;
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(pairs_per_read);
            let chunk = &mut raw[..n * pair_size];
            self.chain.read_bytes(source, chunk)?;
            coords.extend(chunk.chunks_exact(pair_size).map(|pair| {
                if compressed {
                    (
                        ox.wrapping_add(LittleEndian::read_i16(&pair[0..2]) as i32),
                        oy.wrapping_add(LittleEndian::read_i16(&pair[2..4]) as i32),
                    )
                } else {
                    (
                        LittleEndian::read_i32(&pair[0..4]),
                        LittleEndian::read_i32(&pair[4..8]),
                    )
                }
            }));
            remaining -= n;
        }
        Ok(coords)
    }

    /// Read `num_sections` section headers and compute each section's
    /// offset into the flattened vertex array.
    pub fn read_coord_sec_hdrs<R: Read + Seek>(
        &mut self,
        source: &mut R,
        compressed: bool,
        num_sections: usize,
    ) -> Result<CoordSections> {
        let mut headers = Vec::with_capacity(num_sections);
        let mut total_vertices = 0usize;

        for index in 0..num_sections {
            let num_vertices = self.read_i16(source)? as i32;
            let num_holes = self.read_i16(source)? as i32;
            let (x_min, y_min) = self.read_int_coord(source, compressed)?;
            let (x_max, y_max) = self.read_int_coord(source, compressed)?;
            let data_offset = self.read_i32(source)?;

            if num_vertices < 0 {
                return Err(MitabError::InvalidFormat(format!(
                    "section {index} has a negative vertex count {num_vertices}"
                )));
            }

            headers.push(CoordSectionHeader {
                num_vertices,
                num_holes,
                x_min,
                y_min,
                x_max,
                y_max,
                data_offset,
                vertex_offset: total_vertices,
            });
            total_vertices += num_vertices as usize;
        }

        Ok(CoordSections {
            headers,
            total_vertices,
        })
    }
}
