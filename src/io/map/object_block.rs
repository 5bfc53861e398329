//! Object data blocks.
//!
//! An object block page holds a run of object records. Its header carries a
//! centroid that compressed coordinates are relative to.

use super::constants::MAP_BLOCK_SIZE;
use super::raw_block::{BlockType, PagedBlockStore};
use crate::error::Result;

use std::io::{Read, Seek};

/// Cursor over the object block pages of a `.MAP` file.
#[derive(Debug, Clone)]
pub struct ObjectBlock {
    store: PagedBlockStore,
    data_bytes: i16,
    center_x: i32,
    center_y: i32,
    first_coord_block: i32,
    last_coord_block: i32,
}

impl Default for ObjectBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBlock {
    pub fn new() -> Self {
        Self {
            store: PagedBlockStore::new(MAP_BLOCK_SIZE, true),
            data_bytes: 0,
            center_x: 0,
            center_y: 0,
            first_coord_block: 0,
            last_coord_block: 0,
        }
    }

    /// Position the cursor at an absolute file offset, loading and
    /// validating the containing object block when needed.
    pub fn goto_byte_in_file<R: Read + Seek>(&mut self, source: &mut R, offset: u64) -> Result<()> {
        if self.store.goto_byte_in_file(source, offset)? {
            if let Err(e) = self.init_from_page() {
                self.store.invalidate();
                return Err(e);
            }
        }
        Ok(())
    }

    fn init_from_page(&mut self) -> Result<()> {
        self.store.expect_block_type(BlockType::Object)?;
        self.data_bytes = self.store.peek_i16(2)?;
        self.center_x = self.store.peek_i32(4)?;
        self.center_y = self.store.peek_i32(8)?;
        self.first_coord_block = self.store.peek_i32(12)?;
        self.last_coord_block = self.store.peek_i32(16)?;
        tracing::trace!(
            offset = self.store.page_offset(),
            center_x = self.center_x,
            center_y = self.center_y,
            "object block header"
        );
        Ok(())
    }

    pub fn data_bytes(&self) -> i16 {
        self.data_bytes
    }

    /// Reference point for compressed coordinates in this page
    pub fn centroid(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    pub fn first_coord_block(&self) -> i32 {
        self.first_coord_block
    }

    pub fn last_coord_block(&self) -> i32 {
        self.last_coord_block
    }

    /// Absolute file offset of the cursor
    pub fn file_position(&self) -> u64 {
        self.store.file_position()
    }

    /// Read one coordinate pair.
    ///
    /// Compressed pairs are int16 deltas from the page centroid; others are
    /// absolute int32 values.
    pub fn read_int_coord(&mut self, compressed: bool) -> Result<(i32, i32)> {
        if compressed {
            let dx = self.store.read_i16()?;
            let dy = self.store.read_i16()?;
            Ok((
                self.center_x.wrapping_add(dx as i32),
                self.center_y.wrapping_add(dy as i32),
            ))
        } else {
            let x = self.store.read_i32()?;
            let y = self.store.read_i32()?;
            Ok((x, y))
        }
    }

    /// Read an int16 when `compressed`, otherwise an int32.
    ///
    /// Used for sizes and radii whose width follows the object type.
    pub fn read_int_value(&mut self, compressed: bool) -> Result<i32> {
        if compressed {
            Ok(self.store.read_i16()? as i32)
        } else {
            self.store.read_i32()
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.store.read_u8()
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.store.read_i16()
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.store.read_i32()
    }

    pub fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        self.store.read_bytes(dst)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.store.skip(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MitabError;
    use std::io::Cursor;

    fn object_page() -> Cursor<Vec<u8>> {
        let mut data = vec![0u8; 1024];
        let page = &mut data[512..];
        page[0] = 2;
        page[2..4].copy_from_slice(&40i16.to_le_bytes());
        page[4..8].copy_from_slice(&100_000i32.to_le_bytes());
        page[8..12].copy_from_slice(&(-50_000i32).to_le_bytes());
        page[12..16].copy_from_slice(&1536i32.to_le_bytes());
        page[16..20].copy_from_slice(&2048i32.to_le_bytes());
        // compressed pair then the same point absolute
        page[20..22].copy_from_slice(&(-2000i16).to_le_bytes());
        page[22..24].copy_from_slice(&300i16.to_le_bytes());
        page[24..28].copy_from_slice(&98_000i32.to_le_bytes());
        page[28..32].copy_from_slice(&(-49_700i32).to_le_bytes());
        Cursor::new(data)
    }

    #[test]
    fn test_header_fields() {
        let mut src = object_page();
        let mut block = ObjectBlock::new();
        block.goto_byte_in_file(&mut src, 532).unwrap();
        assert_eq!(block.data_bytes(), 40);
        assert_eq!(block.centroid(), (100_000, -50_000));
        assert_eq!(block.first_coord_block(), 1536);
        assert_eq!(block.last_coord_block(), 2048);
        assert_eq!(block.file_position(), 532);
    }

    #[test]
    fn test_compressed_matches_absolute() {
        let mut src = object_page();
        let mut block = ObjectBlock::new();
        block.goto_byte_in_file(&mut src, 532).unwrap();
        let compressed = block.read_int_coord(true).unwrap();
        let absolute = block.read_int_coord(false).unwrap();
        assert_eq!(compressed, (98_000, -49_700));
        assert_eq!(compressed, absolute);
    }

    #[test]
    fn test_wrong_block_type() {
        let mut data = vec![0u8; 1024];
        data[512] = 3;
        let mut block = ObjectBlock::new();
        let err = block.goto_byte_in_file(&mut Cursor::new(data), 520).unwrap_err();
        assert!(matches!(err, MitabError::InvalidFormat(_)));
    }
}
