//! Spatial index blocks.
//!
//! Each index page lists child blocks together with the integer bounding
//! box of everything below them. Only reading single pages is supported;
//! walking the tree is up to the caller.

use super::constants::{index_block, MAP_BLOCK_SIZE};
use super::raw_block::{BlockType, PagedBlockStore};
use crate::error::{MitabError, Result};

use std::io::{Read, Seek};

/// One index entry: child bounds in integer coordinates plus its offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexEntry {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
    pub block_ptr: i32,
}

impl IndexEntry {
    /// True when the entry bounds touch the integer window
    pub fn intersects(&self, x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> bool {
        self.x_min <= x_max && x_min <= self.x_max && self.y_min <= y_max && y_min <= self.y_max
    }
}

/// A loaded index page with a cursor over its entries.
#[derive(Debug, Clone)]
pub struct IndexBlock {
    store: PagedBlockStore,
    num_entries: i16,
    next_entry: usize,
}

impl IndexBlock {
    /// Load and validate the index page at `offset`.
    pub fn read<R: Read + Seek>(source: &mut R, offset: u64) -> Result<Self> {
        let mut store = PagedBlockStore::new(MAP_BLOCK_SIZE, true);
        store.read_from_file(source, offset, MAP_BLOCK_SIZE)?;
        store.expect_block_type(BlockType::Index)?;
        let num_entries = store.peek_i16(2)?;

        let capacity = (MAP_BLOCK_SIZE - index_block::HEADER_SIZE) / index_block::ENTRY_SIZE;
        if num_entries < 0 || num_entries as usize > capacity {
            return Err(MitabError::InvalidFormat(format!(
                "index block at {offset} declares {num_entries} entries"
            )));
        }

        Ok(Self {
            store,
            num_entries,
            next_entry: 0,
        })
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries as usize
    }

    pub fn page_offset(&self) -> u64 {
        self.store.page_offset()
    }

    /// Next entry in page order, `None` after the last one.
    pub fn read_next_entry(&mut self) -> Result<Option<IndexEntry>> {
        if self.next_entry >= self.num_entries() {
            return Ok(None);
        }
        let pos = index_block::HEADER_SIZE + self.next_entry * index_block::ENTRY_SIZE;
        self.store.goto_byte_in_block(pos as i64)?;
        let entry = IndexEntry {
            x_min: self.store.read_i32()?,
            y_min: self.store.read_i32()?,
            x_max: self.store.read_i32()?,
            y_max: self.store.read_i32()?,
            block_ptr: self.store.read_i32()?,
        };
        self.next_entry += 1;
        Ok(Some(entry))
    }

    /// All entries of the page.
    pub fn entries(&mut self) -> Result<Vec<IndexEntry>> {
        self.next_entry = 0;
        let mut entries = Vec::with_capacity(self.num_entries());
        while let Some(entry) = self.read_next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}
