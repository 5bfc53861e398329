//! `.ID` object index file.
//!
//! A flat array of int32 `.MAP` offsets, one per feature id starting at 1.
//! An offset of 0 marks a feature without geometry.

use super::constants::ID_FILE_BLOCK_SIZE;
use super::raw_block::PagedBlockStore;
use crate::error::{MitabError, Result};

use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Name of the `.ID` file paired with a `.MAP` file.
///
/// `.MAP` becomes `.ID` and `.map` becomes `.id`; any other name gets an
/// `ID` extension in the case of its existing extension.
pub fn id_path_for(map_path: &Path) -> PathBuf {
    let ext = map_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    let lower = !ext.is_empty() && ext.chars().all(|c| !c.is_ascii_uppercase());
    map_path.with_extension(if lower { "id" } else { "ID" })
}

/// Reader over an `.ID` file.
#[derive(Debug)]
pub struct IdFile<R: Read + Seek> {
    source: R,
    store: PagedBlockStore,
    max_id: i32,
}

impl<R: Read + Seek> IdFile<R> {
    /// Wrap a reader; the id count comes from its length.
    pub fn from_reader(mut source: R) -> Result<Self> {
        let len = source.seek(SeekFrom::End(0))?;
        let max_id = i32::try_from(len / 4).map_err(|_| {
            MitabError::InvalidFormat(format!(".ID file too large ({len} bytes)"))
        })?;

        let block_size = ID_FILE_BLOCK_SIZE.min(max_id as usize * 4);
        let mut store = PagedBlockStore::new(block_size.max(4), false);
        if max_id > 0 {
            store.read_from_file(&mut source, 0, block_size)?;
        }

        tracing::debug!(max_id, "opened .ID file");
        Ok(Self {
            source,
            store,
            max_id,
        })
    }

    /// Highest valid feature id
    pub fn max_id(&self) -> i32 {
        self.max_id
    }

    /// `.MAP` offset of a feature's object record; 0 when it has no geometry.
    pub fn object_ptr(&mut self, id: i32) -> Result<i32> {
        if id < 1 || id > self.max_id {
            return Err(MitabError::OutOfRange(format!(
                "invalid object id {id} (valid range is [1..{}])",
                self.max_id
            )));
        }
        let offset = (id as u64 - 1) * 4;
        self.store.goto_byte_in_file(&mut self.source, offset)?;
        self.store.read_i32()
    }
}
