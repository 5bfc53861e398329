//! Fixed-size page reader shared by every `.MAP` and `.ID` block type.
//!
//! A [`PagedBlockStore`] buffers exactly one page of the underlying file and
//! keeps a byte cursor inside it. Seeking to a file offset outside the
//! buffered page transparently loads the page that contains it. The store
//! knows nothing about MapInfo structures; typed blocks wrap it and parse
//! their own headers whenever a new page comes in.

use crate::error::{MitabError, Result};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use std::collections::HashSet;
use std::io::{self, Read, Seek, SeekFrom};

/// Page kind, taken from the first byte of every non-header page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    Header = 0,
    Index = 1,
    Object = 2,
    Coord = 3,
    Garbage = 4,
    Tool = 5,
}

impl BlockType {
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Self::Header),
            1 => Ok(Self::Index),
            2 => Ok(Self::Object),
            3 => Ok(Self::Coord),
            4 => Ok(Self::Garbage),
            5 => Ok(Self::Tool),
            _ => Err(MitabError::InvalidFormat(format!(
                "invalid block type tag {tag}"
            ))),
        }
    }
}

/// Single-page cache with a read cursor.
#[derive(Debug, Clone)]
pub struct PagedBlockStore {
    buf: Vec<u8>,
    block_size: usize,
    /// Number of valid bytes in `buf`
    size_used: usize,
    /// Short reads fail unless this is cleared (last page of an `.ID` file)
    hard_block_size: bool,
    /// File offset of `buf[0]`
    file_offset: u64,
    cur_pos: usize,
    /// Offset of the first page, for files whose first page differs in size
    first_block_ptr: u64,
    loaded: bool,
}

impl PagedBlockStore {
    /// Create an empty store; nothing is read until the first seek.
    pub fn new(block_size: usize, hard_block_size: bool) -> Self {
        Self {
            buf: vec![0u8; block_size],
            block_size,
            size_used: 0,
            hard_block_size,
            file_offset: 0,
            cur_pos: 0,
            first_block_ptr: 0,
            loaded: false,
        }
    }

    pub fn with_first_block_ptr(mut self, first_block_ptr: u64) -> Self {
        self.first_block_ptr = first_block_ptr;
        self
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn size_used(&self) -> usize {
        self.size_used
    }

    /// File offset of the buffered page
    pub fn page_offset(&self) -> u64 {
        self.file_offset
    }

    /// Cursor position inside the buffered page
    pub fn cursor(&self) -> usize {
        self.cur_pos
    }

    /// Absolute file offset of the cursor
    pub fn file_position(&self) -> u64 {
        self.file_offset + self.cur_pos as u64
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Forget the buffered page so the next seek reloads it
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    /// Raw bytes of the buffered page
    pub fn data(&self) -> &[u8] {
        &self.buf[..self.size_used]
    }

    /// Load `size` bytes at `offset` into the page buffer and reset the cursor.
    ///
    /// Zero bytes read is always an error. A partial read is an error only
    /// for hard-sized pages; otherwise the page is truncated to what was read.
    pub fn read_from_file<R: Read + Seek>(
        &mut self,
        source: &mut R,
        offset: u64,
        size: usize,
    ) -> Result<()> {
        if size == 0 {
            return Err(MitabError::IllegalArgument(
                "cannot read a zero-sized block".into(),
            ));
        }

        source.seek(SeekFrom::Start(offset))?;
        self.buf.clear();
        self.buf.resize(size, 0);

        let mut got = 0;
        while got < size {
            match source.read(&mut self.buf[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.loaded = false;
                    return Err(e.into());
                }
            }
        }

        if got == 0 || (self.hard_block_size && got != size) {
            self.loaded = false;
            return Err(MitabError::short_read(size, got, offset));
        }

        tracing::trace!(offset, size, got, "loaded page");

        self.block_size = size;
        self.size_used = got;
        self.file_offset = offset;
        self.cur_pos = 0;
        self.loaded = true;
        Ok(())
    }

    /// Move the cursor to an absolute file offset, loading the page that
    /// contains it when it is not the buffered one.
    ///
    /// Returns `true` when a new page was loaded.
    pub fn goto_byte_in_file<R: Read + Seek>(&mut self, source: &mut R, offset: u64) -> Result<bool> {
        if offset < self.first_block_ptr {
            return Err(MitabError::OutOfRange(format!(
                "offset {offset} is before the first block at {}",
                self.first_block_ptr
            )));
        }

        let mut reloaded = false;
        if !self.contains(offset) {
            let bs = self.block_size as u64;
            let page_start = ((offset - self.first_block_ptr) / bs) * bs + self.first_block_ptr;
            self.read_from_file(source, page_start, self.block_size)?;
            reloaded = true;
        }

        self.goto_byte_in_block((offset - self.file_offset) as i64)?;
        Ok(reloaded)
    }

    /// True when `offset` lies inside the valid bytes of the buffered page
    pub fn contains(&self, offset: u64) -> bool {
        self.loaded
            && offset >= self.file_offset
            && offset < self.file_offset + self.size_used as u64
    }

    /// Move the cursor within the buffered page.
    pub fn goto_byte_in_block(&mut self, offset: i64) -> Result<()> {
        if offset < 0 || offset as usize > self.size_used {
            return Err(MitabError::OutOfRange(format!(
                "block offset {offset} outside [0, {}]",
                self.size_used
            )));
        }
        self.cur_pos = offset as usize;
        Ok(())
    }

    /// Move the cursor relative to its current position.
    pub fn goto_byte_rel(&mut self, delta: i64) -> Result<()> {
        self.goto_byte_in_block(self.cur_pos as i64 + delta)
    }

    /// Bytes left between the cursor and the end of valid data
    pub fn remaining(&self) -> usize {
        self.size_used.saturating_sub(self.cur_pos)
    }

    fn take(&mut self, n: usize) -> Result<&[u8]> {
        if !self.loaded {
            return Err(MitabError::OutOfRange("block has not been loaded".into()));
        }
        if self.cur_pos + n > self.size_used {
            return Err(MitabError::OutOfRange(format!(
                "read of {n} bytes at {} past end of block data ({})",
                self.cur_pos, self.size_used
            )));
        }
        let start = self.cur_pos;
        self.cur_pos += n;
        Ok(&self.buf[start..start + n])
    }

    /// Copy `dst.len()` bytes from the cursor.
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        let src = self.take(dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Advance the cursor by `n` bytes without copying.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let mut b = self.take(2)?;
        Ok(b.read_i16::<LittleEndian>()?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let mut b = self.take(4)?;
        Ok(b.read_i32::<LittleEndian>()?)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let mut b = self.take(4)?;
        Ok(b.read_f32::<LittleEndian>()?)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let mut b = self.take(8)?;
        Ok(b.read_f64::<LittleEndian>()?)
    }

    fn peek(&self, pos: usize, n: usize) -> Result<&[u8]> {
        if !self.loaded || pos + n > self.size_used {
            return Err(MitabError::OutOfRange(format!(
                "peek of {n} bytes at {pos} past end of block data ({})",
                self.size_used
            )));
        }
        Ok(&self.buf[pos..pos + n])
    }

    /// Read a byte at `pos` without moving the cursor
    pub fn peek_u8(&self, pos: usize) -> Result<u8> {
        Ok(self.peek(pos, 1)?[0])
    }

    /// Read an int16 at `pos` without moving the cursor
    pub fn peek_i16(&self, pos: usize) -> Result<i16> {
        let mut b = self.peek(pos, 2)?;
        Ok(b.read_i16::<LittleEndian>()?)
    }

    /// Read an int32 at `pos` without moving the cursor
    pub fn peek_i32(&self, pos: usize) -> Result<i32> {
        let mut b = self.peek(pos, 4)?;
        Ok(b.read_i32::<LittleEndian>()?)
    }

    /// Block type tag of the buffered page (byte 0)
    pub fn block_type(&self) -> Result<BlockType> {
        if self.file_offset == 0 {
            return Ok(BlockType::Header);
        }
        BlockType::from_tag(self.peek_u8(0)?)
    }

    /// Fail with `InvalidFormat` unless the buffered page has the given tag
    pub fn expect_block_type(&self, expected: BlockType) -> Result<()> {
        let found = self.block_type()?;
        if found != expected {
            return Err(MitabError::InvalidFormat(format!(
                "block at offset {} is {:?}, expected {:?}",
                self.file_offset, found, expected
            )));
        }
        Ok(())
    }
}

/// Page cursor over a chain of blocks that share the 8-byte
/// `tag, pad, data_bytes: i16, next_block: i32` header (coord and tool pages).
///
/// Reads that run past the declared data of one page continue at the start
/// of the data of the next page in the chain.
#[derive(Debug, Clone)]
pub struct ChainedBlock {
    store: PagedBlockStore,
    block_type: BlockType,
    data_bytes: i16,
    next_block: i32,
    /// Pages entered since the last explicit seek
    visited: HashSet<u64>,
}

impl ChainedBlock {
    /// Size of the shared page header
    pub const HEADER_SIZE: usize = 8;

    pub fn new(block_type: BlockType, block_size: usize) -> Self {
        Self {
            store: PagedBlockStore::new(block_size, true),
            block_type,
            data_bytes: 0,
            next_block: 0,
            visited: HashSet::new(),
        }
    }

    /// Move to a file offset, validating the page header when a new page
    /// comes in. Starts a new walk of the chain.
    pub fn goto_byte_in_file<R: Read + Seek>(&mut self, source: &mut R, offset: u64) -> Result<()> {
        self.enter_page(source, offset)?;
        self.visited.clear();
        self.visited.insert(self.store.page_offset());
        Ok(())
    }

    fn enter_page<R: Read + Seek>(&mut self, source: &mut R, offset: u64) -> Result<()> {
        if self.store.goto_byte_in_file(source, offset)? {
            if let Err(e) = self.init_from_page() {
                self.store.invalidate();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Move to the first data byte of the page at `offset`.
    pub fn goto_block_data<R: Read + Seek>(&mut self, source: &mut R, offset: u64) -> Result<()> {
        self.goto_byte_in_file(source, offset)?;
        self.store.goto_byte_in_block(Self::HEADER_SIZE as i64)
    }

    fn init_from_page(&mut self) -> Result<()> {
        self.store.expect_block_type(self.block_type)?;
        self.data_bytes = self.store.peek_i16(2)?;
        self.next_block = self.store.peek_i32(4)?;
        tracing::trace!(
            block_type = ?self.block_type,
            offset = self.store.page_offset(),
            data_bytes = self.data_bytes,
            next_block = self.next_block,
            "chained block header"
        );
        Ok(())
    }

    pub fn data_bytes(&self) -> i16 {
        self.data_bytes
    }

    pub fn next_block(&self) -> i32 {
        self.next_block
    }

    pub fn file_position(&self) -> u64 {
        self.store.file_position()
    }

    /// End of the declared data in the buffered page
    fn data_end(&self) -> usize {
        let declared = Self::HEADER_SIZE + self.data_bytes.max(0) as usize;
        declared.min(self.store.size_used())
    }

    /// True when the current page is exhausted and no page follows it
    pub fn at_end_of_chain(&self) -> bool {
        !self.store.is_loaded() || (self.store.cursor() >= self.data_end() && self.next_block <= 0)
    }

    /// Copy `dst.len()` bytes, following the next-block chain as needed.
    pub fn read_bytes<R: Read + Seek>(&mut self, source: &mut R, dst: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < dst.len() {
            let end = self.data_end();
            let cursor = self.store.cursor();
            if cursor >= end {
                self.goto_next_block(source)?;
                continue;
            }
            let n = (end - cursor).min(dst.len() - filled);
            self.store.read_bytes(&mut dst[filled..filled + n])?;
            filled += n;
        }
        Ok(())
    }

    fn goto_next_block<R: Read + Seek>(&mut self, source: &mut R) -> Result<()> {
        if self.next_block <= 0 {
            return Err(MitabError::OutOfRange(format!(
                "read past end of {:?} block chain at offset {}",
                self.block_type,
                self.store.file_position()
            )));
        }
        let next = file_offset(self.next_block)?;
        let from = self.store.page_offset();
        tracing::trace!(from, to = next, "following block chain");
        self.enter_page(source, next)?;

        if !self.visited.insert(self.store.page_offset()) {
            return Err(MitabError::InvalidFormat(format!(
                "{:?} block at {from} chains back to already read block {next}",
                self.block_type
            )));
        }
        self.store.goto_byte_in_block(Self::HEADER_SIZE as i64)?;

        if self.data_end() <= Self::HEADER_SIZE {
            return Err(MitabError::InvalidFormat(format!(
                "empty {:?} block at {next} in chain",
                self.block_type
            )));
        }
        Ok(())
    }

    pub fn read_u8<R: Read + Seek>(&mut self, source: &mut R) -> Result<u8> {
        let mut b = [0u8; 1];
        self.read_bytes(source, &mut b)?;
        Ok(b[0])
    }

    pub fn read_i16<R: Read + Seek>(&mut self, source: &mut R) -> Result<i16> {
        let mut b = [0u8; 2];
        self.read_bytes(source, &mut b)?;
        Ok(LittleEndian::read_i16(&b))
    }

    pub fn read_i32<R: Read + Seek>(&mut self, source: &mut R) -> Result<i32> {
        let mut b = [0u8; 4];
        self.read_bytes(source, &mut b)?;
        Ok(LittleEndian::read_i32(&b))
    }
}

/// Convert a pointer stored in the file to an unsigned offset.
pub(crate) fn file_offset(ptr: i32) -> Result<u64> {
    u64::try_from(ptr).map_err(|_| {
        MitabError::OutOfRange(format!("negative file offset {ptr}"))
    })
}
