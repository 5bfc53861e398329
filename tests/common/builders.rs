//! Synthetic `.MAP` / `.ID` image builders.
//!
//! `MapImage` lays out 512-byte pages the way MapInfo writes them: page 0
//! is the header, object records go in object pages, vertex data and
//! strings in chained coordinate pages, and drawing tools in chained tool
//! pages. The matching `.ID` file is produced alongside.

#![allow(dead_code)]

use std::collections::HashMap;

pub const PAGE: usize = 512;
const CHAINED_HEADER: usize = 8;
const OBJECT_HEADER: usize = 20;

/// Little-endian byte writer for object records and block payloads.
#[derive(Debug, Clone, Default)]
pub struct Record(pub Vec<u8>);

impl Record {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn i16(mut self, v: i16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn bytes(mut self, v: &[u8]) -> Self {
        self.0.extend_from_slice(v);
        self
    }

    /// Absolute coordinate pair
    pub fn coord(self, x: i32, y: i32) -> Self {
        self.i32(x).i32(y)
    }

    /// Compressed coordinate pair (deltas)
    pub fn ccoord(self, dx: i16, dy: i16) -> Self {
        self.i16(dx).i16(dy)
    }

    pub fn rgb(self, rgb: u32) -> Self {
        self.u8((rgb >> 16) as u8).u8((rgb >> 8) as u8).u8(rgb as u8)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Uncompressed section header for multi-part objects.
pub fn section_header(
    num_vertices: i16,
    num_holes: i16,
    bbox: (i32, i32, i32, i32),
    data_offset: i32,
) -> Record {
    Record::new()
        .i16(num_vertices)
        .i16(num_holes)
        .coord(bbox.0, bbox.1)
        .coord(bbox.2, bbox.3)
        .i32(data_offset)
}

/// Section headers for vertex counts, with consistent uncompressed data
/// offsets and an empty bbox.
pub fn section_headers(counts: &[i16]) -> Record {
    let mut rec = Record::new();
    let mut running = 0i32;
    for &n in counts {
        let offset = 24 * counts.len() as i32 + running * 8;
        rec = rec.bytes(&section_header(n, 0, (0, 0, 0, 0), offset).0);
        running += n as i32;
    }
    rec
}

/// Pen tool record
pub fn pen_record(width: u8, pattern: u8, rgb: u32) -> Record {
    Record::new().u8(1).i32(1).u8(width).u8(pattern).u8(0).rgb(rgb)
}

/// Brush tool record
pub fn brush_record(pattern: u8, transparent: bool, fg: u32, bg: u32) -> Record {
    Record::new()
        .u8(2)
        .i32(1)
        .u8(pattern)
        .u8(transparent as u8)
        .rgb(fg)
        .rgb(bg)
}

/// Font tool record
pub fn font_record(name: &str) -> Record {
    let mut padded = [0u8; 32];
    padded[..name.len()].copy_from_slice(name.as_bytes());
    Record::new().u8(3).i32(1).bytes(&padded)
}

/// Symbol tool record
pub fn symbol_record(symbol_no: i16, size: i16, rgb: u32) -> Record {
    Record::new().u8(4).i32(1).i16(symbol_no).i16(size).u8(0).rgb(rgb)
}

/// In-memory `.MAP` image plus its `.ID` table.
#[derive(Debug, Clone)]
pub struct MapImage {
    data: Vec<u8>,
    ids: Vec<i32>,
    /// Write cursor of each object page, keyed by page offset
    object_cursors: HashMap<usize, usize>,
}

impl MapImage {
    /// Header page with the given transform; bounds default to ±1e6.
    pub fn new(x_scale: f64, y_scale: f64, x_displ: f64, y_displ: f64) -> Self {
        let mut image = Self {
            data: vec![0u8; PAGE],
            ids: Vec::new(),
            object_cursors: HashMap::new(),
        };
        image.put_i32(0x100, 42_424_242);
        image.put_i16(0x104, 300);
        image.put_i16(0x106, PAGE as i16);
        image.set_bounds(-1_000_000, -1_000_000, 1_000_000, 1_000_000);
        image.data[0x15f] = 1;
        image.data[0x16d] = 1;
        image.data[0x16e] = 33;
        image.data[0x16f] = 7;
        image.put_f64(0x170, x_scale);
        image.put_f64(0x178, y_scale);
        image.put_f64(0x180, x_displ);
        image.put_f64(0x188, y_displ);
        image
    }

    fn put_i16(&mut self, at: usize, v: i16) {
        self.data[at..at + 2].copy_from_slice(&v.to_le_bytes());
    }

    fn put_i32(&mut self, at: usize, v: i32) {
        self.data[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }

    fn put_f64(&mut self, at: usize, v: f64) {
        self.data[at..at + 8].copy_from_slice(&v.to_le_bytes());
    }

    /// Overwrite a raw byte anywhere in the image.
    pub fn poke(&mut self, at: usize, v: u8) {
        self.data[at] = v;
    }

    pub fn set_bounds(&mut self, x_min: i32, y_min: i32, x_max: i32, y_max: i32) {
        for (i, v) in [x_min, y_min, x_max, y_max].into_iter().enumerate() {
            self.put_i32(0x110 + 4 * i, v);
        }
    }

    pub fn set_first_index_block(&mut self, ptr: i32) {
        self.put_i32(0x130, ptr);
    }

    pub fn set_first_tool_block(&mut self, ptr: i32) {
        self.put_i32(0x138, ptr);
    }

    /// Object table entry for an object type
    pub fn set_object_def(&mut self, object_type: u8, body_size: u8, uses_coord_block: bool) {
        self.data[object_type as usize] = body_size | if uses_coord_block { 0x80 } else { 0 };
    }

    /// Append a zeroed page, returning its offset.
    pub fn alloc_page(&mut self) -> usize {
        let offset = self.data.len();
        self.data.resize(offset + PAGE, 0);
        offset
    }

    /// New object page with the given compressed-coordinate centroid.
    pub fn object_page(&mut self, centroid: (i32, i32)) -> usize {
        let page = self.alloc_page();
        self.data[page] = 2;
        self.put_i32(page + 4, centroid.0);
        self.put_i32(page + 8, centroid.1);
        self.object_cursors.insert(page, OBJECT_HEADER);
        page
    }

    /// Append an object record to `page` and register it under `id`.
    /// Returns the record's file offset.
    pub fn push_object(&mut self, page: usize, id: i32, object_type: u8, body: Record) -> i32 {
        let cursor = self.object_cursors[&page];
        let record = Record::new().u8(object_type).i32(id).bytes(&body.0);
        assert!(cursor + record.len() <= PAGE, "object page overflow");

        let at = page + cursor;
        self.data[at..at + record.len()].copy_from_slice(&record.0);
        self.object_cursors.insert(page, cursor + record.len());
        self.put_i16(page + 2, (cursor + record.len() - OBJECT_HEADER) as i16);

        let ptr = at as i32;
        self.set_id_ptr(id, ptr);
        ptr
    }

    /// Point `id` at an arbitrary offset in the `.ID` table.
    pub fn set_id_ptr(&mut self, id: i32, ptr: i32) {
        let index = (id - 1) as usize;
        if self.ids.len() <= index {
            self.ids.resize(index + 1, 0);
        }
        self.ids[index] = ptr;
    }

    fn chain(&mut self, tag: u8, payload: &[u8]) -> usize {
        let capacity = PAGE - CHAINED_HEADER;
        let chunks: Vec<&[u8]> = if payload.is_empty() {
            vec![&[][..]]
        } else {
            payload.chunks(capacity).collect()
        };
        let pages: Vec<usize> = chunks.iter().map(|_| self.alloc_page()).collect();

        for (i, (chunk, &page)) in chunks.iter().zip(&pages).enumerate() {
            let next = pages.get(i + 1).map_or(0, |&p| p as i32);
            self.data[page] = tag;
            self.put_i16(page + 2, chunk.len() as i16);
            self.put_i32(page + 4, next);
            self.data[page + CHAINED_HEADER..page + CHAINED_HEADER + chunk.len()]
                .copy_from_slice(chunk);
        }
        pages[0]
    }

    /// Coordinate block chain holding `payload`; returns the first page
    /// offset (a page boundary, so reads start after the page header).
    pub fn coord_chain(&mut self, payload: &[u8]) -> i32 {
        self.chain(3, payload) as i32
    }

    /// Point the chained page at `page` to `next`.
    pub fn set_next_block(&mut self, page: i32, next: i32) {
        self.put_i32(page as usize + 4, next);
    }

    /// Tool block chain holding `payload`; also sets the header pointer.
    pub fn tool_chain(&mut self, payload: &[u8]) -> i32 {
        let ptr = self.chain(5, payload) as i32;
        self.set_first_tool_block(ptr);
        ptr
    }

    /// Index page with `(x_min, y_min, x_max, y_max, child)` entries.
    pub fn index_page(&mut self, entries: &[[i32; 5]]) -> i32 {
        let page = self.alloc_page();
        self.data[page] = 1;
        self.put_i16(page + 2, entries.len() as i16);
        let mut at = page + 4;
        for entry in entries {
            for &v in entry {
                self.put_i32(at, v);
                at += 4;
            }
        }
        page as i32
    }

    pub fn map_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn id_bytes(&self) -> Vec<u8> {
        self.ids.iter().flat_map(|p| p.to_le_bytes()).collect()
    }
}
