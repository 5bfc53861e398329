//! Block sizes, header offsets, and magic numbers for the `.MAP` format.

/// Size of every `.MAP` page, header included
pub const MAP_BLOCK_SIZE: usize = 512;

/// Value stored at [`header::MAGIC_COOKIE`] in a valid header block
pub const HEADER_MAGIC_COOKIE: i32 = 42_424_242;

/// Page size used when reading the `.ID` file
pub const ID_FILE_BLOCK_SIZE: usize = 1024;

/// Byte offsets inside the header block (page 0)
pub mod header {
    /// Start of the 256-entry object definition table
    pub const OBJECT_TABLE: usize = 0x000;
    /// Number of entries in the object definition table
    pub const OBJECT_TABLE_LEN: usize = 256;
    /// Magic cookie (int32)
    pub const MAGIC_COOKIE: usize = 0x100;
    /// Version number then block size (int16 each)
    pub const VERSION: usize = 0x104;
    /// Global bounding box, 4 × int32
    pub const BOUNDS: usize = 0x110;
    /// First index / garbage / tool block pointers, then 4 object counts
    pub const BLOCK_POINTERS: usize = 0x130;
    /// Maximum spatial index depth (byte)
    pub const MAX_SPATIAL_INDEX_DEPTH: usize = 0x15f;
    /// Projection ids, scale/displacement, projection and datum parameters
    pub const PROJECTION: usize = 0x16d;

    /// Low 7 bits of a table entry: object body size in bytes
    pub const BODY_SIZE_MASK: u8 = 0x7f;
    /// High bit of a table entry: coordinates live in a coord block
    pub const USES_COORD_BLOCK: u8 = 0x80;
}

/// Coordinate block layout
pub mod coord_block {
    /// Section header size with int16 (compressed) bbox
    pub const SECTION_HEADER_SIZE_COMPRESSED: usize = 16;
    /// Section header size with int32 bbox
    pub const SECTION_HEADER_SIZE: usize = 24;
}

/// Drawing tool block layout
pub mod tool_block {
    pub const TAG_PEN: u8 = 1;
    pub const TAG_BRUSH: u8 = 2;
    pub const TAG_FONT: u8 = 3;
    pub const TAG_SYMBOL: u8 = 4;

    /// Length of the null-padded font name
    pub const FONT_NAME_LEN: usize = 32;
}

/// Spatial index block layout
pub mod index_block {
    /// Index block header length (tag, pad, entry count)
    pub const HEADER_SIZE: usize = 4;
    /// One entry: 4 × int32 bounds + int32 child block pointer
    pub const ENTRY_SIZE: usize = 20;
}

/// Sampling resolution for generated outlines
pub mod arc_sampling {
    /// Points per rounded-rectangle corner
    pub const ROUND_CORNER_POINTS: usize = 45;
    /// Points on a full ellipse outline
    pub const ELLIPSE_POINTS: usize = 180;
    /// Degrees between arc vertices
    pub const ARC_STEP_DEGREES: f64 = 2.0;
}
