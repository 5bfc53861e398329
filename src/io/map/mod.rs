//! MapInfo `.MAP` reader.
//!
//! The `.MAP` file is a sequence of fixed-size pages. Page 0 is the header;
//! every other page starts with a block type tag and holds either spatial
//! index entries, object records, coordinate data, drawing tools or garbage
//! (free-list) data.
//!
//! Reading goes through [`MapFile`], which opens the `.MAP` file together
//! with its `.ID` index.

pub mod constants;
pub mod coord_block;
pub mod header_block;
pub mod id_file;
pub mod index_block;
pub mod map_file;
pub mod object_block;
pub mod object_reader;
pub mod object_type;
pub mod raw_block;
pub mod tool_block;

pub use coord_block::{CoordBlock, CoordSectionHeader, CoordSections};
pub use header_block::{HeaderBlock, ProjectionInfo};
pub use id_file::{id_path_for, IdFile};
pub use index_block::{IndexBlock, IndexEntry};
pub use map_file::{Features, MapFile, MapReaderConfiguration};
pub use object_block::ObjectBlock;
pub use object_reader::{DecodedObject, ObjectReader};
pub use object_type::{MapObjectType, ObjectFamily};
pub use raw_block::{BlockType, ChainedBlock, PagedBlockStore};
pub use tool_block::ToolTable;
