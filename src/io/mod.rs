//! File readers

pub mod map;

pub use map::{MapFile, MapReaderConfiguration};
