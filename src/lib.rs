//! # mitab
//!
//! A pure Rust reader for the geometry half of MapInfo TAB datasets: the
//! binary `.MAP` file and its `.ID` object index.
//!
//! ## Features
//!
//! - Paged block engine over the 512-byte `.MAP` pages
//! - Header decoding with the integer to coordinate system transform
//! - Points, lines, polylines, multi-polylines, regions, rectangles,
//!   rounded rectangles, ellipses, arcs and text
//! - Compressed and absolute coordinate encodings
//! - Pen, brush, font and symbol tools resolved into each feature's style
//! - Spatial index page access and a coordinate filter for scans
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mitab::MapFile;
//!
//! let mut map = MapFile::from_file("parcels.MAP")?;
//! println!("{} features", map.max_object_id());
//!
//! for feature in map.features() {
//!     match feature {
//!         Ok(feature) => println!("{feature}"),
//!         Err(e) => eprintln!("skipped: {e}"),
//!     }
//! }
//! # Ok::<(), mitab::MitabError>(())
//! ```
//!
//! ## Architecture
//!
//! - `types` - plain values: `Vector2`, `Mbr`, `RgbColor`, `LineString`
//! - `entities` - the decoded feature model (`Feature`, `Geometry`, styles)
//! - `io::map` - page blocks, geometry decoders and the `MapFile` catalog
//!
//! A `MapFile` reuses one object block cursor and one coordinate block
//! cursor for every feature it decodes, so it is used from one thread at a
//! time. Open the file once per thread to read in parallel.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use error::{MitabError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{LineString, Mbr, RgbColor, Vector2};

// Re-export entity types
pub use entities::{
    Arc, Ellipse, Entity, Feature, FeatureStyle, Geometry, Point, PointKind, Polyline, Rectangle,
    Region, Text,
};

// Re-export the reader
pub use io::map::{MapFile, MapObjectType, MapReaderConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
