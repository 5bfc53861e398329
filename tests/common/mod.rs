//! Shared test utilities for mitab integration tests.
//!
//! Builds synthetic `.MAP` / `.ID` images in memory so every test crate can
//! drive [`MapFile`] end to end without fixture files.

#![allow(dead_code)]

pub mod builders;

use mitab::io::map::MapFile;
use mitab::{Feature, Geometry, MapReaderConfiguration};
use std::io::Cursor;

pub use builders::{MapImage, Record};

/// Scale used by most scenarios: 1000 integer units per coordinate unit.
pub const SCALE: f64 = 1000.0;

/// Image with `SCALE` on both axes and no displacement.
pub fn default_image() -> MapImage {
    MapImage::new(SCALE, SCALE, 0.0, 0.0)
}

/// Open an image with the default configuration.
pub fn open(image: &MapImage) -> MapFile<Cursor<Vec<u8>>> {
    MapFile::from_reader(Cursor::new(image.map_bytes()), Cursor::new(image.id_bytes()))
        .expect("synthetic image should open")
        .with_path("synthetic.MAP")
}

/// Open an image with a custom configuration.
pub fn open_with(image: &MapImage, config: MapReaderConfiguration) -> MapFile<Cursor<Vec<u8>>> {
    open(image).with_config(config)
}

/// Decode a single feature, panicking on error.
pub fn read(image: &MapImage, id: i32) -> Feature {
    open(image)
        .read_feature(id)
        .unwrap_or_else(|e| panic!("feature {id} failed: {e}"))
}

/// Assert two floats are within `eps`.
pub fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() <= eps,
        "expected {expected}, got {actual}"
    );
}

/// Short geometry name used in assertion messages.
pub fn kind(geometry: &Geometry) -> &'static str {
    geometry.kind()
}
