//! Plain value types shared by the block decoders and the feature model

pub mod bounds;
pub mod color;
pub mod line_string;
pub mod vector;

pub use bounds::Mbr;
pub use color::RgbColor;
pub use line_string::LineString;
pub use vector::Vector2;
