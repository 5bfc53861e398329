//! `.MAP` / `.ID` file pair reader.
//!
//! [`MapFile`] is the entry point of the crate: it maps feature ids to
//! object records through the `.ID` file, positions the object block cursor
//! on the record and hands it to the geometry decoders.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mitab::io::map::MapFile;
//!
//! let mut map = MapFile::from_file("roads.MAP")?;
//! for feature in map.features() {
//!     let feature = feature?;
//!     println!("{feature}");
//! }
//! ```
//!
//! # Cursors
//!
//! A `MapFile` owns exactly one object block cursor and one coordinate block
//! cursor, repositioned for every feature. Decoding therefore takes
//! `&mut self`; reading features of the same file from several threads
//! needs one `MapFile` per thread.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use super::coord_block::CoordBlock;
use super::header_block::{HeaderBlock, ProjectionInfo};
use super::id_file::{id_path_for, IdFile};
use super::index_block::IndexBlock;
use super::object_block::ObjectBlock;
use super::object_reader::{DecodedObject, ObjectReader};
use super::object_type::MapObjectType;
use super::raw_block::file_offset;
use super::tool_block::ToolTable;
use crate::entities::{Feature, FeatureStyle, ToolRefs};
use crate::error::{MitabError, Result};
use crate::notification::{Notification, NotificationCollection, NotificationType};
use crate::types::{Mbr, Vector2};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Options of a [`MapFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapReaderConfiguration {
    /// Fail with `InvalidFormat` when the id stored in an object record
    /// differs from the requested feature id.
    ///
    /// Default: `true`.
    pub check_object_ids: bool,

    /// Resolve the tool indexes of each object into a [`FeatureStyle`].
    ///
    /// Default: `true`.
    pub load_styles: bool,

    /// Yield features without geometry from [`MapFile::features`].
    ///
    /// Default: `true`.
    pub keep_null_geometries: bool,
}

impl Default for MapReaderConfiguration {
    fn default() -> Self {
        Self {
            check_object_ids: true,
            load_styles: true,
            keep_null_geometries: true,
        }
    }
}

// ---------------------------------------------------------------------------
// MapFile
// ---------------------------------------------------------------------------

/// Integer-space filter window, normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IntWindow {
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
}

impl IntWindow {
    fn new(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x_min: a.0.min(b.0),
            y_min: a.1.min(b.1),
            x_max: a.0.max(b.0),
            y_max: a.1.max(b.1),
        }
    }
}

/// Reader over a `.MAP` file and its `.ID` index.
pub struct MapFile<R: Read + Seek> {
    source: R,
    id_file: IdFile<R>,
    /// Name used in error context
    path: PathBuf,

    header: HeaderBlock,
    object_block: ObjectBlock,
    coord_block: CoordBlock,

    /// Loaded on first style lookup, kept for the life of the file
    tools: Option<ToolTable>,
    tool_load_failed: bool,

    config: MapReaderConfiguration,
    notifications: NotificationCollection,

    filter: Mbr,
    int_filter: IntWindow,

    cur_object_id: i32,
    cur_object_type: Option<MapObjectType>,
}

impl MapFile<BufReader<File>> {
    /// Open a `.MAP` file and the `.ID` file next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let id_path = id_path_for(path);
        let map = BufReader::new(File::open(path)?);
        let id = BufReader::new(File::open(&id_path)?);
        tracing::debug!(map = %path.display(), id = %id_path.display(), "opening file pair");
        Self::from_reader(map, id).map(|file| file.with_path(path))
    }
}

impl<R: Read + Seek> MapFile<R> {
    /// Open from two seekable streams: the `.MAP` data and its `.ID` index.
    pub fn from_reader(mut map: R, id: R) -> Result<Self> {
        let header = HeaderBlock::read(&mut map)?;
        let id_file = IdFile::from_reader(id)?;

        let filter = Mbr::from_corners(
            header.int_to_coordsys(header.x_min, header.y_min),
            header.int_to_coordsys(header.x_max, header.y_max),
        );
        let int_filter = IntWindow::new((header.x_min, header.y_min), (header.x_max, header.y_max));

        tracing::debug!(
            version = header.version,
            max_id = id_file.max_id(),
            objects = header.total_objects(),
            "opened .MAP file"
        );

        Ok(Self {
            source: map,
            id_file,
            path: PathBuf::from("<stream>"),
            header,
            object_block: ObjectBlock::new(),
            coord_block: CoordBlock::new(),
            tools: None,
            tool_load_failed: false,
            config: MapReaderConfiguration::default(),
            notifications: NotificationCollection::new(),
            filter,
            int_filter,
            cur_object_id: 0,
            cur_object_type: None,
        })
    }

    /// Set the reader configuration.
    pub fn with_config(mut self, config: MapReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Set the file name reported in feature errors.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn config(&self) -> &MapReaderConfiguration {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &HeaderBlock {
        &self.header
    }

    pub fn projection(&self) -> &ProjectionInfo {
        &self.header.projection
    }

    /// Global bounds from the header, in coordinate system units.
    pub fn bounds(&self) -> Mbr {
        Mbr::from_corners(
            self.header.int_to_coordsys(self.header.x_min, self.header.y_min),
            self.header.int_to_coordsys(self.header.x_max, self.header.y_max),
        )
    }

    /// Highest feature id in the `.ID` file
    pub fn max_object_id(&self) -> i32 {
        self.id_file.max_id()
    }

    /// Diagnostics gathered so far
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    pub fn cur_object_id(&self) -> i32 {
        self.cur_object_id
    }

    pub fn cur_object_type(&self) -> Option<MapObjectType> {
        self.cur_object_type
    }

    // -----------------------------------------------------------------------
    // Coordinate filter
    // -----------------------------------------------------------------------

    /// Restrict [`features`](Self::features) to objects whose MBR touches
    /// the window. The corners may be given in any order.
    pub fn set_coord_filter(&mut self, min: Vector2, max: Vector2) {
        self.filter = Mbr::from_corners(min, max);
        self.int_filter = IntWindow::new(
            self.header.coordsys_to_int(min.x, min.y),
            self.header.coordsys_to_int(max.x, max.y),
        );
    }

    /// Reset the filter to the header bounds.
    pub fn reset_coord_filter(&mut self) {
        self.filter = self.bounds();
        self.int_filter = IntWindow::new(
            (self.header.x_min, self.header.y_min),
            (self.header.x_max, self.header.y_max),
        );
    }

    pub fn coord_filter(&self) -> Mbr {
        self.filter
    }

    /// Filter window in integer space as `(x_min, y_min, x_max, y_max)`.
    pub fn int_coord_filter(&self) -> (i32, i32, i32, i32) {
        let w = self.int_filter;
        (w.x_min, w.y_min, w.x_max, w.y_max)
    }

    // -----------------------------------------------------------------------
    // Object access
    // -----------------------------------------------------------------------

    /// Next feature id after `prev`; pass 0 (or any negative id) to start.
    pub fn next_feature_id(&self, prev: i32) -> Option<i32> {
        let next = prev.max(0).checked_add(1)?;
        (next <= self.max_object_id()).then_some(next)
    }

    /// Position the object block cursor on a feature's record and return
    /// its object type. Features without geometry give
    /// [`MapObjectType::None`] and leave the cursor where it was.
    pub fn move_to_object_id(&mut self, id: i32) -> Result<MapObjectType> {
        self.cur_object_id = id;
        self.cur_object_type = None;

        let ptr = self.id_file.object_ptr(id)?;
        if ptr == 0 {
            self.cur_object_type = Some(MapObjectType::None);
            return Ok(MapObjectType::None);
        }

        self.object_block
            .goto_byte_in_file(&mut self.source, file_offset(ptr)?)?;
        let raw_type = self.object_block.read_u8()?;
        let stored_id = self.object_block.read_i32()?;

        if stored_id != id {
            if self.config.check_object_ids {
                return Err(MitabError::InvalidFormat(format!(
                    "object at offset {ptr} has id {stored_id}, expected {id}"
                )));
            }
            self.notifications.push(
                Notification::new(
                    NotificationType::Warning,
                    format!("object at offset {ptr} has id {stored_id}"),
                )
                .with_feature(id),
            );
        }

        let object_type = MapObjectType::try_from_raw(raw_type)?;
        self.cur_object_type = Some(object_type);
        Ok(object_type)
    }

    /// Decode one feature. Errors carry the feature id and file name.
    pub fn read_feature(&mut self, id: i32) -> Result<Feature> {
        self.read_feature_inner(id)
            .map_err(|e| e.for_feature(id, self.path.clone()))
    }

    fn read_feature_inner(&mut self, id: i32) -> Result<Feature> {
        let object_type = self.move_to_object_id(id)?;
        if object_type == MapObjectType::None {
            self.notifications.push(
                Notification::new(NotificationType::NotSupported, "object has no geometry")
                    .with_feature(id),
            );
            return Ok(Feature::empty(id));
        }

        let DecodedObject { geometry, tools } = ObjectReader::new(
            &mut self.source,
            &self.header,
            &mut self.object_block,
            &mut self.coord_block,
            &mut self.notifications,
            id,
        )
        .read(object_type)?;

        let style = if self.config.load_styles {
            self.resolve_style(tools)
        } else {
            FeatureStyle::default()
        };

        Ok(Feature {
            id,
            object_type,
            geometry,
            style,
        })
    }

    /// Iterate over every feature id in order.
    ///
    /// Features outside the coordinate filter are skipped, as are features
    /// without geometry unless the configuration keeps them. A feature that
    /// fails to decode is yielded as an error and iteration continues.
    pub fn features(&mut self) -> Features<'_, R> {
        Features {
            file: self,
            last_id: 0,
        }
    }

    /// Load the spatial index page at `ptr`.
    pub fn read_index_block(&mut self, ptr: i32) -> Result<IndexBlock> {
        IndexBlock::read(&mut self.source, file_offset(ptr)?)
    }

    /// Root page of the spatial index, if the file has one.
    pub fn read_root_index_block(&mut self) -> Result<Option<IndexBlock>> {
        match self.header.first_index_block {
            ptr if ptr > 0 => self.read_index_block(ptr).map(Some),
            _ => Ok(None),
        }
    }

    // -----------------------------------------------------------------------
    // Drawing tools
    // -----------------------------------------------------------------------

    /// The tool table, read from the file on first call.
    pub fn tool_table(&mut self) -> Result<&ToolTable> {
        let tools = match self.tools.take() {
            Some(tools) => tools,
            None => ToolTable::read(&mut self.source, self.header.first_tool_block)?,
        };
        let tools: &ToolTable = self.tools.insert(tools);
        Ok(tools)
    }

    fn resolve_style(&mut self, refs: ToolRefs) -> FeatureStyle {
        if self.tools.is_none() && !self.tool_load_failed {
            if let Err(e) = self.tool_table() {
                self.tool_load_failed = true;
                self.notifications.notify(
                    NotificationType::Error,
                    format!("drawing tools could not be loaded: {e}"),
                );
            }
        }

        let Some(tools) = self.tools.as_ref() else {
            return FeatureStyle::default();
        };
        let index = |i: Option<u8>| i.map_or(0, i32::from);
        FeatureStyle {
            pen: tools.pen(index(refs.pen)).copied(),
            brush: tools.brush(index(refs.brush)).copied(),
            font: tools.font(index(refs.font)).cloned(),
            symbol: tools.symbol(index(refs.symbol)).copied(),
        }
    }
}

/// Iterator returned by [`MapFile::features`].
pub struct Features<'a, R: Read + Seek> {
    file: &'a mut MapFile<R>,
    last_id: i32,
}

impl<R: Read + Seek> Iterator for Features<'_, R> {
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.file.next_feature_id(self.last_id)?;
            self.last_id = id;

            let feature = match self.file.read_feature(id) {
                Ok(feature) => feature,
                Err(e) => return Some(Err(e)),
            };

            match feature.mbr() {
                None if !self.file.config.keep_null_geometries => continue,
                Some(mbr) if !mbr.intersects(&self.file.filter) => continue,
                _ => return Some(Ok(feature)),
            }
        }
    }
}
