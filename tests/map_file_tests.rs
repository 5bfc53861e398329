//! `MapFile` behaviour: id lookup, iteration, filtering, tools and errors.

mod common;

use std::io::Cursor;

use common::builders::pen_record;
use common::{default_image, open, open_with, MapImage, Record};
use mitab::io::map::MapFile;
use mitab::{
    Geometry, MapObjectType, MapReaderConfiguration, MitabError, NotificationType, Vector2,
};

/// Three points: (-98, 50), (10, 10) and a null geometry at id 2.
fn three_ids() -> MapImage {
    let mut image = default_image();
    let page = image.object_page((0, 0));
    image.push_object(page, 1, 0x02, Record::new().coord(98000, 50000).u8(0));
    image.push_object(page, 3, 0x02, Record::new().coord(-10000, 10000).u8(0));
    image.set_id_ptr(2, 0);
    image
}

fn feature_error_source(err: MitabError) -> (i32, MitabError) {
    match err {
        MitabError::Feature { id, source, .. } => (id, *source),
        other => panic!("expected a feature error, got {other}"),
    }
}

#[test]
fn header_and_projection_are_exposed() {
    let map = open(&three_ids());
    assert_eq!(map.header().version, 300);
    assert_eq!(map.header().block_size, 512);
    assert_eq!(map.header().x_scale, 1000.0);
    let proj = map.projection();
    assert_eq!((proj.proj_id, proj.ellipsoid_id, proj.units_id), (1, 33, 7));
    assert_eq!(map.max_object_id(), 3);

    let bounds = map.bounds();
    assert_eq!(bounds.min(), Vector2::new(-1000.0, -1000.0));
    assert_eq!(bounds.max(), Vector2::new(1000.0, 1000.0));
    assert_eq!(map.coord_filter(), bounds);
}

#[test]
fn next_feature_id_walks_all_ids() {
    let map = open(&three_ids());
    assert_eq!(map.next_feature_id(0), Some(1));
    assert_eq!(map.next_feature_id(-4), Some(1));
    assert_eq!(map.next_feature_id(2), Some(3));
    assert_eq!(map.next_feature_id(3), None);
}

#[test]
fn null_geometry_yields_empty_feature() {
    let mut map = open(&three_ids());
    assert_eq!(map.move_to_object_id(2).unwrap(), MapObjectType::None);

    let feature = map.read_feature(2).unwrap();
    assert_eq!(feature.geometry, Geometry::None);
    assert!(feature.style.is_empty());
    assert!(map.notifications().has_type(NotificationType::NotSupported));
}

#[test]
fn features_iterates_in_id_order() {
    let mut map = open(&three_ids());
    let ids: Vec<i32> = map.features().map(|f| f.unwrap().id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let config = MapReaderConfiguration {
        keep_null_geometries: false,
        ..Default::default()
    };
    let mut map = open_with(&three_ids(), config);
    let ids: Vec<i32> = map.features().map(|f| f.unwrap().id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn coord_filter_skips_features_outside_window() {
    let mut map = open_with(
        &three_ids(),
        MapReaderConfiguration {
            keep_null_geometries: false,
            ..Default::default()
        },
    );
    map.set_coord_filter(Vector2::new(-90.0, 60.0), Vector2::new(-100.0, 40.0));
    assert_eq!(map.int_coord_filter(), (90000, 40000, 100000, 60000));

    let features: Vec<_> = map.features().map(|f| f.unwrap()).collect();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].id, 1);

    map.reset_coord_filter();
    assert_eq!(map.features().count(), 2);
}

#[test]
fn object_id_mismatch_is_rejected() {
    let mut image = default_image();
    let page = image.object_page((0, 0));
    let ptr = image.push_object(page, 5, 0x02, Record::new().coord(0, 0).u8(0));
    image.set_id_ptr(1, ptr);

    let err = open(&image).read_feature(1).unwrap_err();
    let (id, source) = feature_error_source(err);
    assert_eq!(id, 1);
    assert!(matches!(source, MitabError::InvalidFormat(_)));
}

#[test]
fn object_id_mismatch_tolerated_when_unchecked() {
    let mut image = default_image();
    let page = image.object_page((0, 0));
    let ptr = image.push_object(page, 5, 0x02, Record::new().coord(0, 0).u8(0));
    image.set_id_ptr(1, ptr);

    let config = MapReaderConfiguration {
        check_object_ids: false,
        ..Default::default()
    };
    let mut map = open_with(&image, config);
    let feature = map.read_feature(1).unwrap();
    assert!(feature.geometry.as_point().is_some());
    assert_eq!(map.notifications().for_feature(1).len(), 1);
    assert!(map.notifications().has_type(NotificationType::Warning));
}

#[test]
fn failed_feature_does_not_stop_iteration() {
    let mut image = default_image();
    let page = image.object_page((0, 0));
    image.push_object(page, 1, 0x03, Record::new().coord(0, 0).u8(0));
    image.push_object(page, 2, 0x02, Record::new().coord(0, 0).u8(0));

    let mut map = open(&image);
    let results: Vec<_> = map.features().collect();
    assert_eq!(results.len(), 2);

    let err = results[0].as_ref().unwrap_err();
    assert!(err.to_string().contains("synthetic.MAP"));
    match err {
        MitabError::Feature { id, source, .. } => {
            assert_eq!(*id, 1);
            assert!(matches!(**source, MitabError::UnsupportedGeometryType(0x03)));
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(results[1].as_ref().unwrap().id, 2);
}

#[test]
fn id_out_of_range() {
    let mut map = open(&three_ids());
    let (id, source) = feature_error_source(map.read_feature(99).unwrap_err());
    assert_eq!(id, 99);
    assert!(matches!(source, MitabError::OutOfRange(_)));
    assert!(matches!(map.move_to_object_id(0), Err(MitabError::OutOfRange(_))));
}

#[test]
fn truncated_coordinates_discard_the_geometry() {
    let mut image = default_image();
    let ptr = image.coord_chain(&Record::new().coord(0, 0).coord(-1000, 0).into_bytes());
    let page = image.object_page((0, 0));
    let body = Record::new()
        .i32(ptr)
        .i32(40)
        .i32(0)
        .i32(0)
        .coord(0, 0)
        .coord(-1000, 0)
        .u8(0);
    image.push_object(page, 1, 0x08, body);

    let (_, source) = feature_error_source(open(&image).read_feature(1).unwrap_err());
    assert!(matches!(source, MitabError::OutOfRange(_)));
}

#[test]
fn tool_lookup_outside_table_is_none() {
    let mut image = three_ids();
    let mut tools = pen_record(1, 2, 0x112233).into_bytes();
    tools.extend(pen_record(2, 2, 0x445566).0);
    image.tool_chain(&tools);

    let mut map = open(&image);
    let table = map.tool_table().unwrap();
    assert_eq!(table.num_pens(), 2);
    assert!(table.pen(0).is_none());
    assert!(table.pen(3).is_none());
    assert_eq!(table.pen(2).unwrap().color.0, 0x445566);
}

#[test]
fn broken_tool_chain_is_reported_once() {
    let mut image = three_ids();
    let mut tools = pen_record(1, 2, 0).into_bytes();
    tools.push(9);
    image.tool_chain(&tools);

    let mut map = open(&image);
    assert!(matches!(map.tool_table(), Err(MitabError::UnsupportedFormat(_))));

    let first = map.read_feature(1).unwrap();
    let second = map.read_feature(3).unwrap();
    assert!(first.style.is_empty());
    assert!(second.style.is_empty());
    let errors = map
        .notifications()
        .iter()
        .filter(|n| n.notification_type == NotificationType::Error)
        .count();
    assert_eq!(errors, 1);
}

#[test]
fn cyclic_tool_chain_is_rejected() {
    let mut image = three_ids();
    let second = image.tool_chain(&pen_record(2, 2, 0x00ff00).into_bytes());
    let first = image.tool_chain(&pen_record(1, 2, 0xff0000).into_bytes());
    image.set_next_block(first, second);
    image.set_next_block(second, first);

    let mut map = open(&image);
    assert!(matches!(map.tool_table(), Err(MitabError::InvalidFormat(_))));

    let feature = map.read_feature(1).unwrap();
    assert!(feature.style.is_empty());
    assert!(map.notifications().has_type(NotificationType::Error));
}

#[test]
fn cyclic_coord_chain_fails_the_feature() {
    let mut image = default_image();
    let second = image.coord_chain(&Record::new().coord(-2000, 0).coord(-3000, 0).into_bytes());
    let first = image.coord_chain(&Record::new().coord(0, 0).coord(-1000, 0).into_bytes());
    image.set_next_block(first, second);
    image.set_next_block(second, first);

    let page = image.object_page((0, 0));
    let body = Record::new()
        .i32(first)
        .i32(40)
        .i32(0)
        .i32(0)
        .coord(0, 0)
        .coord(-3000, 0)
        .u8(0);
    image.push_object(page, 1, 0x08, body);

    let (id, source) = feature_error_source(open(&image).read_feature(1).unwrap_err());
    assert_eq!(id, 1);
    assert!(matches!(source, MitabError::InvalidFormat(_)));
}

#[test]
fn styles_skipped_when_disabled() {
    let mut image = default_image();
    image.tool_chain(&pen_record(1, 2, 0).into_bytes());
    let page = image.object_page((0, 0));
    image.push_object(page, 1, 0x05, Record::new().coord(0, 0).coord(1000, 0).u8(1));

    let config = MapReaderConfiguration {
        load_styles: false,
        ..Default::default()
    };
    let feature = open_with(&image, config).read_feature(1).unwrap();
    assert!(feature.style.is_empty());
    assert!(read_with_styles(&image).style.pen.is_some());
}

fn read_with_styles(image: &MapImage) -> mitab::Feature {
    open(image).read_feature(1).unwrap()
}

#[test]
fn root_index_block_entries() {
    let mut image = three_ids();
    let ptr = image.index_page(&[[0, 0, 10, 10, 1024], [-5, -5, 0, 0, 1536]]);
    image.set_first_index_block(ptr);

    let mut map = open(&image);
    let mut root = map.read_root_index_block().unwrap().expect("index present");
    let entries = root.entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].block_ptr, 1536);

    let same = map.read_index_block(ptr).unwrap();
    assert_eq!(same.num_entries(), 2);
    assert!(matches!(map.read_index_block(512), Err(MitabError::InvalidFormat(_))));
}

#[test]
fn bad_magic_cookie_is_rejected() {
    let mut image = three_ids();
    image.poke(0x100, 0);
    let result = MapFile::from_reader(
        Cursor::new(image.map_bytes()),
        Cursor::new(image.id_bytes()),
    );
    assert!(matches!(result, Err(MitabError::InvalidFormat(_))));
}

#[test]
fn from_file_opens_the_id_next_to_the_map() {
    let image = three_ids();
    let dir = std::env::temp_dir().join(format!("mitab-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let map_path = dir.join("points.MAP");
    std::fs::write(&map_path, image.map_bytes()).unwrap();
    std::fs::write(dir.join("points.ID"), image.id_bytes()).unwrap();

    let mut map = MapFile::from_file(&map_path).unwrap();
    assert_eq!(map.path(), map_path.as_path());
    assert_eq!(map.max_object_id(), 3);
    let point = map.read_feature(1).unwrap();
    assert_eq!(point.geometry.as_point().unwrap().position, Vector2::new(-98.0, 50.0));

    std::fs::remove_dir_all(&dir).unwrap();
}
