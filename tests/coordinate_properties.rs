//! Property tests over the compressed and absolute coordinate paths.

mod common;

use common::{open, MapImage, Record};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn compressed_matches_absolute(
        cx in -1_000_000i32..1_000_000,
        cy in -1_000_000i32..1_000_000,
        dx in any::<i16>(),
        dy in any::<i16>(),
        scale in 1.0f64..100_000.0,
    ) {
        let mut image = MapImage::new(scale, scale, 12.5, -7.25);
        let absolute = image.object_page((0, 0));
        image.push_object(
            absolute,
            1,
            0x02,
            Record::new().coord(cx + dx as i32, cy + dy as i32).u8(0),
        );
        let compressed = image.object_page((cx, cy));
        image.push_object(compressed, 2, 0x01, Record::new().ccoord(dx, dy).u8(0));

        let mut map = open(&image);
        let a = map.read_feature(1).unwrap();
        let b = map.read_feature(2).unwrap();
        prop_assert_eq!(
            a.geometry.as_point().unwrap().position,
            b.geometry.as_point().unwrap().position
        );
    }

    #[test]
    fn filter_corners_round_trip(x in -1_000_000i32..1_000_000, y in -1_000_000i32..1_000_000) {
        let image = MapImage::new(1000.0, 250.0, 5000.0, -3000.0);
        let map = open(&image);
        let p = map.header().int_to_coordsys(x, y);
        prop_assert_eq!(map.header().coordsys_to_int(p.x, p.y), (x, y));
    }
}
