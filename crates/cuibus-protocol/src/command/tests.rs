//! Unit tests for applying commands to a selection.

use rstest::{fixture, rstest};

use super::*;
use crate::store::{Polygon, Selection};

#[fixture]
fn selection() -> Selection {
    Selection::new()
}

fn point2d(id: i32, x: i32, z: i32) -> Command {
    Command::Point2D {
        id,
        position: ColumnPos::new(x, z),
        region_size: 0,
    }
}

#[rstest]
fn point2d_sets_polygon_vertex(mut selection: Selection) {
    point2d(0, 120, -64)
        .apply(&mut selection)
        .expect("vertex accepted");

    let polygon = selection.polygon().expect("polygon active");
    assert_eq!(polygon.vertex(0), Some(ColumnPos::new(120, -64)));
}

#[rstest]
#[case(-1)]
#[case(1024)]
#[case(i32::MAX)]
fn point2d_rejects_ids_outside_limit(mut selection: Selection, #[case] id: i32) {
    let error = point2d(id, 1, 1)
        .apply(&mut selection)
        .expect_err("id must be rejected");

    assert!(matches!(
        error,
        ApplyError::OutOfRange {
            kind: CommandKind::Point2D,
            field: "id",
            ..
        }
    ));
    assert_eq!(selection, Selection::new());
}

#[test]
fn point2d_honours_custom_limit() {
    let mut selection = Selection::with_max_polygon_vertices(4);
    assert!(point2d(3, 0, 0).apply(&mut selection).is_ok());
    assert!(point2d(4, 0, 0).apply(&mut selection).is_err());
    assert_eq!(selection.polygon().map(Polygon::vertex_count), Some(1));
}

#[rstest]
#[case(0, CuboidCorner::First)]
#[case(1, CuboidCorner::Second)]
fn point3d_sets_cuboid_corner(
    mut selection: Selection,
    #[case] id: i32,
    #[case] corner: CuboidCorner,
) {
    let position = BlockPos::new(4, 64, -2);
    Command::Point3D {
        id,
        position,
        region_size: 1,
    }
    .apply(&mut selection)
    .expect("corner accepted");

    let cuboid = selection.cuboid().expect("cuboid active");
    let stored = match corner {
        CuboidCorner::First => cuboid.first(),
        CuboidCorner::Second => cuboid.second(),
    };
    assert_eq!(stored, Some(position));
}

#[rstest]
fn point3d_rejects_third_corner(mut selection: Selection) {
    let result = Command::Point3D {
        id: 2,
        position: BlockPos::new(0, 0, 0),
        region_size: 0,
    }
    .apply(&mut selection);

    assert!(result.is_err());
    assert!(selection.region().is_none());
}

#[rstest]
fn polygon_bounds_must_not_be_inverted(mut selection: Selection) {
    point2d(0, 1, 1).apply(&mut selection).expect("vertex");
    let before = selection.clone();

    let error = Command::RegionPolygon {
        min_y: 80,
        max_y: 10,
    }
    .apply(&mut selection)
    .expect_err("inverted bounds");

    assert_eq!(error, ApplyError::InvertedBounds { min: 80, max: 10 });
    assert_eq!(selection, before);
}

#[rstest]
fn polygon_bounds_accept_flat_range(mut selection: Selection) {
    Command::RegionPolygon {
        min_y: 64,
        max_y: 64,
    }
    .apply(&mut selection)
    .expect("equal bounds accepted");
    assert_eq!(
        selection.polygon().and_then(Polygon::bounds),
        Some((64, 64))
    );
}

#[rstest]
fn ellipsoid_center_then_radii(mut selection: Selection) {
    let center = Vec3::new(0.5, 64.0, 0.5);
    let radii = Vec3::new(3.0, 2.0, 3.0);
    for (id, value) in [(0, center), (1, radii)] {
        Command::RegionEllipsoid { id, value }
            .apply(&mut selection)
            .expect("ellipsoid write");
    }

    let ellipsoid = selection.ellipsoid().expect("ellipsoid active");
    assert_eq!(ellipsoid.center(), Some(center));
    assert_eq!(ellipsoid.radii(), Some(radii));
    assert!(selection.is_complete());
}

#[rstest]
#[case(2, Vec3::new(1.0, 1.0, 1.0))]
#[case(-1, Vec3::new(1.0, 1.0, 1.0))]
#[case(1, Vec3::new(1.0, -0.5, 1.0))]
fn ellipsoid_rejects_bad_input(mut selection: Selection, #[case] id: i32, #[case] value: Vec3) {
    let result = Command::RegionEllipsoid { id, value }.apply(&mut selection);
    assert!(result.is_err());
    assert!(selection.region().is_none());
}

#[rstest]
fn cylinder_sets_center_and_radii(mut selection: Selection) {
    Command::RegionCylinder {
        center: BlockPos::new(10, 60, 10),
        radii: Radii2::new(4.5, 2.0),
    }
    .apply(&mut selection)
    .expect("cylinder accepted");

    let cylinder = selection.cylinder().expect("cylinder active");
    assert_eq!(cylinder.center(), Some(BlockPos::new(10, 60, 10)));
    assert_eq!(cylinder.radii(), Some(Radii2::new(4.5, 2.0)));
}

#[rstest]
fn cylinder_rejects_negative_radius(mut selection: Selection) {
    let error = Command::RegionCylinder {
        center: BlockPos::new(0, 0, 0),
        radii: Radii2::new(1.0, -1.0),
    }
    .apply(&mut selection)
    .expect_err("negative radius");

    assert!(matches!(
        error,
        ApplyError::OutOfRange {
            field: "radius z",
            ..
        }
    ));
    assert!(selection.region().is_none());
}

#[rstest]
fn shape_and_clear_drive_active_region(mut selection: Selection) {
    Command::RegionShape {
        shape: RegionShape::Ellipsoid,
    }
    .apply(&mut selection)
    .expect("shape");
    assert_eq!(selection.shape(), Some(RegionShape::Ellipsoid));

    Command::SelectionClear
        .apply(&mut selection)
        .expect("clear");
    assert!(selection.region().is_none());
}

#[rstest]
#[case(Command::Version { version: 3 })]
#[case(Command::GridSpacing { spacing: 0.5 })]
#[case(Command::ColorSet(Colors {
    grid: "#FF0000".to_owned(),
    edge: "#00FF00".to_owned(),
    first_point: "#0000FF".to_owned(),
    second_point: "#FFFFFF".to_owned(),
}))]
fn informational_commands_leave_store_alone(mut selection: Selection, #[case] command: Command) {
    point2d(0, 1, 2).apply(&mut selection).expect("vertex");
    let before = selection.clone();

    command.apply(&mut selection).expect("informational");
    assert_eq!(selection, before);
}

#[rstest]
#[case(point2d(0, 120, -64))]
#[case(Command::RegionPolygon { min_y: 0, max_y: 255 })]
#[case(Command::RegionEllipsoid { id: 1, value: Vec3::new(2.0, 2.0, 2.0) })]
#[case(Command::RegionCylinder {
    center: BlockPos::new(1, 2, 3),
    radii: Radii2::new(1.0, 1.0),
})]
#[case(Command::Point3D {
    id: 1,
    position: BlockPos::new(7, 8, 9),
    region_size: 12,
})]
#[case(Command::SelectionClear)]
fn applying_twice_matches_applying_once(mut selection: Selection, #[case] command: Command) {
    command.apply(&mut selection).expect("first apply");
    let once = selection.clone();

    command.apply(&mut selection).expect("second apply");
    assert_eq!(selection, once);
}

#[rstest]
#[case(Command::Version { version: 1 }, CommandKind::Version)]
#[case(Command::SelectionClear, CommandKind::SelectionClear)]
#[case(point2d(0, 0, 0), CommandKind::Point2D)]
#[case(Command::GridSpacing { spacing: 1.0 }, CommandKind::GridSpacing)]
fn kind_matches_variant(#[case] command: Command, #[case] expected: CommandKind) {
    assert_eq!(command.kind(), expected);
}
