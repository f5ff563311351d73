use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::proptest;

use crate::*;

fn grid(cells: i32, viewport_height: f64) -> Grid {
    GridBuilder::new()
        .tile_size(256.0, 128.0)
        .map_cells(cells, cells)
        .anchor_offset(-(cells as f64) * 128.0, -(cells as f64) * 64.0)
        .viewport_size(1280.0, viewport_height)
        .build()
        .unwrap()
}

#[test]
fn test_cell_ids_20x20() {
    let g = grid(20, 720.0);
    assert_eq!(g.cell_id(0, 0), CellId(0));
    assert_eq!(g.cell_id(19, 19), CellId(399));
    assert_eq!(g.cell_coord(CellId(399)), V2::new(19, 19));
    assert!(g.is_valid_cell_id(CellId(399)));
    assert!(!g.is_valid_cell_id(CellId(400)));
}

#[test]
fn test_area_partition_20x20() {
    let g = grid(20, 720.0);
    assert_eq!(g.get_area_side(), 8);
    assert_eq!(g.areas().get_areas_per_side(), 3);
    assert_eq!(g.areas().get_area_count(), 9);
    assert_eq!(g.area_id(0, 0), AreaId(0));
    assert_eq!(g.area_id(2, 2), AreaId(8));
    assert!(g.is_valid_area_id(AreaId(8)));
    assert!(!g.is_valid_area_id(AreaId(9)));
    assert_eq!(g.area_coord(AreaId(8)), V2::new(2, 2));
}

fn check_cell_invariants(cells: i32, x: i32, y: i32) -> proptest::test_runner::TestCaseResult {
    let g = grid(cells, 720.0);
    let in_bounds = x >= 0 && x < cells && y >= 0 && y < cells;
    prop_assert_eq!(g.is_valid_cell(x, y), in_bounds);

    if in_bounds {
        prop_assert_eq!(g.cell_coord(g.cell_id(x, y)), V2::new(x, y));

        // Cell centers survive the trip through pixels exactly.
        let c = V2::new(x, y);
        prop_assert_eq!(g.map_pixel_to_cell(g.cell_to_map_pixel(c)), Some(c));

        let area = g.area_of_cell(x, y);
        prop_assert!(g.is_valid_area_id(area));
        let a = g.area_coord(area);
        let bounds = g.area_cell_bounds(a.x, a.y).unwrap();
        prop_assert!(bounds.contains(c));
    }

    Ok(())
}

fn check_area_invariants(cells: i32, id: i32) -> proptest::test_runner::TestCaseResult {
    let g = grid(cells, 720.0);
    let id = AreaId(id);

    let raw = g.area_neighbors9(id);
    prop_assert_eq!(raw[4], id);

    let valid = g.valid_area_neighbors9(id);
    prop_assert!(valid.len() <= 9);
    for n in valid.iter() {
        prop_assert!(g.is_valid_area_id(*n));
        prop_assert!(raw.contains(n));
        let a = g.area_coord(*n);
        let c = g.area_coord(id);
        prop_assert!((a.x - c.x).abs() <= 1 && (a.y - c.y).abs() <= 1);
    }

    if g.is_valid_area_id(id) {
        let c = g.area_coord(id);
        prop_assert_eq!(g.area_id(c.x, c.y), id);
        prop_assert!(valid.contains(&id));
    } else {
        prop_assert!(valid.is_empty());
    }

    Ok(())
}

fn check_pixel_round_trip(cells: i32, px: f64, py: f64) -> proptest::test_runner::TestCaseResult {
    let g = grid(cells, 720.0);
    let p = V2::new(px, py);
    let cell = g.map_pixel_to_cell(p).unwrap();
    let back = g.cell_to_map_pixel(cell);

    // A pixel is never more than half a tile from the center of its cell on either axis.
    let tile = g.config().get_tile_size();
    prop_assert!((back.x - p.x).abs() <= tile.x / 2.0 + 1e-6);
    prop_assert!((back.y - p.y).abs() <= tile.y / 2.0 + 1e-6);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        ..Default::default()
    })]
    #[test]
    #[allow(unreachable_code)]
    fn fuzz_cells(
        cells in 1..300i32,
        x in -50..350i32,
        y in -50..350i32,
    ) {
        return check_cell_invariants(cells, x, y);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        ..Default::default()
    })]
    #[test]
    #[allow(unreachable_code)]
    fn fuzz_areas(
        cells in 1..500i32,
        id in -20..5000i32,
    ) {
        return check_area_invariants(cells, id);
    }
}

proptest! {
    #[test]
    #[allow(unreachable_code)]
    fn fuzz_pixel_round_trip(
        cells in 1..200i32,
        px in -30000.0..30000.0f64,
        py in -15000.0..15000.0f64,
    ) {
        return check_pixel_round_trip(cells, px, py);
    }
}
