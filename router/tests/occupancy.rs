use pcb_common::db::item::{Pad, PadShape};
use pcb_common::db::layer::LayerMask;
use pcb_common::geom::coord::GridCoord;
use pcb_common::geom::point::Point;
use pcb_common::geom::rect::Rect;
use pcb_common::util::config::{GeneratorConfig, GridConfig};
use pcb_common::util::generator::generate_board;
use pcb_router::build_occupancy;
use pcb_router::grid::cell::{CELL_IS_EDGE, HOLE};
use pcb_router::grid::{DenseGrid, RoutingGrid, RoutingLayers, Side, Sides, WriteOp};
use pcb_router::raster::{Brush, Shape, fill_circle, place_pad, rasterize_shape};
use rstest::rstest;
use std::collections::BTreeSet;

fn grid() -> DenseGrid {
    DenseGrid::new(
        Rect::new(Point::new(0, 0), Point::new(5000, 5000)),
        100,
        RoutingLayers::default(),
    )
    .unwrap()
}

fn marked(grid: &DenseGrid, side: Side) -> BTreeSet<GridCoord> {
    grid.cells_where(side, |c| c != 0).into_iter().collect()
}

#[test]
fn or_then_write() {
    let mut g = grid();
    let pad = Pad::new("P", Point::new(2500, 2500), Point::new(400, 400), PadShape::Circle);
    place_pad(&mut g, &pad, 0x01, 0, WriteOp::Or);
    place_pad(&mut g, &pad, 0x40, 0, WriteOp::Or);
    let center = GridCoord::new(25, 25);
    assert_eq!(g.get(center, Side::Top), 0x41);

    place_pad(&mut g, &pad, 0x02, 0, WriteOp::Write);
    assert_eq!(g.get(center, Side::Top), 0x02);
    assert_eq!(g.get(center, Side::Bottom), 0x02);
}

#[test]
fn xor_undoes_or() {
    let mut g = grid();
    let shape = Shape::Segment {
        start: Point::new(1000, 1000),
        end: Point::new(3000, 1700),
        width: 150,
    };
    rasterize_shape(&mut g, &shape, 50, LayerMask::ALL_COPPER, HOLE, WriteOp::Or);
    assert!(g.occupied(Side::Top) > 0);
    rasterize_shape(&mut g, &shape, 50, LayerMask::ALL_COPPER, HOLE, WriteOp::Xor);
    assert_eq!(g.occupied(Side::Top), 0);
    assert_eq!(g.occupied(Side::Bottom), 0);
}

#[test]
fn add_counts_overlaps() {
    let mut g = grid();
    let brush = Brush::new(Sides::BOTTOM, WriteOp::Add, 1);
    fill_circle(&mut g, Point::new(2000, 2000), 300, &brush);
    fill_circle(&mut g, Point::new(2200, 2000), 300, &brush);
    assert_eq!(g.get(GridCoord::new(20, 21), Side::Bottom), 2);
    assert_eq!(g.get(GridCoord::new(20, 17), Side::Bottom), 1);
}

#[rstest]
#[case(0, false)]
#[case(900, true)]
#[case(1800, false)]
#[case(2700, true)]
fn rectangle_pad_quarter_turns(#[case] orientation: i32, #[case] transposed: bool) {
    let center = Point::new(2500, 2500);
    let size = Point::new(900, 300);

    let mut reference = grid();
    place_pad(&mut reference, &Pad::new("R", center, size, PadShape::Rect), HOLE, 50, WriteOp::Or);
    let mut rotated = grid();
    place_pad(
        &mut rotated,
        &Pad::new("R", center, size, PadShape::Rect).with_orientation(orientation),
        HOLE,
        50,
        WriteOp::Or,
    );

    let expected: BTreeSet<GridCoord> = if transposed {
        marked(&reference, Side::Top).into_iter().map(GridCoord::transposed).collect()
    } else {
        marked(&reference, Side::Top)
    };
    assert_eq!(marked(&rotated, Side::Top), expected);
}

#[test]
fn tiny_circle_off_grid_marks_diagonal_neighbours() {
    let mut g = grid();
    let brush = Brush::new(Sides::TOP, WriteOp::Write, 1);
    let written = fill_circle(&mut g, Point::new(1250, 3450), 30, &brush);
    assert_eq!(written, 4);
    let expected: BTreeSet<GridCoord> = [(34, 12), (34, 13), (35, 12), (35, 13)]
        .into_iter()
        .map(|(r, c)| GridCoord::new(r, c))
        .collect();
    assert_eq!(marked(&g, Side::Top), expected);
}

#[test]
fn occupancy_of_generated_board() {
    let board = generate_board(&GeneratorConfig {
        chains: 20,
        width: 20_000,
        height: 20_000,
        ..GeneratorConfig::default()
    });
    let config = GridConfig {
        pitch: 250,
        ..GridConfig::default()
    };
    let grid = build_occupancy(&board, &config).unwrap();

    assert!(grid.count_flagged(Side::Top, HOLE) + grid.count_flagged(Side::Bottom, HOLE) > 0);
    assert!(grid.count_flagged(Side::Bottom, CELL_IS_EDGE) > 0);
    // Every pad center is blocked on both sides.
    for pad in &board.pads {
        let cell = grid.converter().to_grid(pad.position);
        let near: Vec<GridCoord> = (0..=1)
            .flat_map(|dr| (0..=1).map(move |dc| GridCoord::new(cell.row + dr, cell.col + dc)))
            .collect();
        for side in Side::ALL {
            assert!(near.iter().any(|&c| grid.get(c, side) & HOLE != 0), "{}", pad.name);
        }
    }
}
