use super::segment::segment_cells;
use super::{Brush, paint};
use crate::grid::RoutingGrid;
use pcb_common::geom::angle::{self, FULL_TURN};
use pcb_common::geom::coord::GridCoord;
use pcb_common::geom::point::Point;
use std::collections::BTreeSet;

const MIN_SEGMENTS: i64 = 5;
const MAX_SEGMENTS: i64 = 100;

/// Number of chords approximating a curve of `radius` swept over `sweep`
/// tenths of a degree: finer for large radii and thin strokes.
fn chord_count(radius: f64, half_width: i32, sweep: i32) -> i64 {
    let lg = half_width.max(1) as f64;
    let n = (2.0 * radius / lg) * (sweep.unsigned_abs() as f64) / FULL_TURN as f64;
    (n as i64).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Paints the union of the stadiums along `vertices`. Chords share the cells
/// at their joints, so the union is collected first and each cell is written
/// once.
fn paint_polyline<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    vertices: impl IntoIterator<Item = Point<i32>>,
    half_width: i32,
    brush: &Brush,
) -> usize {
    if brush.sides.is_empty() {
        return 0;
    }
    let conv = *grid.converter();
    let mut cells = BTreeSet::new();
    let mut vertices = vertices.into_iter();
    let Some(mut prev) = vertices.next() else {
        return 0;
    };
    for next in vertices {
        segment_cells(&conv, prev, next, half_width, |row, col| {
            cells.insert(GridCoord::new(row, col));
        });
        prev = next;
    }

    for cell in &cells {
        paint(grid, cell.row, cell.col, brush);
    }
    cells.len()
}

/// Paints an arc stroke of `half_width` around `center`, starting at
/// `start_point` and sweeping `sweep` tenths of a degree (same direction
/// convention as [`angle::rotate`]).
pub fn draw_arc<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    center: Point<i32>,
    start_point: Point<i32>,
    sweep: i32,
    half_width: i32,
    brush: &Brush,
) -> usize {
    let radius = center.distance(&start_point);
    let n = chord_count(radius, half_width, sweep);
    let rel = (start_point - center).to_f64();

    let vertices = (1..=n).map(|i| {
        let a = (sweep as i64 * i / n) as i32;
        let (x, y) = angle::rotate(rel.x, rel.y, a);
        Point::new(x, y).round() + center
    });
    paint_polyline(grid, std::iter::once(start_point).chain(vertices), half_width, brush)
}

/// Paints a full circle outline of `half_width` around `center` through
/// `point`.
pub fn draw_circle<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    center: Point<i32>,
    point: Point<i32>,
    half_width: i32,
    brush: &Brush,
) -> usize {
    let radius = center.distance(&point);
    let n = chord_count(radius, half_width, FULL_TURN);
    let r = radius.round() as i32;

    let vertices = (0..=n).map(|i| {
        let a = (FULL_TURN as i64 * i / n) as i32;
        let (x, y) = angle::rotate(r as f64, 0.0, a);
        Point::new(x, y).round() + center
    });
    paint_polyline(grid, vertices, half_width, brush)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{DenseGrid, RoutingLayers, Side, Sides, WriteOp};
    use pcb_common::geom::rect::Rect;

    fn grid() -> DenseGrid {
        DenseGrid::new(
            Rect::new(Point::new(0, 0), Point::new(4000, 4000)),
            100,
            RoutingLayers::default(),
        )
        .unwrap()
    }

    #[test]
    fn chord_count_is_clamped() {
        assert_eq!(chord_count(10.0, 100, 900), MIN_SEGMENTS);
        assert_eq!(chord_count(100_000.0, 10, FULL_TURN), MAX_SEGMENTS);
        // 2 * 1000 / 50 = 40 chords for a full turn, 10 for a quarter.
        assert_eq!(chord_count(1000.0, 50, FULL_TURN), 40);
        assert_eq!(chord_count(1000.0, 50, 900), 10);
        assert_eq!(chord_count(1000.0, 50, -900), 10);
    }

    #[test]
    fn circle_outline_leaves_the_middle_empty() {
        let mut g = grid();
        let brush = Brush::new(Sides::TOP, WriteOp::Or, 0x01);
        let c = Point::new(2000, 2000);
        draw_circle(&mut g, c, Point::new(3000, 2000), 60, &brush);

        let marked = g.cells_where(Side::Top, |v| v != 0);
        assert!(!marked.is_empty());
        for cell in &marked {
            let d = g.converter().to_world(*cell).distance(&c);
            // Chords cut inside the circle by at most r(1 - cos(pi/n)).
            assert!(d > 1000.0 - 60.0 - 20.0 && d < 1000.0 + 60.0 + 1.0, "{cell:?} at {d}");
        }
        // The four axis points lie on the outline.
        for p in [(3000, 2000), (1000, 2000), (2000, 3000), (2000, 1000)] {
            let cell = g.converter().to_grid(Point::new(p.0, p.1));
            assert_eq!(g.get(cell, Side::Top), 0x01, "{p:?}");
        }
    }

    #[test]
    fn xor_erases_an_arc_painted_with_or() {
        let mut g = grid();
        let c = Point::new(2000, 2000);
        let start = Point::new(3000, 2000);
        draw_arc(&mut g, c, start, 1800, 50, &Brush::new(Sides::TOP, WriteOp::Or, 0x01));
        assert!(g.occupied(Side::Top) > 0);

        draw_arc(&mut g, c, start, 1800, 50, &Brush::new(Sides::TOP, WriteOp::Xor, 0x01));
        assert_eq!(g.occupied(Side::Top), 0);
    }

    #[test]
    fn add_counts_each_outline_cell_once() {
        let mut g = grid();
        let brush = Brush::new(Sides::TOP, WriteOp::Add, 1);
        let written = draw_circle(&mut g, Point::new(2000, 2000), Point::new(3000, 2000), 60, &brush);

        assert!(g.cells_where(Side::Top, |v| v > 1).is_empty());
        assert_eq!(g.occupied(Side::Top), written);
    }

    #[test]
    fn quarter_arc_stays_in_its_quadrant() {
        let mut g = grid();
        let brush = Brush::new(Sides::BOTTOM, WriteOp::Write, 0x02);
        let c = Point::new(2000, 2000);
        draw_arc(&mut g, c, Point::new(3000, 2000), 900, 50, &brush);

        let end = c + angle::rotate_point(Point::new(1000, 0), 900);
        let end_cell = g.converter().to_grid(end);
        assert_eq!(g.get(end_cell, Side::Bottom), 0x02);

        for cell in g.cells_where(Side::Bottom, |v| v != 0) {
            let p = g.converter().to_world(cell) - c;
            let q = end - c;
            // Every painted cell lies on the start side (x >= 0) or the end side.
            assert!(p.x >= -50 || (p.y.signum() == q.y.signum()), "{cell:?}");
        }
    }
}
