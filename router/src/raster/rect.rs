use super::{Brush, mark_nearest, paint};
use crate::grid::RoutingGrid;
use pcb_common::geom::angle;
use pcb_common::geom::point::Point;

/// Fills the axis-aligned rectangle spanned by two corners, boundary included.
pub fn fill_rect<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    a: Point<i32>,
    b: Point<i32>,
    brush: &Brush,
) -> usize {
    if brush.sides.is_empty() {
        return 0;
    }
    let conv = *grid.converter();
    let (ax, ay) = conv.to_local(a);
    let (bx, by) = conv.to_local(b);
    let (x0, x1) = (ax.min(bx), ax.max(bx));
    let (y0, y1) = (ay.min(by), ay.max(by));

    let mut written = 0;
    if let (Some(rows), Some(cols)) = (conv.row_span(y0, y1), conv.col_span(x0, x1)) {
        for row in rows {
            for col in cols.clone() {
                paint(grid, row, col, brush);
                written += 1;
            }
        }
    }

    if written == 0 {
        written = mark_nearest(grid, (x0 + x1) / 2, (y0 + y1) / 2, brush);
    }
    written
}

/// Fills a rectangle of half extents `half` centered on `center`, rotated by
/// `orientation` tenths of a degree. Quarter turns take the axis-aligned path
/// so the four orientations give transposed copies of the same cell set.
pub fn fill_rotated_rect<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    center: Point<i32>,
    half: Point<i32>,
    orientation: i32,
    brush: &Brush,
) -> usize {
    let orientation = angle::normalize(orientation);
    if orientation % angle::QUARTER_TURN == 0 {
        let (dx, dy) = if orientation == 900 || orientation == 2700 {
            (half.y, half.x)
        } else {
            (half.x, half.y)
        };
        return fill_rect(
            grid,
            Point::new(center.x - dx, center.y - dy),
            Point::new(center.x + dx, center.y + dy),
            brush,
        );
    }

    if brush.sides.is_empty() {
        return 0;
    }
    let conv = *grid.converter();
    let pitch = conv.pitch() as i64;
    let (cx, cy) = conv.to_local(center);
    let (hx, hy) = (half.x.abs() as f64, half.y.abs() as f64);
    // Enclosing circle of the rectangle: over-estimates the candidate box.
    let radius = hx.hypot(hy).ceil() as i64;

    let mut written = 0;
    if let (Some(rows), Some(cols)) = (
        conv.row_span(cy - radius, cy + radius),
        conv.col_span(cx - radius, cx + radius),
    ) {
        for row in rows {
            let py = (row as i64 * pitch - cy) as f64;
            for col in cols.clone() {
                let px = (col as i64 * pitch - cx) as f64;
                let (lx, ly) = angle::rotate(px, py, -orientation);
                if lx.abs() > hx || ly.abs() > hy {
                    continue;
                }
                paint(grid, row, col, brush);
                written += 1;
            }
        }
    }

    if written == 0 {
        written = mark_nearest(grid, cx, cy, brush);
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{DenseGrid, RoutingLayers, Side, Sides, WriteOp};
    use pcb_common::geom::coord::GridCoord;
    use pcb_common::geom::rect::Rect;
    use rstest::rstest;
    use std::collections::BTreeSet;

    fn grid() -> DenseGrid {
        DenseGrid::new(
            Rect::new(Point::new(0, 0), Point::new(2000, 2000)),
            100,
            RoutingLayers::default(),
        )
        .unwrap()
    }

    fn marked(g: &DenseGrid) -> BTreeSet<GridCoord> {
        g.cells_where(Side::Bottom, |c| c != 0).into_iter().collect()
    }

    fn brush() -> Brush {
        Brush::new(Sides::BOTTOM, WriteOp::Write, 1)
    }

    #[test]
    fn axis_aligned_includes_boundary() {
        let mut g = grid();
        let written = fill_rect(&mut g, Point::new(300, 200), Point::new(100, 400), &brush());
        // rows 2..=4, cols 1..=3
        assert_eq!(written, 9);
        assert!(marked(&g).contains(&GridCoord::new(4, 3)));
    }

    #[rstest]
    #[case(900)]
    #[case(2700)]
    fn quarter_turn_transposes(#[case] orientation: i32) {
        let center = Point::new(1000, 1000);
        let half = Point::new(450, 120);

        let mut g0 = grid();
        fill_rotated_rect(&mut g0, center, half, 0, &brush());
        let mut g90 = grid();
        fill_rotated_rect(&mut g90, center, half, orientation, &brush());

        let transposed: BTreeSet<GridCoord> = marked(&g0).into_iter().map(|c| c.transposed()).collect();
        assert_eq!(marked(&g90), transposed);
        assert_ne!(marked(&g90), marked(&g0));
    }

    #[test]
    fn half_turn_matches_unrotated() {
        let center = Point::new(1000, 1000);
        let half = Point::new(450, 120);
        let mut g0 = grid();
        fill_rotated_rect(&mut g0, center, half, 0, &brush());
        let mut g180 = grid();
        fill_rotated_rect(&mut g180, center, half, 1800, &brush());
        assert_eq!(marked(&g0), marked(&g180));
    }

    #[test]
    fn diagonal_rectangle_stays_inside_its_circle() {
        let mut g = grid();
        let center = Point::new(1000, 1000);
        let written = fill_rotated_rect(&mut g, center, Point::new(400, 50), 450, &brush());
        assert!(written > 0);

        for c in marked(&g) {
            let p = g.converter().to_world(c);
            assert!(p.distance(&center) <= 404.0);
            // Along the 45 degree diagonal, the body is thin.
            let (lx, ly) = angle::rotate((p.x - 1000) as f64, (p.y - 1000) as f64, -450);
            assert!(lx.abs() <= 400.0 && ly.abs() <= 50.0);
        }
        assert!(marked(&g).contains(&GridCoord::new(10, 10)));
    }

    #[test]
    fn sub_pitch_rect_uses_fallback() {
        let mut g = grid();
        let written = fill_rect(&mut g, Point::new(1040, 1040), Point::new(1060, 1060), &brush());
        assert_eq!(written, 4);
    }
}
