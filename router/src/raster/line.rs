use super::{Brush, paint};
use crate::grid::RoutingGrid;
use pcb_common::geom::point::Point;

/// Paints a one-cell-wide line from `p0` to `p1` by stepping one cell at a
/// time along the major axis. Cells are those containing each sample point;
/// samples off the grid are skipped.
pub fn draw_line<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    p0: Point<i32>,
    p1: Point<i32>,
    brush: &Brush,
) -> usize {
    if brush.sides.is_empty() {
        return 0;
    }
    let conv = *grid.converter();
    let (rows, cols) = (grid.rows() as i64, grid.cols() as i64);
    let (x0, y0) = conv.to_local(p0);
    let (x1, y1) = conv.to_local(p1);
    let (c0, r0) = (cell(x0, conv.pitch()), cell(y0, conv.pitch()));
    let (c1, r1) = (cell(x1, conv.pitch()), cell(y1, conv.pitch()));

    let mut written = 0;
    let mut plot = |grid: &mut G, row: i64, col: i64| {
        if (0..rows).contains(&row) && (0..cols).contains(&col) {
            paint(grid, row as u32, col as u32, brush);
            written += 1;
        }
    };

    if c0 == c1 {
        for row in r0.min(r1).max(0)..=r0.max(r1).min(rows - 1) {
            plot(&mut *grid, row, c0);
        }
    } else if r0 == r1 {
        for col in c0.min(c1).max(0)..=c0.max(c1).min(cols - 1) {
            plot(&mut *grid, r0, col);
        }
    } else {
        let (dc, dr) = (c1 - c0, r1 - r0);
        let steps = dc.abs().max(dr.abs());
        let (step_c, step_r) = (dc as f64 / steps as f64, dr as f64 / steps as f64);
        for i in 0..=steps {
            let col = c0 + (step_c * i as f64).round() as i64;
            let row = r0 + (step_r * i as f64).round() as i64;
            plot(&mut *grid, row, col);
        }
    }
    written
}

/// Nearest cell index of an origin-relative coordinate.
fn cell(coord: i64, pitch: i32) -> i64 {
    let pitch = pitch as i64;
    (coord + pitch / 2).div_euclid(pitch)
}
