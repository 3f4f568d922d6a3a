use super::{Brush, nearest_cells, paint};
use crate::grid::RoutingGrid;
use crate::utils::conversion::GridConverter;
use pcb_common::geom::point::Point;

/// Fills a thick segment from `a` to `b` with round caps ("stadium"):
/// every cell whose center is within `half_width` of the segment.
pub fn fill_segment<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    a: Point<i32>,
    b: Point<i32>,
    half_width: i32,
    brush: &Brush,
) -> usize {
    if brush.sides.is_empty() {
        return 0;
    }
    let conv = *grid.converter();
    segment_cells(&conv, a, b, half_width, |row, col| paint(&mut *grid, row, col, brush))
}

/// Cells covered by the stadium from `a` to `b`, handed to `visit` once each.
/// Returns how many there were.
pub(crate) fn segment_cells(
    conv: &GridConverter,
    a: Point<i32>,
    b: Point<i32>,
    half_width: i32,
    mut visit: impl FnMut(u32, u32),
) -> usize {
    let pitch = conv.pitch() as i64;
    let (ax, ay) = conv.to_local(a);
    let (bx, by) = conv.to_local(b);
    let lg = half_width.max(0) as i64;

    // Local frame: origin at `a`, X axis along the segment.
    let (dx, dy) = ((bx - ax) as f64, (by - ay) as f64);
    let length = dx.hypot(dy);
    let (ux, uy) = if length > 0.0 {
        (dx / length, dy / length)
    } else {
        (1.0, 0.0)
    };
    let lgf = lg as f64;
    let lg2 = lgf * lgf;

    let mut count = 0;
    if let (Some(rows), Some(cols)) = (
        conv.row_span(ay.min(by) - lg, ay.max(by) + lg),
        conv.col_span(ax.min(bx) - lg, ax.max(bx) + lg),
    ) {
        for row in rows {
            let py = (row as i64 * pitch - ay) as f64;
            for col in cols.clone() {
                let px = (col as i64 * pitch - ax) as f64;
                let lx = px * ux + py * uy;
                let ly = py * ux - px * uy;
                if ly.abs() > lgf {
                    continue;
                }
                let inside = if lx < 0.0 {
                    lx * lx + ly * ly <= lg2
                } else if lx > length {
                    (lx - length) * (lx - length) + ly * ly <= lg2
                } else {
                    true
                };
                if inside {
                    visit(row, col);
                    count += 1;
                }
            }
        }
    }

    if count == 0 {
        count = nearest_cells(conv, (ax + bx) / 2, (ay + by) / 2, visit);
    }
    count
}
