use super::{Brush, mark_nearest, paint};
use crate::grid::RoutingGrid;
use pcb_common::geom::point::Point;

/// Fills a disc of `radius` around `center` (board coordinates).
pub fn fill_circle<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    center: Point<i32>,
    radius: i32,
    brush: &Brush,
) -> usize {
    if brush.sides.is_empty() {
        return 0;
    }
    let conv = *grid.converter();
    let pitch = conv.pitch() as i64;
    let (cx, cy) = conv.to_local(center);
    let r = radius.max(0) as i64;
    let r2 = r * r;

    let mut written = 0;
    if let (Some(rows), Some(cols)) = (conv.row_span(cy - r, cy + r), conv.col_span(cx - r, cx + r))
    {
        for row in rows {
            let dy = cy - row as i64 * pitch;
            let dy2 = dy * dy;
            for col in cols.clone() {
                let dx = cx - col as i64 * pitch;
                if dx * dx + dy2 > r2 {
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
