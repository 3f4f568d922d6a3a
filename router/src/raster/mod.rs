//! Paints board primitives onto a [`RoutingGrid`].
//!
//! A cell is painted when its center lies inside the shape, inflated by the
//! caller's margin. Every fill function returns the number of cell writes it
//! made; filled shapes too small to cover any cell center fall back to the
//! cells diagonally nearest to their center.

pub mod arc;
pub mod circle;
pub mod line;
pub mod rect;
pub mod segment;
pub mod shape;

pub use arc::{draw_arc, draw_circle};
pub use circle::fill_circle;
pub use line::draw_line;
pub use rect::{fill_rect, fill_rotated_rect};
pub use segment::fill_segment;
pub use shape::{Shape, place_pad, place_track, rasterize_shape};

use crate::grid::{CellState, RoutingGrid, Sides, WriteOp};
use crate::utils::conversion::GridConverter;
use pcb_common::db::layer::LayerMask;
use pcb_common::geom::coord::GridCoord;

/// What a rasterizer call writes: target sides, combine policy and value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    pub sides: Sides,
    pub op: WriteOp,
    pub value: CellState,
}

impl Brush {
    pub fn new(sides: Sides, op: WriteOp, value: CellState) -> Self {
        Self { sides, op, value }
    }

    /// Brush for an item on `mask`, resolved against the grid's routing layers.
    pub fn for_mask<G: RoutingGrid + ?Sized>(
        grid: &G,
        mask: LayerMask,
        op: WriteOp,
        value: CellState,
    ) -> Self {
        Self::new(grid.sides_for(mask), op, value)
    }
}

#[inline(always)]
pub(crate) fn paint<G: RoutingGrid + ?Sized>(grid: &mut G, row: u32, col: u32, brush: &Brush) {
    grid.write(GridCoord::new(row, col), brush.sides, brush.op, brush.value);
}

/// Paints the cells whose centers lie within `√2 · (pitch/2 + 1)` of the
/// origin-relative point `(cx, cy)`: the four diagonal neighbours of an
/// off-grid point, fewer when it sits on a grid line.
pub(crate) fn mark_nearest<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    cx: i64,
    cy: i64,
    brush: &Brush,
) -> usize {
    let conv = *grid.converter();
    nearest_cells(&conv, cx, cy, |row, col| paint(&mut *grid, row, col, brush))
}

/// Cells [`mark_nearest`] would paint, handed to `visit`.
pub(crate) fn nearest_cells(
    conv: &GridConverter,
    cx: i64,
    cy: i64,
    mut visit: impl FnMut(u32, u32),
) -> usize {
    let pitch = conv.pitch() as i64;
    let reach = pitch / 2 + 1;
    let limit = 2 * reach * reach;

    let (Some(rows), Some(cols)) = (
        conv.row_span(cy - reach, cy + reach),
        conv.col_span(cx - reach, cx + reach),
    ) else {
        return 0;
    };

    let mut count = 0;
    for row in rows {
        let dy = cy - row as i64 * pitch;
        for col in cols.clone() {
            let dx = cx - col as i64 * pitch;
            if dx * dx + dy * dy < limit {
                visit(row, col);
                count += 1;
            }
        }
    }
    count
}
