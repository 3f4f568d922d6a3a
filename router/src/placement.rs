//! Paints a whole board onto a routing grid.

use crate::grid::cell::{CELL_IS_EDGE, CELL_IS_FRIEND, HOLE, VIA_IMPOSSIBLE};
use crate::grid::{CellState, DenseGrid, GridError, RoutingGrid, RoutingLayers, Sides, WriteOp};
use crate::raster::{Brush, draw_line, place_pad, place_track};
use pcb_common::db::core::Board;
use pcb_common::db::indices::TrackId;
use pcb_common::geom::point::Point;
use pcb_common::geom::rect::Rect;
use pcb_common::util::config::GridConfig;
use pcb_common::util::profiler::ScopedTimer;

/// Allocates an empty grid covering the board plus `config.clearance` on
/// every side.
pub fn grid_for_board(board: &Board, config: &GridConfig) -> Result<DenseGrid, GridError> {
    let bounds = board
        .bounding_box()
        .ok_or(GridError::EmptyBoard)?
        .inflate(config.clearance);
    let layers = if config.double_sided {
        RoutingLayers {
            top: config.top_layer,
            bottom: config.bottom_layer,
            double_sided: true,
        }
    } else {
        RoutingLayers::single_sided(config.bottom_layer)
    };
    DenseGrid::with_limit(bounds, config.pitch, layers, config.max_cells)
}

/// Occupancy value painted for a track item.
fn obstacle_value(is_via: bool) -> CellState {
    if is_via { HOLE | VIA_IMPOSSIBLE } else { HOLE }
}

/// Ors every pad and track of `board`, inflated by `clearance`, into the
/// grid. With `isolate`, that item is skipped and then written last as
/// [`CELL_IS_FRIEND`], so its cells read as its own whatever lay under them.
/// Returns the number of cell writes.
pub fn populate<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    board: &Board,
    clearance: i32,
    isolate: Option<TrackId>,
) -> usize {
    let mut timer = ScopedTimer::new("Board population");
    let mut written = 0;

    for pad in &board.pads {
        written += place_pad(grid, pad, HOLE, clearance, WriteOp::Or);
    }
    for (id, item) in board.tracks() {
        if Some(id) == isolate {
            continue;
        }
        written += place_track(grid, item, obstacle_value(item.is_via()), clearance, WriteOp::Or);
    }

    if let Some(item) = isolate.and_then(|id| board.track(id)) {
        written += place_track(grid, item, CELL_IS_FRIEND, clearance, WriteOp::Write);
    }

    timer.record_items(board.num_pads() + board.num_tracks());
    log::debug!(
        "Populated grid from {} pads and {} tracks: {} cell writes",
        board.num_pads(),
        board.num_tracks(),
        written
    );
    written
}

/// Marks the outline of `edge` with [`CELL_IS_EDGE`] on both sides.
pub fn paint_board_edge<G: RoutingGrid + ?Sized>(grid: &mut G, edge: Rect) -> usize {
    let brush = Brush::new(Sides::BOTH, WriteOp::Or, CELL_IS_EDGE);
    let corners = [
        edge.min,
        Point::new(edge.max.x, edge.min.y),
        edge.max,
        Point::new(edge.min.x, edge.max.y),
    ];
    (0..4)
        .map(|i| draw_line(grid, corners[i], corners[(i + 1) % 4], &brush))
        .sum()
}
