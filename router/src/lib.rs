pub mod grid;
pub mod placement;
pub mod raster;
pub mod track;
pub mod utils;

use grid::{DenseGrid, GridError};
use pcb_common::db::core::Board;
use pcb_common::util::config::GridConfig;

/// Builds a grid for `board` and paints its pads, tracks and outline.
pub fn build_occupancy(board: &Board, config: &GridConfig) -> Result<DenseGrid, GridError> {
    let mut grid = placement::grid_for_board(board, config)?;
    if let Some(edge) = board.bounding_box() {
        placement::paint_board_edge(&mut grid, edge);
    }
    placement::populate(&mut grid, board, config.clearance, None);
    Ok(grid)
}
