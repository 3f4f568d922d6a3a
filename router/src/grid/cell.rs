//! Cell state flags. Several may be or-ed into one cell.

use super::CellState;

/// Copper or a drilled hole: routing is blocked.
pub const HOLE: CellState = 0x01;
/// Occupied by a component body during placement.
pub const CELL_IS_MODULE: CellState = 0x02;
/// Cell where a via may not be dropped. Painted on every side.
pub const VIA_IMPOSSIBLE: CellState = 0x04;
/// Board or zone outline.
pub const CELL_IS_EDGE: CellState = 0x20;
/// Copper of the net currently being routed.
pub const CELL_IS_FRIEND: CellState = 0x40;
/// Inside the routable area.
pub const CELL_IS_ZONE: CellState = 0x80;
