use super::{CellState, RoutingGrid, Side, Sides, WriteOp};
use crate::utils::conversion::GridConverter;
use pcb_common::db::layer::{BOTTOM_COPPER, LayerId, LayerMask, TOP_COPPER};
use pcb_common::geom::coord::GridCoord;
use pcb_common::geom::rect::Rect;
use thiserror::Error;

/// Upper bound on cells per side, so a plane stays addressable by `u32`.
pub const MAX_CELLS: usize = u32::MAX as usize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid pitch must be positive, got {0}")]
    InvalidPitch(i32),
    #[error("board bounds are empty or inverted: {0:?}")]
    EmptyBounds(Rect),
    #[error("board has no items to size a grid from")]
    EmptyBoard,
    #[error("grid of {rows}x{cols} cells exceeds the limit of {limit} cells per side")]
    TooLarge { rows: u32, cols: u32, limit: usize },
}

/// Which copper layers map to the two grid sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoutingLayers {
    pub top: LayerId,
    pub bottom: LayerId,
    /// When false both sides hold the same plane: writes to one reach both.
    pub double_sided: bool,
}

impl Default for RoutingLayers {
    fn default() -> Self {
        Self {
            top: TOP_COPPER,
            bottom: BOTTOM_COPPER,
            double_sided: true,
        }
    }
}

impl RoutingLayers {
    pub fn single_sided(layer: LayerId) -> Self {
        Self {
            top: layer,
            bottom: layer,
            double_sided: false,
        }
    }

    pub fn sides_for(&self, mask: LayerMask) -> Sides {
        let on_bottom = mask.contains(self.bottom);
        let on_top = mask.contains(self.top);
        if !self.double_sided {
            return if on_bottom || on_top { Sides::BOTH } else { Sides::NONE };
        }
        let mut sides = Sides::NONE;
        if on_bottom {
            sides = sides | Sides::BOTTOM;
        }
        if on_top {
            sides = sides | Sides::TOP;
        }
        sides
    }
}

/// Two planes (bottom, top) of `rows x cols` cells covering the board bounds.
pub struct DenseGrid {
    rows: u32,
    cols: u32,
    layers: RoutingLayers,
    converter: GridConverter,
    cells: Vec<CellState>,
}

impl DenseGrid {
    pub fn new(bounds: Rect, pitch: i32, layers: RoutingLayers) -> Result<Self, GridError> {
        Self::with_limit(bounds, pitch, layers, MAX_CELLS)
    }

    /// Like [`DenseGrid::new`] with a caller-chosen cap on cells per side.
    pub fn with_limit(
        bounds: Rect,
        pitch: i32,
        layers: RoutingLayers,
        limit: usize,
    ) -> Result<Self, GridError> {
        if pitch <= 0 {
            return Err(GridError::InvalidPitch(pitch));
        }
        if bounds.width() < 0 || bounds.height() < 0 {
            return Err(GridError::EmptyBounds(bounds));
        }

        // One extra cell so both edges of the bounds have a center on them.
        let rows = (bounds.height() / pitch) as u32 + 1;
        let cols = (bounds.width() / pitch) as u32 + 1;
        let size = rows as usize * cols as usize;
        if size > limit.min(MAX_CELLS) {
            return Err(GridError::TooLarge { rows, cols, limit });
        }
        if size > 10_000_000 {
            log::warn!(
                "Allocating large DenseGrid: {}x{}x2 cells. Ensure sufficient RAM.",
                rows,
                cols
            );
        }

        log::debug!(
            "DenseGrid {}x{} at pitch {} (origin {:?}, {})",
            rows,
            cols,
            pitch,
            bounds.min,
            if layers.double_sided { "double sided" } else { "single sided" }
        );

        Ok(Self {
            rows,
            cols,
            layers,
            converter: GridConverter::new(bounds.min, pitch, rows, cols),
            cells: vec![0; size * 2],
        })
    }

    pub fn routing_layers(&self) -> RoutingLayers {
        self.layers
    }

    #[inline(always)]
    fn index(&self, coord: GridCoord, side: Side) -> Option<usize> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        Some(
            side.plane() * (self.rows as usize) * (self.cols as usize)
                + (coord.row as usize) * (self.cols as usize)
                + coord.col as usize,
        )
    }

    #[inline(always)]
    fn apply(&mut self, coord: GridCoord, side: Side, op: WriteOp, value: CellState) {
        if let Some(idx) = self.index(coord, side) {
            let cell = &mut self.cells[idx];
            *cell = op.apply(*cell, value);
        }
    }

    /// Number of cells on `side` sharing at least one bit with `flags`.
    pub fn count_flagged(&self, side: Side, flags: CellState) -> usize {
        self.plane(side).iter().filter(|&&c| c & flags != 0).count()
    }

    /// Number of non-empty cells on `side`.
    pub fn occupied(&self, side: Side) -> usize {
        self.plane(side).iter().filter(|&&c| c != 0).count()
    }

    /// Coordinates of every cell on `side` whose state satisfies `pred`, in
    /// row-major order.
    pub fn cells_where(
        &self,
        side: Side,
        pred: impl Fn(CellState) -> bool,
    ) -> Vec<GridCoord> {
        let cols = self.cols as usize;
        self.plane(side)
            .iter()
            .enumerate()
            .filter(|&(_, &c)| pred(c))
            .map(|(i, _)| GridCoord::new((i / cols) as u32, (i % cols) as u32))
            .collect()
    }

    fn plane(&self, side: Side) -> &[CellState] {
        let size = (self.rows as usize) * (self.cols as usize);
        let start = side.plane() * size;
        &self.cells[start..start + size]
    }
}

impl RoutingGrid for DenseGrid {
    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }

    fn converter(&self) -> &GridConverter {
        &self.converter
    }

    fn sides_for(&self, mask: LayerMask) -> Sides {
        self.layers.sides_for(mask)
    }

    fn get(&self, coord: GridCoord, side: Side) -> CellState {
        self.index(coord, side).map_or(0, |idx| self.cells[idx])
    }

    fn write(&mut self, coord: GridCoord, sides: Sides, op: WriteOp, value: CellState) {
        // Single sided: a write to the top plane is mirrored onto the bottom.
        let sides = if !self.layers.double_sided && sides.contains(Side::Top) {
            sides | Sides::BOTTOM
        } else {
            sides
        };
        for side in Side::ALL {
            if sides.contains(side) {
                self.apply(coord, side, op, value);
            }
        }
    }

    fn clear(&mut self) {
        self.cells.fill(0);
    }
}
