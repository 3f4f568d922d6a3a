pub mod cell;
pub mod dense;

pub use dense::{DenseGrid, GridError, RoutingLayers};

use crate::utils::conversion::GridConverter;
use pcb_common::db::layer::LayerMask;
use pcb_common::geom::coord::GridCoord;
use std::ops::BitOr;

/// State of one grid cell: a small set of flags, see [`cell`].
pub type CellState = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom,
    Top,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Bottom, Side::Top];

    #[inline]
    pub(crate) fn plane(self) -> usize {
        match self {
            Side::Bottom => 0,
            Side::Top => 1,
        }
    }
}

/// Set of routing sides a write goes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sides(u8);

impl Sides {
    pub const NONE: Sides = Sides(0);
    pub const BOTTOM: Sides = Sides(1);
    pub const TOP: Sides = Sides(2);
    pub const BOTH: Sides = Sides(3);

    pub fn contains(self, side: Side) -> bool {
        let bit = match side {
            Side::Bottom => Self::BOTTOM,
            Side::Top => Self::TOP,
        };
        self.0 & bit.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Sides {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Sides(self.0 | rhs.0)
    }
}

/// How a value is combined with the current cell state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteOp {
    /// Last write wins.
    Write,
    Or,
    /// Toggles, undoing an earlier `Or` of the same value.
    Xor,
    And,
    /// Saturating increment by the value, for congestion counts.
    Add,
}

impl WriteOp {
    #[inline(always)]
    pub fn apply(self, current: CellState, value: CellState) -> CellState {
        match self {
            WriteOp::Write => value,
            WriteOp::Or => current | value,
            WriteOp::Xor => current ^ value,
            WriteOp::And => current & value,
            WriteOp::Add => current.saturating_add(value),
        }
    }
}

pub trait RoutingGrid {
    fn rows(&self) -> u32;
    fn cols(&self) -> u32;
    fn converter(&self) -> &GridConverter;

    /// Sides a board item on `mask` occupies.
    fn sides_for(&self, mask: LayerMask) -> Sides;

    /// Out-of-range coordinates read as empty.
    fn get(&self, coord: GridCoord, side: Side) -> CellState;

    /// Out-of-range coordinates are ignored.
    fn write(&mut self, coord: GridCoord, sides: Sides, op: WriteOp, value: CellState);

    fn clear(&mut self);
}
