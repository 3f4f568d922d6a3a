use pcb_common::geom::coord::GridCoord;
use pcb_common::geom::point::Point;
use std::ops::RangeInclusive;

/// Maps board coordinates onto grid cells. Cell `(row, col)` is centered on
/// `origin + (col * pitch, row * pitch)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConverter {
    origin: Point<i32>,
    pitch: i32,
    rows: u32,
    cols: u32,
}

impl GridConverter {
    pub fn new(origin: Point<i32>, pitch: i32, rows: u32, cols: u32) -> Self {
        Self {
            origin,
            pitch: pitch.max(1),
            rows,
            cols,
        }
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn origin(&self) -> Point<i32> {
        self.origin
    }

    /// Origin-relative coordinate to cell index by truncation. Not clamped.
    #[inline]
    pub fn to_cell(&self, coord: i64) -> i64 {
        coord / self.pitch as i64
    }

    #[inline]
    pub fn to_local(&self, p: Point<i32>) -> (i64, i64) {
        (
            p.x as i64 - self.origin.x as i64,
            p.y as i64 - self.origin.y as i64,
        )
    }

    /// Cell containing `p`, clamped into the grid.
    pub fn to_grid(&self, p: Point<i32>) -> GridCoord {
        let (x, y) = self.to_local(p);
        let row = self.to_cell(y).clamp(0, self.rows as i64 - 1);
        let col = self.to_cell(x).clamp(0, self.cols as i64 - 1);
        GridCoord::new(row as u32, col as u32)
    }

    /// Board position of a cell center.
    pub fn to_world(&self, g: GridCoord) -> Point<i32> {
        Point::new(
            self.origin.x + g.col as i32 * self.pitch,
            self.origin.y + g.row as i32 * self.pitch,
        )
    }

    /// Rows whose center lies in `[lo, hi]` (origin-relative Y), clipped.
    pub fn row_span(&self, lo: i64, hi: i64) -> Option<RangeInclusive<u32>> {
        self.span(lo, hi, self.rows)
    }

    /// Columns whose center lies in `[lo, hi]` (origin-relative X), clipped.
    pub fn col_span(&self, lo: i64, hi: i64) -> Option<RangeInclusive<u32>> {
        self.span(lo, hi, self.cols)
    }

    fn span(&self, lo: i64, hi: i64, count: u32) -> Option<RangeInclusive<u32>> {
        if count == 0 || lo > hi {
            return None;
        }
        let pitch = self.pitch as i64;
        let first = lo.div_euclid(pitch) + (lo.rem_euclid(pitch) != 0) as i64;
        let last = hi.div_euclid(pitch);

        let first = first.max(0);
        let last = last.min(count as i64 - 1);
        if first > last {
            return None;
        }
        Some(first as u32..=last as u32)
    }
}
