/// A cell address in the routing grid. Rows run along board Y, columns along X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub row: u32,
    pub col: u32,
}

impl GridCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Swaps row and column, i.e. mirrors the cell across the main diagonal.
    pub fn transposed(self) -> Self {
        Self::new(self.col, self.row)
    }
}
