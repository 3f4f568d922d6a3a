use super::point::Point;
use rstar::{AABB, RTree};

/// Point index used to find the items anchored at an exact board coordinate.
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedPoint {
    pos: [f64; 2],
    id: usize,
}

/// Envelope coordinates are floats: rstar computes areas in the scalar type,
/// which overflows `i32` at board scale.
fn key(p: Point<i32>) -> [f64; 2] {
    [p.x as f64, p.y as f64]
}

impl rstar::RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.pos)
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn insert(&mut self, pos: Point<i32>, id: usize) {
        self.tree.insert(IndexedPoint { pos: key(pos), id });
    }

    /// Ids anchored exactly at `pos`, in ascending id order.
    pub fn query_point(&self, pos: Point<i32>) -> Vec<usize> {
        let aabb = AABB::from_point(key(pos));
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&aabb)
            .map(|item| item.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_returns_exact_matches_only() {
        let mut index = SpatialIndex::new();
        index.insert(Point::new(0, 0), 2);
        index.insert(Point::new(5, 5), 1);
        index.insert(Point::new(0, 0), 0);

        assert_eq!(index.query_point(Point::new(0, 0)), vec![0, 2]);
        assert_eq!(index.query_point(Point::new(5, 5)), vec![1]);
        assert!(index.query_point(Point::new(1, 0)).is_empty());
    }

    #[test]
    fn board_scale_coordinates() {
        let mut index = SpatialIndex::new();
        for i in 0..40 {
            index.insert(Point::new(99_999 - i * 2_000, 79_999 - i * 1_500), i as usize);
        }
        index.insert(Point::new(-99_999, -79_999), 40);

        assert_eq!(index.query_point(Point::new(99_999, 79_999)), vec![0]);
        assert_eq!(index.query_point(Point::new(99_999 - 39 * 2_000, 79_999 - 39 * 1_500)), vec![39]);
        assert_eq!(index.query_point(Point::new(-99_999, -79_999)), vec![40]);
        assert!(index.query_point(Point::new(99_998, 79_999)).is_empty());
    }
}
