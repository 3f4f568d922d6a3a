use super::point::Point;

/// Axis-aligned box in board units. `min` and `max` are both inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub min: Point<i32>,
    pub max: Point<i32>,
}

impl Rect {
    pub fn new(min: Point<i32>, max: Point<i32>) -> Self {
        Self { min, max }
    }

    pub fn from_points(a: Point<i32>, b: Point<i32>) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn around(center: Point<i32>, half_w: i32, half_h: i32) -> Self {
        Self::from_points(
            Point::new(center.x - half_w, center.y - half_h),
            Point::new(center.x + half_w, center.y + half_h),
        )
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn inflate(&self, margin: i32) -> Rect {
        Rect::new(
            Point::new(self.min.x - margin, self.min.y - margin),
            Point::new(self.max.x + margin, self.max.y + margin),
        )
    }

    pub fn merge(&self, other: &Rect) -> Rect {
        Rect::new(
            Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    pub fn contains(&self, p: Point<i32>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_normalizes_corners() {
        let r = Rect::from_points(Point::new(10, -5), Point::new(-10, 5));
        assert_eq!(r.min, Point::new(-10, -5));
        assert_eq!(r.max, Point::new(10, 5));
        assert_eq!(r.width(), 20);
    }

    #[test]
    fn merge_and_inflate() {
        let a = Rect::around(Point::new(0, 0), 5, 5);
        let b = Rect::around(Point::new(20, 0), 5, 5);
        let m = a.merge(&b).inflate(1);
        assert_eq!(m.min, Point::new(-6, -6));
        assert_eq!(m.max, Point::new(26, 6));
        assert!(m.contains(a.min) && m.contains(b.max));
        assert!(!a.contains(b.min));
        assert!(m.contains(Point::new(26, 6)));
    }
}
