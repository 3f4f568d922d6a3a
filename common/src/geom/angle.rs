//! Board angles are integers in tenths of a degree, counted the way the board
//! coordinate system (Y pointing down) sees them.

use super::point::Point;

pub const FULL_TURN: i32 = 3600;
pub const QUARTER_TURN: i32 = 900;

pub fn normalize(angle: i32) -> i32 {
    angle.rem_euclid(FULL_TURN)
}

pub fn to_radians(angle: i32) -> f64 {
    (angle as f64 / 10.0).to_radians()
}

/// Rotates `(x, y)` by `-angle` around the origin: a vector whose direction
/// is `angle` lands on the positive X axis. Quarter turns are exact.
pub fn rotate(x: f64, y: f64, angle: i32) -> (f64, f64) {
    match normalize(angle) {
        0 => (x, y),
        900 => (y, -x),
        1800 => (-x, -y),
        2700 => (-y, x),
        a => {
            let (sin, cos) = to_radians(a).sin_cos();
            (y * sin + x * cos, y * cos - x * sin)
        }
    }
}

pub fn rotate_point(p: Point<i32>, angle: i32) -> Point<i32> {
    let (x, y) = rotate(p.x as f64, p.y as f64, angle);
    Point::new(x.round() as i32, y.round() as i32)
}
