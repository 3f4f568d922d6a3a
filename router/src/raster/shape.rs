use super::{Brush, draw_arc, draw_circle, fill_circle, fill_rotated_rect, fill_segment};
use crate::grid::cell::VIA_IMPOSSIBLE;
use crate::grid::{CellState, RoutingGrid, Sides, WriteOp};
use pcb_common::db::item::{Pad, PadShape, TrackItem, TrackShape};
use pcb_common::db::layer::LayerMask;
use pcb_common::geom::angle;
use pcb_common::geom::point::Point;

/// A primitive the rasterizer knows how to paint. Sizes are full widths and
/// diameters; angles are tenths of a degree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle {
        center: Point<i32>,
        diameter: i32,
    },
    /// `skew` is the trapezoid delta; the painted area is the enclosing
    /// rectangle of the trapezoid.
    Rect {
        center: Point<i32>,
        size: Point<i32>,
        angle: i32,
        skew: Point<i32>,
    },
    /// Rounded along its longer side.
    Oval {
        center: Point<i32>,
        size: Point<i32>,
        angle: i32,
    },
    Segment {
        start: Point<i32>,
        end: Point<i32>,
        width: i32,
    },
    Arc {
        center: Point<i32>,
        start: Point<i32>,
        sweep: i32,
        width: i32,
    },
    CircleOutline {
        center: Point<i32>,
        point: Point<i32>,
        width: i32,
    },
}

impl Shape {
    pub fn of_pad(pad: &Pad) -> Self {
        let center = pad.shape_position();
        match pad.shape {
            PadShape::Circle => Shape::Circle {
                center,
                diameter: pad.size.x,
            },
            PadShape::Rect => Shape::Rect {
                center,
                size: pad.size,
                angle: pad.orientation,
                skew: Point::new(0, 0),
            },
            PadShape::Trapezoid { delta } => Shape::Rect {
                center,
                size: pad.size,
                angle: pad.orientation,
                skew: delta,
            },
            PadShape::Oval => Shape::Oval {
                center,
                size: pad.size,
                angle: pad.orientation,
            },
        }
    }

    /// Shape of a non-via track item.
    pub fn of_track(item: &TrackItem) -> Self {
        match item.shape {
            TrackShape::Line => Shape::Segment {
                start: item.start,
                end: item.end,
                width: item.width,
            },
            TrackShape::Arc { sweep } => Shape::Arc {
                center: item.start,
                start: item.end,
                sweep,
                width: item.width,
            },
            TrackShape::Circle => Shape::CircleOutline {
                center: item.start,
                point: item.end,
                width: item.width,
            },
        }
    }
}

/// Paints `shape` inflated by `margin` on the sides `mask` maps to.
pub fn rasterize_shape<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    shape: &Shape,
    margin: i32,
    mask: LayerMask,
    value: CellState,
    op: WriteOp,
) -> usize {
    let brush = Brush::for_mask(grid, mask, op, value);
    paint_shape(grid, shape, margin, &brush)
}

fn paint_shape<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    shape: &Shape,
    margin: i32,
    brush: &Brush,
) -> usize {
    match *shape {
        Shape::Circle { center, diameter } => fill_circle(grid, center, diameter / 2 + margin, brush),
        Shape::Rect {
            center,
            size,
            angle,
            skew,
        } => {
            let half = Point::new(
                size.x / 2 + skew.y.abs() / 2 + margin,
                size.y / 2 + skew.x.abs() / 2 + margin,
            );
            fill_rotated_rect(grid, center, half, angle, brush)
        }
        Shape::Oval {
            center,
            size,
            angle: orientation,
        } => {
            let (long, short, axis) = if size.x >= size.y {
                (size.x, size.y, Point::new(1, 0))
            } else {
                (size.y, size.x, Point::new(0, 1))
            };
            let reach = (long - short) / 2;
            let offset = angle::rotate_point(Point::new(axis.x * reach, axis.y * reach), orientation);
            fill_segment(grid, center - offset, center + offset, short / 2 + margin, brush)
        }
        Shape::Segment { start, end, width } => fill_segment(grid, start, end, width / 2 + margin, brush),
        Shape::Arc {
            center,
            start,
            sweep,
            width,
        } => draw_arc(grid, center, start, sweep, width / 2 + margin, brush),
        Shape::CircleOutline {
            center,
            point,
            width,
        } => draw_circle(grid, center, point, width / 2 + margin, brush),
    }
}

/// Paints one pad, inflated by `margin`, on the sides its layers map to.
pub fn place_pad<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    pad: &Pad,
    value: CellState,
    margin: i32,
    op: WriteOp,
) -> usize {
    rasterize_shape(grid, &Shape::of_pad(pad), margin, pad.layers, value, op)
}

/// Paints one track item inflated by `margin`. A via covers every routing
/// side it spans, or both sides when `value` carries [`VIA_IMPOSSIBLE`].
pub fn place_track<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    item: &TrackItem,
    value: CellState,
    margin: i32,
    op: WriteOp,
) -> usize {
    let mut brush = Brush::for_mask(grid, item.layer_mask(), op, value);
    if item.is_via() {
        if value & VIA_IMPOSSIBLE != 0 {
            brush.sides = Sides::BOTH;
        }
        return fill_circle(grid, item.start, item.width / 2 + margin, &brush);
    }
    paint_shape(grid, &Shape::of_track(item), margin, &brush)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::cell::HOLE;
    use crate::grid::{DenseGrid, RoutingLayers, Side};
    use pcb_common::db::layer::{BOTTOM_COPPER, TOP_COPPER};
    use pcb_common::geom::coord::GridCoord;
    use pcb_common::geom::rect::Rect;
    use rstest::rstest;

    fn grid() -> DenseGrid {
        DenseGrid::new(
            Rect::new(Point::new(0, 0), Point::new(3000, 3000)),
            100,
            RoutingLayers::default(),
        )
        .unwrap()
    }

    #[test]
    fn circle_pad_with_margin() {
        let mut g = grid();
        let pad = Pad::new("P1", Point::new(1500, 1500), Point::new(200, 200), PadShape::Circle);
        // Radius 100 + 100 margin: 13 centers within 200 of an on-grid point
        let written = place_pad(&mut g, &pad, HOLE, 100, WriteOp::Or);
        assert_eq!(written, 13);
        assert_eq!(g.occupied(Side::Top), 13);
        assert_eq!(g.occupied(Side::Bottom), 13);
    }

    #[test]
    fn pad_on_one_layer_paints_one_side() {
        let mut g = grid();
        let pad = Pad::new("P1", Point::new(1500, 1500), Point::new(300, 100), PadShape::Rect)
            .with_layers(LayerMask::from_layer(TOP_COPPER));
        place_pad(&mut g, &pad, HOLE, 0, WriteOp::Or);
        assert_eq!(g.occupied(Side::Bottom), 0);
        // cols 14..=16, row 15
        assert_eq!(g.occupied(Side::Top), 3);
    }

    #[test]
    fn trapezoid_paints_enclosing_rectangle() {
        let mut g = grid();
        let pad = Pad::new(
            "T1",
            Point::new(1500, 1500),
            Point::new(200, 200),
            PadShape::Trapezoid {
                delta: Point::new(200, 0),
            },
        );
        // Half extents (100, 200): cols 14..=16, rows 13..=17.
        assert_eq!(place_pad(&mut g, &pad, HOLE, 0, WriteOp::Or), 15);
    }

    #[rstest]
    #[case(0, GridCoord::new(15, 18), GridCoord::new(18, 15))]
    #[case(900, GridCoord::new(18, 15), GridCoord::new(15, 18))]
    fn oval_is_rounded_along_long_axis(
        #[case] orientation: i32,
        #[case] inside: GridCoord,
        #[case] outside: GridCoord,
    ) {
        let mut g = grid();
        let pad = Pad::new("O1", Point::new(1500, 1500), Point::new(800, 200), PadShape::Oval)
            .with_orientation(orientation);
        place_pad(&mut g, &pad, HOLE, 0, WriteOp::Or);
        assert_eq!(g.get(inside, Side::Top), HOLE);
        assert_eq!(g.get(outside, Side::Top), 0);
        // The rounded tips do not reach the bounding box corners.
        let corner = match orientation {
            0 => GridCoord::new(14, 19),
            _ => GridCoord::new(19, 14),
        };
        assert_eq!(g.get(corner, Side::Top), 0);
    }

    #[test]
    fn segment_on_bottom_layer() {
        let mut g = grid();
        let t = TrackItem::segment(Point::new(500, 500), Point::new(1500, 500), 100, BOTTOM_COPPER);
        let written = place_track(&mut g, &t, HOLE, 0, WriteOp::Or);
        assert_eq!(written, 11);
        assert_eq!(g.occupied(Side::Top), 0);
        assert_eq!(g.get(GridCoord::new(5, 10), Side::Bottom), HOLE);
    }

    #[test]
    fn via_impossible_reaches_both_sides() {
        let mut g = grid();
        let via = TrackItem::via(Point::new(1000, 1000), 200, 3, 5);
        // Inner layers only: not on any routing side.
        assert_eq!(place_track(&mut g, &via, HOLE, 0, WriteOp::Or), 0);
        let written = place_track(&mut g, &via, VIA_IMPOSSIBLE, 0, WriteOp::Or);
        assert_eq!(written, 5);
        assert_eq!(g.get(GridCoord::new(10, 10), Side::Top), VIA_IMPOSSIBLE);
        assert_eq!(g.get(GridCoord::new(10, 10), Side::Bottom), VIA_IMPOSSIBLE);
    }

    #[test]
    fn arc_track_dispatches_to_arc() {
        let mut g = grid();
        let arc = TrackItem::arc(Point::new(1500, 1500), Point::new(2500, 1500), 1800, 100, TOP_COPPER);
        assert!(place_track(&mut g, &arc, HOLE, 0, WriteOp::Or) > 0);
        // Half turn from (2500, 1500) ends at (500, 1500); the center stays empty.
        assert_eq!(g.get(GridCoord::new(15, 5), Side::Top), HOLE);
        assert_eq!(g.get(GridCoord::new(15, 15), Side::Top), 0);
        assert_eq!(g.occupied(Side::Bottom), 0);
    }
}
