use crate::db::indices::PadId;
use crate::db::layer::{LayerId, LayerMask};
use crate::geom::angle;
use crate::geom::point::Point;
use crate::geom::rect::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackKind {
    Segment,
    Via,
}

/// Drawing shape of a segment. For `Arc` and `Circle` the item's `start` is
/// the center and `end` a point on the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackShape {
    Line,
    /// Sweep in tenths of a degree, signed.
    Arc { sweep: i32 },
    Circle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackItem {
    pub kind: TrackKind,
    pub shape: TrackShape,
    pub start: Point<i32>,
    pub end: Point<i32>,
    pub width: i32,
    pub layer: LayerId,
    pub layers: LayerMask,
    pub net: u32,
    /// Pad the start point lands on (BEGIN_ON_PAD).
    pub start_pad: Option<PadId>,
    /// Pad the end point lands on (END_ON_PAD).
    pub end_pad: Option<PadId>,
}

impl TrackItem {
    pub fn segment(start: Point<i32>, end: Point<i32>, width: i32, layer: LayerId) -> Self {
        Self {
            kind: TrackKind::Segment,
            shape: TrackShape::Line,
            start,
            end,
            width,
            layer,
            layers: LayerMask::from_layer(layer),
            net: 0,
            start_pad: None,
            end_pad: None,
        }
    }

    /// A via spanning every layer between `from` and `to`.
    pub fn via(pos: Point<i32>, diameter: i32, from: LayerId, to: LayerId) -> Self {
        Self {
            kind: TrackKind::Via,
            shape: TrackShape::Circle,
            start: pos,
            end: pos,
            width: diameter,
            layer: from.max(to),
            layers: LayerMask::span(from, to),
            net: 0,
            start_pad: None,
            end_pad: None,
        }
    }

    pub fn arc(
        center: Point<i32>,
        start_point: Point<i32>,
        sweep: i32,
        width: i32,
        layer: LayerId,
    ) -> Self {
        Self {
            shape: TrackShape::Arc { sweep },
            ..Self::segment(center, start_point, width, layer)
        }
    }

    pub fn with_net(mut self, net: u32) -> Self {
        self.net = net;
        self
    }

    pub fn is_via(&self) -> bool {
        self.kind == TrackKind::Via
    }

    pub fn layer_mask(&self) -> LayerMask {
        self.layers
    }

    pub fn touches(&self, pos: Point<i32>) -> bool {
        self.start == pos || self.end == pos
    }

    /// The endpoint opposite to `pos`. A via returns its own position.
    pub fn other_end(&self, pos: Point<i32>) -> Point<i32> {
        if pos == self.start { self.end } else { self.start }
    }

    pub fn begin_on_pad(&self) -> bool {
        self.start_pad.is_some()
    }

    pub fn end_on_pad(&self) -> bool {
        self.end_pad.is_some()
    }

    /// Exchanges the two endpoints together with their pad attachments.
    pub fn swap_ends(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        std::mem::swap(&mut self.start_pad, &mut self.end_pad);
    }

    /// Copper length. Vias contribute nothing, arcs use radius times sweep.
    pub fn length(&self) -> f64 {
        match (self.kind, self.shape) {
            (TrackKind::Via, _) => 0.0,
            (_, TrackShape::Line) => self.start.distance(&self.end),
            (_, TrackShape::Arc { sweep }) => {
                self.start.distance(&self.end) * angle::to_radians(sweep).abs()
            }
            (_, TrackShape::Circle) => self.start.distance(&self.end) * std::f64::consts::TAU,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        let half = self.width / 2;
        match self.shape {
            TrackShape::Line => Rect::from_points(self.start, self.end).inflate(half),
            TrackShape::Arc { .. } | TrackShape::Circle => {
                let r = self.start.distance(&self.end).ceil() as i32;
                if self.is_via() {
                    Rect::around(self.start, half, half)
                } else {
                    Rect::around(self.start, r + half, r + half)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadShape {
    Circle,
    Rect,
    Oval,
    /// Rectangle whose opposite sides differ by `delta` (x skews the top and
    /// bottom edges, y the left and right ones).
    Trapezoid { delta: Point<i32> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pad {
    pub name: String,
    pub position: Point<i32>,
    /// Shape offset from `position`, in the pad's unrotated frame.
    pub offset: Point<i32>,
    pub size: Point<i32>,
    pub shape: PadShape,
    /// Orientation in tenths of a degree.
    pub orientation: i32,
    pub layers: LayerMask,
    /// Package-internal length from the pad to the die.
    pub die_length: i32,
}

impl Pad {
    pub fn new(name: impl Into<String>, position: Point<i32>, size: Point<i32>, shape: PadShape) -> Self {
        Self {
            name: name.into(),
            position,
            offset: Point::new(0, 0),
            size,
            shape,
            orientation: 0,
            layers: LayerMask::ALL_COPPER,
            die_length: 0,
        }
    }

    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_orientation(mut self, orientation: i32) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_die_length(mut self, die_length: i32) -> Self {
        self.die_length = die_length;
        self
    }

    /// Center of the copper shape: the position plus the rotated offset.
    pub fn shape_position(&self) -> Point<i32> {
        if self.offset == Point::new(0, 0) {
            return self.position;
        }
        self.position + angle::rotate_point(self.offset, self.orientation)
    }

    pub fn bounding_box(&self) -> Rect {
        let r = (self.size.x.max(self.size.y) as f64 * std::f64::consts::FRAC_1_SQRT_2).ceil() as i32;
        Rect::around(self.shape_position(), r, r)
    }
}
