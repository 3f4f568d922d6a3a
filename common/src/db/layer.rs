use std::fmt;
use std::ops::{BitOr, BitOrAssign};

pub type LayerId = u8;

pub const COPPER_LAYER_COUNT: LayerId = 16;
/// Copper layers are numbered from the solder side.
pub const BOTTOM_COPPER: LayerId = 0;
pub const TOP_COPPER: LayerId = COPPER_LAYER_COUNT - 1;

/// Set of board layers an item occupies, one bit per layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL_COPPER: LayerMask = LayerMask((1 << COPPER_LAYER_COUNT) - 1);

    pub fn from_layer(layer: LayerId) -> Self {
        LayerMask(1u32.checked_shl(layer as u32).unwrap_or(0))
    }

    /// Every layer between `a` and `b`, both included, in either order.
    pub fn span(a: LayerId, b: LayerId) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        (lo..=hi).fold(LayerMask::NONE, |m, l| m | LayerMask::from_layer(l))
    }

    pub fn contains(&self, layer: LayerId) -> bool {
        self.intersects(LayerMask::from_layer(layer))
    }

    pub fn intersects(&self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        LayerMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerMask({:#010x})", self.0)
    }
}
