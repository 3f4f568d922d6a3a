use std::fmt;

/// Declares a `u32` handle type printed as `<tag><n>`, e.g. `T12`.
macro_rules! define_index {
    ($name:ident, $tag:literal) => {
        /// Stable handle into a board collection. Handles survive reordering
        /// of the board sequence and are never reused after removal.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            #[inline(always)]
            pub fn new(id: usize) -> Self {
                Self(id as u32)
            }
            #[inline(always)]
            pub fn index(&self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

define_index!(TrackId, "T");
define_index!(PadId, "P");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_print_with_their_tag() {
        assert_eq!(format!("{:?}", TrackId::new(12)), "T12");
        assert_eq!(PadId::new(3).to_string(), "P3");
        assert_eq!(TrackId::new(7).index(), 7);
    }
}
