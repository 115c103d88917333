//! Typed `u32` indices for network lines, index vertices, and stops.
//!
//! The inner integer is `pub`; prefer `.index()` when indexing a `Vec`.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Position of a LineString in its road network.
    pub struct LineId;
}

typed_id! {
    /// Global vertex number assigned when the spatial index is built.
    pub struct VertexId;
}

typed_id! {
    /// One bus stop, i.e. one cluster centroid.
    pub struct StopId;
}
