use std::fmt::{Display, Formatter};

use ndarray::Ix;
use serde::Serialize;

pub(crate) type Coord = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Serialize)]
/// A tile position `(row, column)` on a map. The top left corner is `Location(0, 0)`.
///
/// Columns count Unicode scalar values, not bytes or terminal cells.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row, counting from the top of the map.
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column, counting from the left of the map.
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    // stepping off the top or left edge wraps to usize::MAX, which no grid can index
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
