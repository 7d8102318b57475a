use itertools::Itertools;
use strum::VariantArray;

use crate::location::Location;

/// The four orthogonal moves allowed on a map. Diagonal movement is not a thing here.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub(crate) enum SquareStep {
    Up,
    Down,
    Left,
    Right,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside the map; callers check bounds with [`ndarray::Array2::get`].
    pub(crate) fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// Get all neighbors of a [`Location`] in "theory", by attempting every step direction.
    pub(crate) fn neighbors_of(location: Location) -> Vec<Location> {
        Self::VARIANTS.iter()
            .map(|dir| dir.attempt_from(location))
            .collect_vec()
    }
}
