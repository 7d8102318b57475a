use std::collections::VecDeque;

use itertools::Itertools;
use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::grid::Grid;
use crate::location::Location;
use crate::occupant::Occupant;
use crate::shape::SquareStep;

/// Shortest walking distances between every pair of occupants, indexed like the occupant list.
///
/// `None` means no path exists. The diagonal holds `Some(0)` and is never a nearest-neighbor candidate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistanceMatrix(pub(crate) Array2<Option<usize>>);

impl DistanceMatrix {
    /// Number of occupants covered.
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    /// Whether the matrix covers no occupants at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of orthogonal moves from occupant `from` to occupant `to`, or `None` if walled off (or out of range).
    pub fn get(&self, from: usize, to: usize) -> Option<usize> {
        self.0.get((from, to)).copied().flatten()
    }

    /// Every other occupant reachable from `from`, with its distance.
    pub fn reachable_from(&self, from: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.row(from)
            .into_iter()
            .enumerate()
            .filter(move |(to, _)| *to != from)
            .filter_map(|(to, distance)| distance.map(|d| (to, d)))
    }

    /// Whether `d(i, j) == d(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.0 == self.0.t()
    }
}

/// Walking distance from `start` to every tile, by breadth-first search over non-wall tiles.
fn flood(passable: &Array2<bool>, start: Location) -> Array2<Option<usize>> {
    let mut depths = Array2::from_elem(passable.raw_dim(), None);
    let mut queue = VecDeque::new();

    depths[start.as_index()] = Some(0);
    queue.push_back((start, 0));

    while let Some((location, depth)) = queue.pop_front() {
        for neighbor in SquareStep::neighbors_of(location) {
            // out of bounds reads as impassable
            if !passable.get(neighbor.as_index()).copied().unwrap_or(false) {
                continue;
            }
            if depths[neighbor.as_index()].is_none() {
                depths[neighbor.as_index()] = Some(depth + 1);
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    depths
}

/// Run one search per occupant and gather the distances to every other occupant.
///
/// The searches only read the shared grid, so they are fanned out over the rayon pool and joined in occupant order.
pub(crate) fn all_pairs(grid: &Grid, occupants: &[Occupant]) -> DistanceMatrix {
    let passable = grid.passability();

    let rows: Vec<Vec<Option<usize>>> = occupants.par_iter()
        .map(|source| {
            let depths = flood(passable, source.location);
            occupants.iter()
                .map(|target| depths.get(target.location.as_index()).copied().flatten())
                .collect_vec()
        })
        .collect();

    let matrix = DistanceMatrix(Array2::from_shape_fn((occupants.len(), occupants.len()), |(i, j)| rows[i][j]));
    debug_assert!(matrix.is_symmetric(), "grid distances must be symmetric");
    debug!(occupants = matrix.len(), "computed pairwise distances");

    matrix
}
