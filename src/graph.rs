use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use tracing::debug;

use crate::distance::DistanceMatrix;

/// Undirected, loop-free adjacency between occupants, indexed like the occupant list.
///
/// Every mutation touches `(i, j)` and `(j, i)` together, so the matrix stays symmetric.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjacencyGraph(pub(crate) Array2<bool>);

impl AdjacencyGraph {
    /// A graph over `n` occupants without any edges.
    pub fn empty(n: usize) -> Self {
        Self(Array2::from_elem((n, n), false))
    }

    /// Number of occupants covered.
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    /// Whether the graph covers no occupants at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether occupants `i` and `j` share an edge.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.0.get((i, j)).copied().unwrap_or(false)
    }

    /// Link `i` and `j`. Self-loops are silently refused.
    pub fn connect(&mut self, i: usize, j: usize) {
        if i != j {
            self.0[(i, j)] = true;
            self.0[(j, i)] = true;
        }
    }

    /// Unlink `i` and `j`.
    pub fn disconnect(&mut self, i: usize, j: usize) {
        self.0[(i, j)] = false;
        self.0[(j, i)] = false;
    }

    /// Number of neighbors of `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.0.row(i).iter().filter(|linked| **linked).count()
    }

    /// Every edge once, as `(i, j)` with `i < j`, in row-major order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.0.indexed_iter()
            .filter(|((i, j), linked)| **linked && i < j)
            .map(|(index, _)| index)
            .collect_vec()
    }

    /// Whether the matrix is symmetric with an all-false diagonal.
    pub fn is_well_formed(&self) -> bool {
        self.0 == self.0.t() && self.0.diag().iter().all(|linked| !linked)
    }

    /// The same edges as a [`petgraph`] graph whose nodes are occupant indices. Isolated occupants are kept as nodes.
    pub fn to_graphmap(&self) -> UnGraphMap<usize, ()> {
        let mut graph = UnGraphMap::with_capacity(self.len(), self.edges().len());
        for i in 0..self.len() {
            graph.add_node(i);
        }
        for (i, j) in self.edges() {
            graph.add_edge(i, j, ());
        }
        graph
    }

    /// The 0/1 matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.0.rows()
            .into_iter()
            .map(|row| row.iter().map(|linked| u8::from(*linked)).collect_vec())
            .collect_vec()
    }
}

/// Link every occupant to all of its co-minimal neighbors, then take the union of both directions.
///
/// Occupants that cannot reach anyone stay isolated.
pub(crate) fn nearest_neighbors(distances: &DistanceMatrix) -> AdjacencyGraph {
    let n = distances.len();
    let mut proposed = Array2::from_elem((n, n), false);

    for i in 0..n {
        let Some(nearest) = distances.reachable_from(i).map(|(_, d)| d).min() else {
            continue;
        };
        for (j, _) in distances.reachable_from(i).filter(|(_, d)| *d == nearest) {
            proposed[(i, j)] = true;
        }
    }

    // nearest-neighbor is not a symmetric relation; i may be nearest to j without the converse
    let mut graph = AdjacencyGraph::empty(n);
    for (i, j) in (0..n).tuple_combinations() {
        if proposed[(i, j)] || proposed[(j, i)] {
            graph.connect(i, j);
        }
    }

    debug!(edges = graph.edges().len(), "linked nearest neighbors");
    graph
}
