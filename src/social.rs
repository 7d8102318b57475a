use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use serde::{Serialize, Serializer};

use crate::distance::DistanceMatrix;
use crate::graph::AdjacencyGraph;
use crate::legend::Category;
use crate::location::Location;
use crate::occupant::Occupant;
use crate::rules::Rule;

/// The finished graph: occupants in discovery order and who is linked to whom.
///
/// Every per-occupant list and both matrices share the same indexing.
/// [`SocialGraph`]s should be made with a [`GraphBuilder`](crate::GraphBuilder).
#[derive(Clone, Debug)]
pub struct SocialGraph {
    pub(crate) occupants: Vec<Occupant>,
    pub(crate) distances: DistanceMatrix,
    pub(crate) adjacency: AdjacencyGraph,
    pub(crate) rules: Vec<Rule>,
    pub(crate) index_by_id: HashMap<String, usize>,
}

impl SocialGraph {
    pub(crate) fn new(occupants: Vec<Occupant>, distances: DistanceMatrix, adjacency: AdjacencyGraph, rules: Vec<Rule>) -> Self {
        let index_by_id = occupants.iter()
            .enumerate()
            .map(|(index, occupant)| (occupant.id.clone(), index))
            .collect();

        Self { occupants, distances, adjacency, rules, index_by_id }
    }

    /// Number of occupants.
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    /// Always false for a built graph; kept for symmetry with [`Self::len`].
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// The occupants, in canonical order.
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Occupant identifiers, in canonical order.
    pub fn ids(&self) -> Vec<&str> {
        self.occupants.iter().map(|o| o.id.as_str()).collect_vec()
    }

    /// Occupant categories, in canonical order.
    pub fn categories(&self) -> Vec<Category> {
        self.occupants.iter().map(|o| o.category).collect_vec()
    }

    /// Occupant positions, in canonical order.
    pub fn positions(&self) -> Vec<Location> {
        self.occupants.iter().map(|o| o.location).collect_vec()
    }

    /// Index of the occupant called `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// The final adjacency.
    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    /// The pairwise walking distances the graph was derived from.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The recognized rules that were applied, deduplicated, in input order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether occupants `i` and `j` are linked.
    pub fn is_linked(&self, i: usize, j: usize) -> bool {
        self.adjacency.contains(i, j)
    }

    /// Every edge once, as `(i, j)` with `i < j`.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency.edges()
    }

    /// Number of neighbors of occupant `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.adjacency.degree(i)
    }

    /// See [`AdjacencyGraph::to_graphmap`].
    pub fn to_graphmap(&self) -> UnGraphMap<usize, ()> {
        self.adjacency.to_graphmap()
    }
}

#[derive(Serialize)]
struct Export<'a> {
    nodes: Vec<&'a str>,
    categories: Vec<Category>,
    positions: Vec<Location>,
    matrix: Vec<Vec<u8>>,
    edges: Vec<(usize, usize)>,
    rules: Vec<String>,
}

impl Serialize for SocialGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Export {
            nodes: self.ids(),
            categories: self.categories(),
            positions: self.positions(),
            matrix: self.adjacency.to_rows(),
            edges: self.edges(),
            rules: self.rules.iter().map(Rule::to_string).collect_vec(),
        }.serialize(serializer)
    }
}

impl Display for SocialGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.adjacency.to_rows() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
