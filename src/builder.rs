use tracing::info;

use crate::distance::all_pairs;
use crate::error::{BuildError, BuildResult};
use crate::graph::nearest_neighbors;
use crate::grid::Grid;
use crate::legend::Legend;
use crate::occupant::extract;
use crate::rules::{apply, parse_rules};
use crate::social::SocialGraph;

/// Runs the whole pipeline over a map-and-rules text with one [`Legend`].
///
/// A builder holds no per-build state, so calling [`Self::build`] twice on the same input yields identical graphs.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    legend: Legend,
}

impl GraphBuilder {
    /// A builder reading maps with `legend`.
    pub fn with_legend(legend: Legend) -> Self {
        Self { legend }
    }

    /// The legend in use.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Mutable access to the legend, for chaining its setters.
    pub fn legend_mut(&mut self) -> &mut Legend {
        &mut self.legend
    }

    /// Parse `text`, classify occupants, measure distances, link nearest neighbors and apply the rules.
    ///
    /// Fails with [`BuildError::MalformedInput`] if no line contains a wall and with [`BuildError::NoOccupants`] if the map is empty of people.
    pub fn build(&self, text: &str) -> BuildResult<SocialGraph> {
        let grid = Grid::parse(text, &self.legend)?;

        let occupants = extract(&grid, &self.legend);
        if occupants.is_empty() {
            return Err(BuildError::NoOccupants);
        }

        let distances = all_pairs(&grid, &occupants);
        let graph = nearest_neighbors(&distances);
        debug_assert!(graph.is_well_formed());

        let rules = parse_rules(grid.rule_lines());
        let graph = apply(graph, &occupants, &distances, &rules);
        debug_assert!(graph.is_well_formed());

        info!(occupants = occupants.len(), edges = graph.edges().len(), "built social graph");
        Ok(SocialGraph::new(occupants, distances, graph, rules))
    }
}
