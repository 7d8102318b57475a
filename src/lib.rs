#![warn(missing_docs)]

//! # `castlegraph`
//!
//! Turns a hand-drawn floor plan of a castle into the social graph consumed by a matching algorithm such as Blossom.
//! Build a [`GraphBuilder`], optionally with a custom [`Legend`], and call [`build()`](GraphBuilder::build) on the input text to get a [`SocialGraph`].
//!
//! The input is a map followed by rules:
//!
//! ```text
//! 🧱🧱🧱🧱🧱🧱
//! 🧱 🤴 👸   🧱
//! 🧱   🤹    🧱
//! 🧱  🛡️     🧱
//! 🧱🧱🧱🧱🧱🧱
//! JESTER DANCES WITH ALL
//! KING DOES NOT DANCE WITH QUEEN
//! ```
//!
//! The map ends at the last line containing a wall; every non-blank line after it is a rule.
//!
//! # Internals
//! The graph is made in one forward pass:
//!
//! 1. The map is squared off into a grid of characters and a passability mask ([`Grid`]).
//! 2. Every non-wall, non-entrance, non-blank symbol becomes an [`Occupant`] with a [`Category`].
//! Shared symbols such as the royal ones resolve to a primary category until their quota runs out, then to a secondary one.
//! 3. One breadth-first search per occupant gives the walking distance to every other occupant ([`DistanceMatrix`]).
//! 4. Each occupant is linked to all of its nearest reachable neighbors; the relation is then made symmetric ([`AdjacencyGraph`]).
//! 5. `<CATEGORY> DANCES WITH ALL` links a category to everyone reachable; `<A> DOES NOT DANCE WITH <B>` then removes edges between two categories.
//!
//! Unknown symbols and unreadable rule lines never fail a build; see [`BuildError`] for what does.

pub use builder::GraphBuilder;
pub use distance::DistanceMatrix;
pub use error::{BuildError, BuildResult, LegendError};
pub use graph::AdjacencyGraph;
pub use grid::{Grid, Tile};
pub use legend::{Category, Legend, SymbolRole, DEFAULT_QUOTA};
pub use location::Location;
pub use occupant::Occupant;
pub use rules::{parse_rule, parse_rules, ParsedRule, Rule};
pub use social::SocialGraph;

pub(crate) mod builder;
pub(crate) mod distance;
pub(crate) mod error;
pub(crate) mod graph;
pub(crate) mod grid;
pub(crate) mod legend;
pub(crate) mod location;
pub(crate) mod occupant;
pub(crate) mod rules;
pub(crate) mod shape;
pub(crate) mod social;
mod tests;
