use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use tracing::debug;
use unordered_pair::UnorderedPair;

use crate::distance::DistanceMatrix;
use crate::graph::AdjacencyGraph;
use crate::legend::Category;
use crate::occupant::Occupant;

/// A relationship directive from the rule section of the input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Rule {
    /// `<CATEGORY> DANCES WITH ALL`: every occupant of the category is linked to everyone it can walk to.
    ConnectAll(Category),
    /// `<A> DOES NOT DANCE WITH <B>`: no edge may join an `A` occupant and a `B` occupant.
    Forbid(UnorderedPair<Category>),
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ConnectAll(category) => write!(f, "{category} DANCES WITH ALL"),
            Rule::Forbid(UnorderedPair(a, b)) => write!(f, "{a} DOES NOT DANCE WITH {b}"),
        }
    }
}

/// The outcome of reading one rule line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParsedRule {
    /// The line matched one of the two sentence patterns with known categories.
    Recognized(Rule),
    /// Anything else. Not an error.
    Ignored,
}

impl FromStr for ParsedRule {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_rule(s))
    }
}

fn keyword(token: &str, expected: &str) -> bool {
    token.eq_ignore_ascii_case(expected)
}

fn category(token: &str) -> Option<Category> {
    // categories are plain words; this keeps "KING," or "QUEEN!" out
    if !token.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Category::from_str(token).ok()
}

/// Match `line` against the two rule sentences, ignoring case and surrounding or repeated whitespace.
pub fn parse_rule(line: &str) -> ParsedRule {
    let tokens = line.split_whitespace().collect_vec();

    let rule = match tokens.as_slice() {
        [who, dances, with, all]
        if keyword(dances, "DANCES") && keyword(with, "WITH") && keyword(all, "ALL") => {
            category(who).map(Rule::ConnectAll)
        }
        [a, does, not, dance, with, b]
        if keyword(does, "DOES") && keyword(not, "NOT") && keyword(dance, "DANCE") && keyword(with, "WITH") => {
            category(a).zip(category(b)).map(|(a, b)| Rule::Forbid(UnorderedPair(a, b)))
        }
        _ => None,
    };

    match rule {
        Some(rule) => ParsedRule::Recognized(rule),
        None => {
            debug!(line, "ignoring rule line");
            ParsedRule::Ignored
        }
    }
}

/// Parse every line and keep the recognized rules, first occurrence of each, in input order.
pub fn parse_rules<S: AsRef<str>>(lines: &[S]) -> Vec<Rule> {
    lines.iter()
        .filter_map(|line| match parse_rule(line.as_ref()) {
            ParsedRule::Recognized(rule) => Some(rule),
            ParsedRule::Ignored => None,
        })
        .unique()
        .collect_vec()
}

/// Rewrite `graph` according to `rules`.
///
/// Every [`Rule::ConnectAll`] is applied before any [`Rule::Forbid`], so prohibitions always have the last word.
/// Blanket links are only made along existing paths; walled-off pairs stay apart.
pub(crate) fn apply(mut graph: AdjacencyGraph, occupants: &[Occupant], distances: &DistanceMatrix, rules: &[Rule]) -> AdjacencyGraph {
    let by_category: HashMap<Category, Vec<usize>> = occupants.iter()
        .enumerate()
        .map(|(index, occupant)| (occupant.category, index))
        .into_group_map();
    let members = |category: &Category| by_category.get(category).map(Vec::as_slice).unwrap_or_default();

    for rule in rules {
        if let Rule::ConnectAll(category) = rule {
            for &i in members(category) {
                for (j, _) in distances.reachable_from(i) {
                    graph.connect(i, j);
                }
            }
        }
    }

    for rule in rules {
        if let Rule::Forbid(UnorderedPair(a, b)) = rule {
            for (&i, &j) in members(a).iter().cartesian_product(members(b)) {
                graph.disconnect(i, j);
            }
        }
    }

    debug!(rules = rules.len(), edges = graph.edges().len(), "applied rules");
    graph
}
