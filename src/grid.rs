use itertools::Itertools;
use ndarray::Array2;
use tracing::debug;

use crate::error::{BuildError, BuildResult};
use crate::legend::Legend;
use crate::location::{Coord, Location};

/// Padding used to square off short map lines. Treated as bare floor.
pub(crate) const BLANK: char = ' ';

/// A single cell of the map, one Unicode scalar value wide.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tile {
    /// Where this tile sits.
    pub location: Location,
    /// The raw character found here.
    pub symbol: char,
    /// Whether orthogonal movement may pass through this tile, i.e. it is not part of a wall.
    pub passable: bool,
}

/// A rectangular map with the rule lines that followed it.
///
/// The map is everything up to and including the last line holding a wall symbol; any non-blank line after it is a rule.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<char>,
    passable: Array2<bool>,
    rule_lines: Vec<String>,
}

impl Grid {
    /// Split `text` into map and rules and square the map off.
    ///
    /// Fails with [`BuildError::MalformedInput`] when no line contains a wall symbol of `legend`.
    pub fn parse(text: &str, legend: &Legend) -> BuildResult<Self> {
        let lines = text.lines().collect_vec();
        let last_wall_line = lines.iter()
            .rposition(|line| legend.walls().any(|wall| line.contains(wall)))
            .ok_or(BuildError::MalformedInput)?;

        let rows = lines[..=last_wall_line].iter()
            .map(|line| line.chars().collect_vec())
            .collect_vec();
        let rule_lines = lines[last_wall_line + 1..].iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect_vec();

        // the wall line is non-empty, so width >= 1
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cells = Array2::from_shape_fn((rows.len(), width), |(r, c)| {
            rows[r].get(c).copied().unwrap_or(BLANK)
        });

        let walls = legend.walls().map(|w| w.chars().collect_vec()).collect_vec();
        let mut passable = Array2::from_elem(cells.raw_dim(), true);
        for (r, row) in cells.rows().into_iter().enumerate() {
            let row = row.to_vec();
            for c in 0..width {
                for wall in walls.iter().filter(|wall| row[c..].starts_with(wall)) {
                    (c..c + wall.len()).for_each(|covered| passable[(r, covered)] = false);
                }
            }
        }

        debug!(rows = cells.nrows(), cols = cells.ncols(), rules = rule_lines.len(), "parsed map");

        Ok(Self { cells, passable, rule_lines })
    }

    /// `(rows, columns)` of the squared-off map.
    pub fn dims(&self) -> (Coord, Coord) {
        self.cells.dim()
    }

    /// The character at `location`, or `None` outside the map.
    pub fn symbol_at(&self, location: Location) -> Option<char> {
        self.cells.get(location.as_index()).copied()
    }

    /// Whether `location` is inside the map and not a wall.
    pub fn is_passable(&self, location: Location) -> bool {
        self.passable.get(location.as_index()).copied().unwrap_or(false)
    }

    /// The tile at `location`, or `None` outside the map.
    pub fn tile(&self, location: Location) -> Option<Tile> {
        self.symbol_at(location).map(|symbol| Tile {
            location,
            symbol,
            passable: self.is_passable(location),
        })
    }

    /// Every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.indexed_iter().map(|(index, symbol)| Tile {
            location: Location::from(index),
            symbol: *symbol,
            passable: self.passable[index],
        })
    }

    /// The non-blank lines following the map, untrimmed.
    pub fn rule_lines(&self) -> &[String] {
        &self.rule_lines
    }

    pub(crate) fn row(&self, row: Coord) -> Vec<char> {
        self.cells.row(row).to_vec()
    }

    pub(crate) fn passability(&self) -> &Array2<bool> {
        &self.passable
    }
}
