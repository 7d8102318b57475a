use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::grid::Grid;
use crate::legend::{Category, Legend, SymbolRole};
use crate::location::Location;

/// A person standing on one tile of the map.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Occupant {
    /// `<symbol>#<n>`, where `n` counts occupants sharing both symbol and category, starting at 1.
    pub id: String,
    /// The symbol as written in the map, possibly several characters long.
    pub symbol: String,
    /// What rules know this occupant as.
    pub category: Category,
    /// Position of the first character of [`Self::symbol`].
    pub location: Location,
}

/// Remaining primary slots per family, for one extraction pass only.
struct QuotaLedger<'a> {
    legend: &'a Legend,
    used: HashMap<Category, usize>,
}

impl<'a> QuotaLedger<'a> {
    fn new(legend: &'a Legend) -> Self {
        Self { legend, used: HashMap::new() }
    }

    fn resolve(&mut self, role: SymbolRole) -> Category {
        match role {
            SymbolRole::Fixed(category) => category,
            SymbolRole::Family { primary, secondary } => {
                let used = self.used.entry(primary).or_default();
                if *used < self.legend.quota_for(primary) {
                    *used += 1;
                    primary
                } else {
                    secondary
                }
            }
        }
    }
}

/// Scan `grid` row by row and classify every occupant, in discovery order.
///
/// At each position the longest legend symbol is tried first; otherwise the single character stands alone.
/// Walls, entrances and whitespace are skipped. Anything else not in the legend becomes a [`Legend::fallback`] occupant.
pub(crate) fn extract(grid: &Grid, legend: &Legend) -> Vec<Occupant> {
    let candidates = legend.match_candidates();
    let mut ledger = QuotaLedger::new(legend);
    let mut counters: HashMap<(String, Category), usize> = HashMap::new();
    let mut occupants = Vec::new();

    let (rows, _) = grid.dims();
    for r in 0..rows {
        let row = grid.row(r);
        let mut c = 0;
        while c < row.len() {
            // the passability mask is the one definition of a wall, including leftovers of overlapping wall runs
            if !grid.is_passable(Location(r, c)) {
                c += 1;
                continue;
            }

            let (symbol, advance) = match candidates.iter().find(|candidate| row[c..].starts_with(candidate)) {
                Some(candidate) => (candidate.iter().collect::<String>(), candidate.len()),
                None => (row[c].to_string(), 1),
            };

            if legend.is_wall(&symbol) || legend.is_entrance(&symbol) {
                c += advance;
                continue;
            }

            let category = match legend.role_of(&symbol) {
                Some(role) => Some(ledger.resolve(role)),
                None if symbol.chars().any(|ch| !ch.is_whitespace()) => Some(legend.fallback()),
                None => None,
            };

            if let Some(category) = category {
                let ordinal = counters.entry((symbol.clone(), category)).or_default();
                *ordinal += 1;
                let occupant = Occupant {
                    id: format!("{symbol}#{ordinal}"),
                    symbol,
                    category,
                    location: Location(r, c),
                };
                trace!(id = %occupant.id, %category, location = %occupant.location, "found occupant");
                occupants.push(occupant);
            }

            c += advance;
        }
    }

    debug!(count = occupants.len(), "classified occupants");
    occupants
}
