use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::error::LegendError;

/// Number of occurrences of a family symbol resolved to the family's primary category when the legend names no quota.
pub const DEFAULT_QUOTA: usize = 1;

/// The closed set of roles an occupant can be resolved to. Rules refer to occupants only through these.
///
/// Names parse case-insensitively and print in upper case, e.g. `"jester".parse() == Ok(Category::Jester)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[derive(strum::Display, EnumString, IntoStaticStr, VariantArray, Serialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Category {
    King,
    Queen,
    Prince,
    Princess,
    Chief,
    Maid,
    Counselor,
    Elite,
    Knight,
    Bourgeoisie,
    Proletariat,
    Jester,
}

/// How a symbol in the legend resolves to a [`Category`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SymbolRole {
    /// Every occurrence resolves to the same category.
    Fixed(Category),
    /// The first occurrences resolve to `primary`, up to the quota registered for `primary`, and the rest to `secondary`.
    ///
    /// The quota is shared by every symbol naming the same `primary`.
    Family {
        /// Category handed out while the quota lasts.
        primary: Category,
        /// Category handed out once the quota is spent.
        secondary: Category,
    },
}

/// The lexicon used to read a map: which symbols are walls, which are entrances, and which category each occupant symbol gets.
///
/// [`Legend::default`] is the castle lexicon. Adjust it with the chained setters, or load overrides with [`Legend::from_toml_str`].
#[derive(Clone, Debug)]
pub struct Legend {
    walls: HashSet<String>,
    entrances: HashSet<String>,
    symbols: HashMap<String, SymbolRole>,
    quotas: HashMap<Category, usize>,
    fallback: Category,
}

impl Default for Legend {
    fn default() -> Self {
        let mut legend = Self::empty();
        legend
            .with_walls(["\u{1F9F1}", "#"])
            .with_entrances(["\u{1F3F0}"])
            // royals share a symbol; the first is the monarch, the rest are heirs
            .with_symbol("\u{1F934}", SymbolRole::Family { primary: Category::King, secondary: Category::Prince })
            .with_symbol("\u{1F478}", SymbolRole::Family { primary: Category::Queen, secondary: Category::Princess })
            .with_symbol("\u{1F6E1}\u{FE0F}", SymbolRole::Fixed(Category::Chief))
            .with_symbol("\u{1F469}\u{200D}\u{1F373}", SymbolRole::Fixed(Category::Maid))
            .with_symbol("\u{1F468}\u{200D}\u{1F393}", SymbolRole::Fixed(Category::Counselor))
            .with_symbol("\u{1F939}", SymbolRole::Fixed(Category::Jester))
            .with_symbol("\u{2694}\u{FE0F}", SymbolRole::Fixed(Category::Elite))
            .with_symbol("\u{1F9D1}\u{200D}\u{1F33E}", SymbolRole::Fixed(Category::Proletariat))
            .with_symbol("\u{1F3A9}", SymbolRole::Fixed(Category::Bourgeoisie))
            .with_symbol("\u{1F5E1}\u{FE0F}", SymbolRole::Fixed(Category::Knight))
            .with_symbol("\u{1F9DD}\u{200D}\u{2640}\u{FE0F}", SymbolRole::Fixed(Category::Elite))
            .with_quota(Category::King, DEFAULT_QUOTA)
            .with_quota(Category::Queen, DEFAULT_QUOTA);
        legend
    }
}

impl Legend {
    /// A legend with no walls, no entrances and no symbols. Every non-blank character becomes a [`Legend::fallback`] occupant.
    pub fn empty() -> Self {
        Self {
            walls: Default::default(),
            entrances: Default::default(),
            symbols: Default::default(),
            quotas: Default::default(),
            fallback: Category::Knight,
        }
    }

    /// Replace the set of wall symbols. Empty strings are skipped.
    pub fn with_walls<S: Into<String>>(&mut self, walls: impl IntoIterator<Item = S>) -> &mut Self {
        self.walls = walls.into_iter().map(Into::<String>::into).filter(|s| !s.is_empty()).collect();
        self
    }

    /// Replace the set of entrance symbols. Entrances are walkable floor and never occupants. Empty strings are skipped.
    pub fn with_entrances<S: Into<String>>(&mut self, entrances: impl IntoIterator<Item = S>) -> &mut Self {
        self.entrances = entrances.into_iter().map(Into::<String>::into).filter(|s| !s.is_empty()).collect();
        self
    }

    /// Map `symbol` to `role`, overriding any previous entry. An empty `symbol` is ignored.
    pub fn with_symbol(&mut self, symbol: impl Into<String>, role: SymbolRole) -> &mut Self {
        let symbol = symbol.into();
        if !symbol.is_empty() {
            self.symbols.insert(symbol, role);
        }
        self
    }

    /// Set how many family occurrences resolve to `primary` before falling back to the family's secondary category.
    pub fn with_quota(&mut self, primary: Category, quota: usize) -> &mut Self {
        self.quotas.insert(primary, quota);
        self
    }

    /// Set the category given to non-blank symbols absent from the symbol table.
    pub fn with_fallback(&mut self, category: Category) -> &mut Self {
        self.fallback = category;
        self
    }

    /// Load a legend from a TOML document, layered on top of [`Legend::default`].
    ///
    /// `walls` and `entrances`, when present, replace the defaults; `symbols` and `quotas` are merged over them.
    ///
    /// ```toml
    /// walls = ["#"]
    /// fallback = "PROLETARIAT"
    ///
    /// [symbols]
    /// "J" = "JESTER"
    /// "K" = { primary = "KING", secondary = "PRINCE" }
    ///
    /// [quotas]
    /// KING = 2
    /// ```
    pub fn from_toml_str(document: &str) -> Result<Self, LegendError> {
        let file: LegendFile = toml::from_str(document)?;
        let mut legend = Self::default();

        if let Some(walls) = file.walls {
            if walls.iter().any(String::is_empty) {
                return Err(LegendError::EmptySymbol);
            }
            legend.with_walls(walls);
        }
        if let Some(entrances) = file.entrances {
            if entrances.iter().any(String::is_empty) {
                return Err(LegendError::EmptySymbol);
            }
            legend.with_entrances(entrances);
        }
        if let Some(fallback) = file.fallback {
            legend.with_fallback(parse_category(&fallback)?);
        }

        // sorted so the first bad entry reported does not depend on hash order
        for (symbol, entry) in file.symbols.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)) {
            if symbol.is_empty() {
                return Err(LegendError::EmptySymbol);
            }
            let role = match entry {
                SymbolEntry::Fixed(name) => SymbolRole::Fixed(parse_category(&name)?),
                SymbolEntry::Family { primary, secondary } => SymbolRole::Family {
                    primary: parse_category(&primary)?,
                    secondary: parse_category(&secondary)?,
                },
            };
            legend.with_symbol(symbol, role);
        }

        for (name, quota) in file.quotas.into_iter().sorted() {
            legend.with_quota(parse_category(&name)?, quota);
        }

        Ok(legend)
    }

    /// Whether `symbol` is one of the wall symbols.
    pub fn is_wall(&self, symbol: &str) -> bool {
        self.walls.contains(symbol)
    }

    /// Whether `symbol` is one of the entrance symbols.
    pub fn is_entrance(&self, symbol: &str) -> bool {
        self.entrances.contains(symbol)
    }

    /// The wall symbols, in no particular order.
    pub fn walls(&self) -> impl Iterator<Item = &str> {
        self.walls.iter().map(String::as_str)
    }

    /// The symbol table entry for `symbol`, if any.
    pub fn role_of(&self, symbol: &str) -> Option<SymbolRole> {
        self.symbols.get(symbol).copied()
    }

    /// The quota registered for a family primary category, or [`DEFAULT_QUOTA`].
    pub fn quota_for(&self, primary: Category) -> usize {
        self.quotas.get(&primary).copied().unwrap_or(DEFAULT_QUOTA)
    }

    /// The category assigned to unknown symbols.
    ///
    /// Note that every unknown symbol shares this one category, so two distinct custom symbols are indistinguishable to rules.
    pub fn fallback(&self) -> Category {
        self.fallback
    }

    /// Every multi-character token the map scanner should try to match, longest first, as `char` sequences.
    pub(crate) fn match_candidates(&self) -> Vec<Vec<char>> {
        self.symbols.keys()
            .chain(self.walls.iter())
            .chain(self.entrances.iter())
            .unique()
            .map(|s| s.chars().collect_vec())
            .sorted_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)))
            .collect_vec()
    }
}

fn parse_category(name: &str) -> Result<Category, LegendError> {
    Category::from_str(name.trim()).map_err(|_| LegendError::UnknownCategory(name.to_owned()))
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct LegendFile {
    walls: Option<Vec<String>>,
    entrances: Option<Vec<String>>,
    fallback: Option<String>,
    symbols: HashMap<String, SymbolEntry>,
    quotas: HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SymbolEntry {
    Fixed(String),
    Family { primary: String, secondary: String },
}
