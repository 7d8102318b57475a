use thiserror::Error;

/// Reasons a [`GraphBuilder`](crate::GraphBuilder) may refuse to produce a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No line of the input contains a wall symbol, so the end of the map cannot be located.
    #[error("no wall line found; the map must contain at least one row with a wall symbol")]
    MalformedInput,

    /// The map was parsed but holds nothing besides walls, entrances and blank floor.
    #[error("no occupants detected on the map")]
    NoOccupants,
}

/// Reasons a [`Legend`](crate::Legend) could not be loaded.
#[derive(Error, Debug)]
pub enum LegendError {
    /// The legend document could not be parsed.
    #[error("legend is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A category name outside the fixed set was used.
    #[error("unknown category `{0}` in legend")]
    UnknownCategory(String),

    /// A wall, entrance or symbol table entry was the empty string.
    #[error("symbol entry must not be empty")]
    EmptySymbol,
}

/// Shorthand for results of the build pipeline.
pub type BuildResult<T> = Result<T, BuildError>;
