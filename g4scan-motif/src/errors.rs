use thiserror::Error;

///
/// Raised while validating a parameter model or compiling its pattern set,
/// always before any sequence is scanned.
///
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid {what} range: min {min} is greater than max {max}")]
    InvalidRange {
        what: &'static str,
        min: u32,
        max: u32,
    },

    #[error("Tetrad length must be at least 1")]
    EmptyTetrad,

    #[error("Expected {expected} loop specs for this motif family, got {found}")]
    LoopCountMismatch { expected: usize, found: usize },

    #[error("At most 4 of the 4 tetrads can be bulged, got {0}")]
    TooManyBulges(u32),

    #[error("Partial motifs need at least 2 runs, got min {0}")]
    RunCountTooSmall(u32),

    #[error("Pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),
}
