//! Motif pattern compilation and sequence scanning for putative
//! G-quadruplexes (PG4s).
//!
//! A [`MotifParams`] model describes one of two motif families:
//!
//! - **Complete** motifs: four tetrads (G-runs on `+`, C-runs on `-`)
//!   separated by three loops, optionally with up to four bulged tetrads.
//! - **Partial** motifs: shorter chains of 2+ runs that could pair with a
//!   partial motif from another molecule.
//!
//! [`compile`](pattern::compile) expands the model into a finite family of
//! concrete patterns, one per strand, tetrad length and bulge layout, each
//! tagged with a capture-group role table. [`G4Scanner`] runs the family
//! over sequences and emits scored [`G4Record`](g4scan_core::models::G4Record)s,
//! including overlapping matches.
//!
//! ## Quick Start
//!
//! ```
//! use g4scan_motif::{G4Scanner, MotifParams};
//!
//! let scanner = G4Scanner::new(MotifParams::default()).unwrap();
//! let records = scanner.scan("chrX", "AAGGGACTGGGATGGGTTTGGGTTT");
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].name, "3t0b3,2,3l");
//! ```
//!
//! Pattern-set size is the dominant cost driver: it grows with the tetrad
//! length range and combinatorially with the allowed bulge count.

pub mod errors;
pub mod params;
pub mod pattern;
pub mod scanner;

// re-exports
pub use self::errors::ConfigurationError;
pub use self::params::{
    BulgeSpec, LoopSpec, MotifFamily, MotifParams, RunRange, ScoreWeights, TetradRange,
};
pub use self::pattern::{GroupRole, MotifPattern, MotifShape, compile};
pub use self::scanner::G4Scanner;
