//! Shared data model and IO plumbing for the g4scan workspace.
//!
//! This crate holds the types the other g4scan crates exchange: the
//! [`Strand`](models::Strand) a motif was predicted on and the
//! [`G4Record`](models::G4Record) interval record (BED6/BED12 shaped,
//! 0-based half-open coordinates), plus readers and writers that handle
//! plain, gzip'd and stdin/stdout streams uniformly.

pub mod errors;
pub mod models;
pub mod utils;
