//! Overlap clustering and resolution for predicted G-quadruplex records.
//!
//! Scanning reports every match at every start position, so predictions
//! pile up on top of each other. This crate turns a `(chrom, start)`-sorted
//! record stream into a non-redundant set in two steps:
//!
//! 1. [`cluster_overlapping`](cluster::cluster_overlapping) partitions the
//!    stream into maximal overlap-connected [`Cluster`](cluster::Cluster)s,
//!    tracking each strand with its own state machine so strands never mix.
//! 2. A [`ResolveMethod`](resolve::ResolveMethod) reduces each cluster:
//!    `Merge` flattens it to a single span scored by record count, `Filter`
//!    keeps the maximum-total-score subset of non-overlapping records via
//!    weighted interval scheduling.
//!
//! ## Quick Start
//!
//! ```
//! use g4scan_core::models::{G4Record, Strand};
//! use g4scan_overlap::{ResolveMethod, cluster_overlapping};
//!
//! let record = |start, end, score| G4Record {
//!     chrom: "chr1".to_string(),
//!     start,
//!     end,
//!     name: "pg4".to_string(),
//!     score,
//!     strand: Strand::Forward,
//!     blocks: None,
//! };
//!
//! // two overlapping candidates, the better one wins
//! let records = vec![record(0, 100, 40.0), record(50, 150, 30.0)];
//! let resolved: Vec<G4Record> = cluster_overlapping(records)
//!     .flat_map(|cluster| ResolveMethod::Filter.resolve(cluster))
//!     .collect();
//!
//! assert_eq!(resolved.len(), 1);
//! assert_eq!(resolved[0].score, 40.0);
//! ```
//!
//! Clusters from the two strands interleave in emission order; every
//! cluster is resolved independently, so the interleaving does not affect
//! results. Input must already be sorted by `(chrom, start)`; this crate
//! trusts the upstream sort.

pub mod cluster;
pub mod resolve;

// re-exports
pub use self::cluster::{Cluster, ClusterIter, OverlapClusterer, cluster_overlapping};
pub use self::resolve::{ResolveMethod, filter_cluster, merge_cluster};
